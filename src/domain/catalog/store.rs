//! Catalog store: reads the backing document through a [`CatalogSource`].

use crate::domain::catalog::model::{Catalog, OptionAction};
use crate::domain::catalog::parse::{ParsedCatalog, parse_catalog};
use crate::domain::error::{CatalogLoadError, MalformedOptionError};
use crate::ports::CatalogSource;

/// Loads and validates the catalog.
#[derive(Debug, Clone)]
pub struct CatalogStore<S: CatalogSource> {
    source: S,
    lenient: bool,
}

impl<S: CatalogSource> CatalogStore<S> {
    pub fn new(source: S) -> Self {
        Self { source, lenient: false }
    }

    /// Keep malformed entries instead of rejecting the document.
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Read and parse the document, keeping malformed entries next to their issues.
    pub fn parse(&self) -> Result<ParsedCatalog, CatalogLoadError> {
        let content = self.source.read_document()?;
        let parsed = parse_catalog(&content)?;
        log::debug!(
            "Loaded catalog from {} ({} options)",
            self.source.describe(),
            parsed.catalog.option_count()
        );
        Ok(parsed)
    }

    /// Load the catalog.
    ///
    /// In strict mode any entry that breaks the command/installation-types
    /// invariant fails the load; in lenient mode such entries are kept.
    pub fn load(&self) -> Result<Catalog, CatalogLoadError> {
        let parsed = self.parse()?;
        self.accept(&parsed.issues)?;
        Ok(parsed.catalog)
    }

    /// Apply the strictness policy to the issues found while parsing.
    pub fn accept(&self, issues: &[MalformedOptionError]) -> Result<(), CatalogLoadError> {
        if issues.is_empty() {
            return Ok(());
        }
        if !self.lenient {
            return Err(CatalogLoadError::InvalidOptions(issues.to_vec()));
        }
        for issue in issues {
            log::warn!("Keeping malformed catalog entry {}", issue);
        }
        Ok(())
    }

    /// Every problem in the document, without failing on entry-level issues.
    ///
    /// Besides invariant violations this reports dependency references to
    /// unknown option ids and options whose methods depend on themselves.
    pub fn check(&self) -> Result<CheckReport, CatalogLoadError> {
        let parsed = self.parse()?;
        let mut issues = parsed.issues;
        issues.extend(dependency_issues(&parsed.catalog));
        Ok(CheckReport { option_count: parsed.catalog.option_count(), issues })
    }
}

/// Result of [`CatalogStore::check`].
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub option_count: usize,
    pub issues: Vec<MalformedOptionError>,
}

fn dependency_issues(catalog: &Catalog) -> Vec<MalformedOptionError> {
    let mut issues = Vec::new();
    let known = |id: &str| {
        catalog.system_option(id).is_some()
            || catalog.additional_app(id).is_some()
            || catalog.customization_option(id).is_some()
    };

    let additional = catalog
        .additional_apps
        .iter()
        .flat_map(|c| c.apps.iter().map(move |app| (format!("additional_apps/{}", c.id), app)));
    let options = catalog
        .system_config
        .iter()
        .map(|o| ("system_config".to_string(), o))
        .chain(additional)
        .chain(catalog.customization.iter().map(|o| ("customization".to_string(), o)));

    for (section, option) in options {
        let location = format!("{}/{}", section, option.id);
        let mut edges: Vec<(String, &String)> =
            option.dependencies.iter().map(|dep| (location.clone(), dep)).collect();
        if let OptionAction::Methods(methods) = &option.action {
            for method in methods {
                let method_location = format!("{}/{}", location, method.label);
                edges.extend(method.dependencies.iter().map(|dep| (method_location.clone(), dep)));
            }
        }

        for (at, dep) in edges {
            if *dep == option.id {
                issues.push(MalformedOptionError::new(at, "depends on itself"));
            } else if !known(dep) {
                issues.push(MalformedOptionError::new(
                    at,
                    format!("depends on unknown option '{}'", dep),
                ));
            }
        }
    }

    issues
}
