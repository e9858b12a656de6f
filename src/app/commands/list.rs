//! List command: catalog entries, optionally filtered.

use crate::app::AppContext;
use crate::domain::catalog::OptionSummary;
use crate::domain::{AppError, SectionKind};
use crate::ports::CatalogSource;

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub section: Option<SectionKind>,
    /// Regular expression matched against names and descriptions.
    pub search: Option<String>,
}

/// One catalog entry as shown by `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionListing {
    pub section: SectionKind,
    pub category: Option<String>,
    pub id: String,
    pub name: String,
    pub description: String,
    pub methods: Vec<String>,
}

impl From<OptionSummary<'_>> for OptionListing {
    fn from(summary: OptionSummary<'_>) -> Self {
        Self {
            section: summary.section,
            category: summary.category.map(str::to_string),
            id: summary.id.to_string(),
            name: summary.name.to_string(),
            description: summary.description.to_string(),
            methods: summary.methods.into_iter().map(str::to_string).collect(),
        }
    }
}

pub fn execute<S: CatalogSource>(
    ctx: &AppContext<S>,
    options: &ListOptions,
) -> Result<Vec<OptionListing>, AppError> {
    let catalog = ctx.catalog()?;
    let listings = catalog
        .search(options.search.as_deref().unwrap_or(""))
        .into_iter()
        .filter(|summary| options.section.is_none_or(|section| summary.section == section))
        .map(OptionListing::from)
        .collect();
    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NattdConfig;
    use crate::testing::{FIXTURE_CATALOG, StaticCatalogSource};

    fn context() -> AppContext<StaticCatalogSource> {
        AppContext::new(NattdConfig::default(), StaticCatalogSource::new(FIXTURE_CATALOG), ".")
    }

    #[test]
    fn lists_everything_by_default() {
        let listings = execute(&context(), &ListOptions::default()).unwrap();

        assert_eq!(listings.len(), 17);
        assert_eq!(listings[0].id, "configure_dnf");
    }

    #[test]
    fn filters_by_section_and_search() {
        let options = ListOptions {
            section: Some(SectionKind::AdditionalApps),
            search: Some("media|image".into()),
        };

        let ids: Vec<_> =
            execute(&context(), &options).unwrap().into_iter().map(|l| l.id).collect();

        assert_eq!(ids, vec!["install_vlc", "install_gimp"]);
    }

    #[test]
    fn carries_category_and_methods() {
        let options = ListOptions { search: Some("^vlc$".into()), ..Default::default() };

        let listing = execute(&context(), &options).unwrap().remove(0);

        assert_eq!(listing.category.as_deref(), Some("media_graphics"));
        assert_eq!(listing.methods, vec!["DNF", "Flatpak"]);
    }

    #[test]
    fn missing_catalog_is_an_error() {
        let ctx = AppContext::new(NattdConfig::default(), StaticCatalogSource::missing(), ".");

        assert!(execute(&ctx, &ListOptions::default()).is_err());
    }
}
