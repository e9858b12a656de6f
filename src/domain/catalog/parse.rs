//! Catalog document parsing.
//!
//! The document is JSON whose key order carries meaning (it is the render
//! order), so sections are read as ordered `serde_json` maps and each entry is
//! converted into the tagged [`OptionAction`] model here, once.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::catalog::model::{
    AppCategory, Catalog, CatalogOption, EssentialApp, InstallMethod, OptionAction,
};
use crate::domain::error::{CatalogLoadError, MalformedOptionError};

/// Parsed catalog plus the entries that broke the option invariant.
#[derive(Debug, Clone, Default)]
pub struct ParsedCatalog {
    pub catalog: Catalog,
    pub issues: Vec<MalformedOptionError>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    system_config: Map<String, Value>,
    #[serde(default)]
    essential_apps: RawEssentialSection,
    #[serde(default)]
    additional_apps: Map<String, Value>,
    #[serde(default)]
    customization: RawAppsSection,
}

#[derive(Debug, Default, Deserialize)]
struct RawEssentialSection {
    #[serde(default)]
    apps: Vec<RawEssentialApp>,
}

#[derive(Debug, Deserialize)]
struct RawEssentialApp {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawAppsSection {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    apps: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    name: Option<String>,
    description: Option<String>,
    command: Option<OneOrMany>,
    installation_types: Option<Map<String, Value>>,
    #[serde(default)]
    dependencies: OneOrMany,
}

#[derive(Debug, Deserialize)]
struct RawMethod {
    command: Option<OneOrMany>,
    #[serde(default)]
    dependencies: OneOrMany,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl Default for OneOrMany {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// Parse a catalog document, collecting per-entry invariant violations.
///
/// Document-level problems (not JSON, sections of the wrong shape) fail the
/// whole parse; entry-level problems are returned in [`ParsedCatalog::issues`]
/// with the entry kept in a renderable degraded form.
pub fn parse_catalog(content: &str) -> Result<ParsedCatalog, CatalogLoadError> {
    let raw: RawDocument =
        serde_json::from_str(content).map_err(|e| CatalogLoadError::Malformed(e.to_string()))?;

    let mut issues = Vec::new();

    let system_config = parse_options("system_config", raw.system_config, &mut issues)?;

    let essential_apps = raw
        .essential_apps
        .apps
        .into_iter()
        .map(|app| EssentialApp { name: app.name, description: app.description })
        .collect();

    let mut additional_apps = Vec::with_capacity(raw.additional_apps.len());
    for (category_id, value) in raw.additional_apps {
        let section: RawAppsSection = serde_json::from_value(value).map_err(|e| {
            CatalogLoadError::Malformed(format!("additional_apps/{}: {}", category_id, e))
        })?;
        let location = format!("additional_apps/{}", category_id);
        let apps = parse_options(&location, section.apps, &mut issues)?;
        additional_apps.push(AppCategory {
            name: section.name.unwrap_or_else(|| category_id.clone()),
            id: category_id,
            apps,
        });
    }

    let customization = parse_options("customization", raw.customization.apps, &mut issues)?;

    Ok(ParsedCatalog {
        catalog: Catalog { system_config, essential_apps, additional_apps, customization },
        issues,
    })
}

fn parse_options(
    location: &str,
    entries: Map<String, Value>,
    issues: &mut Vec<MalformedOptionError>,
) -> Result<Vec<CatalogOption>, CatalogLoadError> {
    let mut options = Vec::with_capacity(entries.len());

    for (id, value) in entries {
        // Section-level metadata such as a "description" string sits next to entries.
        if !value.is_object() {
            continue;
        }
        let entry_location = format!("{}/{}", location, id);
        let raw: RawOption = serde_json::from_value(value)
            .map_err(|e| CatalogLoadError::Malformed(format!("{}: {}", entry_location, e)))?;
        options.push(convert_option(id, raw, &entry_location, issues)?);
    }

    Ok(options)
}

fn convert_option(
    id: String,
    raw: RawOption,
    location: &str,
    issues: &mut Vec<MalformedOptionError>,
) -> Result<CatalogOption, CatalogLoadError> {
    let name = raw.name.unwrap_or_else(|| id.clone());

    let description = match raw.description {
        Some(description) => description,
        None => {
            issues.push(MalformedOptionError::new(location, "missing description"));
            format!("Configure {}", name)
        }
    };

    let action = match (raw.command, raw.installation_types) {
        (Some(_), Some(_)) => {
            malformed(location, "both command and installation_types are defined", issues)
        }
        (None, None) => malformed(location, "missing command", issues),
        (Some(command), None) => {
            let commands = non_empty(command.into_vec());
            if commands.is_empty() {
                malformed(location, "command is empty", issues)
            } else {
                OptionAction::Command(commands)
            }
        }
        (None, Some(types)) if types.is_empty() => {
            malformed(location, "installation_types is empty", issues)
        }
        (None, Some(types)) => {
            let mut methods = Vec::with_capacity(types.len());
            for (label, value) in types {
                let method_location = format!("{}/{}", location, label);
                let method: RawMethod = serde_json::from_value(value).map_err(|e| {
                    CatalogLoadError::Malformed(format!("{}: {}", method_location, e))
                })?;
                let commands = method.command.map(OneOrMany::into_vec).map(non_empty);
                let commands = match commands {
                    Some(commands) if !commands.is_empty() => commands,
                    _ => {
                        issues.push(MalformedOptionError::new(method_location, "missing command"));
                        Vec::new()
                    }
                };
                methods.push(InstallMethod {
                    label,
                    commands,
                    dependencies: method.dependencies.into_vec(),
                });
            }
            OptionAction::Methods(methods)
        }
    };

    Ok(CatalogOption { id, name, description, action, dependencies: raw.dependencies.into_vec() })
}

fn malformed(
    location: &str,
    reason: &str,
    issues: &mut Vec<MalformedOptionError>,
) -> OptionAction {
    issues.push(MalformedOptionError::new(location, reason));
    OptionAction::Malformed(reason.to_string())
}

fn non_empty(commands: Vec<String>) -> Vec<String> {
    commands.into_iter().filter(|c| !c.trim().is_empty()).collect()
}
