//! Init command: write a starter selection file.

use std::path::PathBuf;

use crate::adapters::{EmbeddedProfiles, write_selection};
use crate::app::AppContext;
use crate::domain::{AppChoice, AppError, Catalog, CustomizationChoice, Selection};
use crate::ports::CatalogSource;

/// Default selection file name.
pub const SELECTION_FILE: &str = "selection.yml";

#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Start from this profile instead of an all-off skeleton.
    pub profile: Option<String>,
    pub path: PathBuf,
    pub force: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self { profile: None, path: PathBuf::from(SELECTION_FILE), force: false }
    }
}

pub fn execute<S: CatalogSource>(
    ctx: &AppContext<S>,
    options: &InitOptions,
) -> Result<PathBuf, AppError> {
    let path = ctx.resolve(&options.path);
    if path.exists() && !options.force {
        return Err(AppError::OutputExists(path.display().to_string()));
    }

    let selection = match &options.profile {
        Some(name) => EmbeddedProfiles::load()?.find(name)?.to_selection(),
        None => {
            let catalog = ctx.catalog()?;
            skeleton(&catalog)
        }
    };

    write_selection(&path, &selection)?;
    Ok(path)
}

/// Selection listing every catalog entry, all switched off.
///
/// Entries with installation methods are pre-filled with their first method
/// so the available labels are visible in the file.
pub fn skeleton(catalog: &Catalog) -> Selection {
    let mut selection = Selection { system_upgrade: true, ..Selection::default() };

    for option in &catalog.system_config {
        selection.set_system(option.id.clone(), false);
    }
    for app in &catalog.essential_apps {
        selection.essential_apps.insert(app.name.clone(), false);
    }
    for category in &catalog.additional_apps {
        for app in &category.apps {
            let choice = AppChoice {
                selected: false,
                installation_type: app.method_labels().first().map(|m| m.to_string()),
            };
            selection.set_app(category.id.clone(), app.id.clone(), choice);
        }
    }
    for option in &catalog.customization {
        let choice = match option.method_labels().first() {
            Some(method) => CustomizationChoice::Method(AppChoice {
                selected: false,
                installation_type: Some(method.to_string()),
            }),
            None => CustomizationChoice::Toggle(false),
        };
        selection.customization.insert(option.id.clone(), choice);
    }

    selection
}
