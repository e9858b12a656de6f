//! Dependency resolution: force-enable options implied by a selection.

use crate::domain::catalog::Catalog;
use crate::domain::selection::Selection;

/// System-configuration option that enables the third-party repository.
pub const REPOSITORY_OPTION: &str = "enable_rpmfusion";

/// Codec installers that need the third-party repository.
pub const CODEC_OPTIONS: [&str; 3] =
    ["install_multimedia_codecs", "install_intel_codecs", "install_amd_codecs"];

const REPOSITORY_LABEL: &str = "RPM Fusion";

/// A resolved selection plus the notifications describing what was implied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub selection: Selection,
    pub notifications: Vec<String>,
}

/// Domain logic for resolving implied options.
pub struct DependencyResolver;

impl DependencyResolver {
    /// Resolve implied options on a private copy of `selection`.
    ///
    /// Codec options imply the repository option first; then each selected
    /// additional app, in catalog order, enables the repository option when it
    /// or its chosen installation method lists it as a dependency. A dependency
    /// is never itself expanded further, so dependency cycles in the catalog
    /// cannot affect termination. At most one notification is produced per
    /// dependency, attributed to the first app that needed it.
    pub fn resolve(selection: &Selection, catalog: &Catalog) -> Resolution {
        let mut resolved = selection.clone();
        let mut notifications = Vec::new();

        if CODEC_OPTIONS.iter().any(|id| resolved.is_system_enabled(id)) {
            if !resolved.is_system_enabled(REPOSITORY_OPTION) {
                log::info!("{} automatically enabled due to codec selection", REPOSITORY_LABEL);
            }
            resolved.set_system(REPOSITORY_OPTION, true);
        }

        for category in &catalog.additional_apps {
            for app in &category.apps {
                let Some(choice) = selection.app_choice(&category.id, &app.id) else {
                    continue;
                };
                if !choice.selected {
                    continue;
                }

                let method_dependencies = choice
                    .method()
                    .and_then(|label| app.method(label))
                    .map(|method| method.dependencies.as_slice())
                    .unwrap_or_default();

                for dependency in app.dependencies.iter().chain(method_dependencies) {
                    if dependency != REPOSITORY_OPTION {
                        log::debug!(
                            "Ignoring dependency '{}' of {}: only {} is enabled automatically",
                            dependency,
                            app.name,
                            REPOSITORY_OPTION
                        );
                        continue;
                    }
                    if resolved.is_system_enabled(REPOSITORY_OPTION) {
                        continue;
                    }
                    resolved.set_system(REPOSITORY_OPTION, true);
                    log::info!("{} automatically enabled due to {} dependency", REPOSITORY_LABEL, app.name);
                    notifications.push(repository_notification(&app.name));
                }
            }
        }

        Resolution { selection: resolved, notifications }
    }
}

fn repository_notification(app_name: &str) -> String {
    format!(
        "{} has been automatically enabled because it's required for {}. This provides necessary packages and codecs.",
        REPOSITORY_LABEL, app_name
    )
}
