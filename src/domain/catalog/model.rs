//! Catalog domain model.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::CatalogError;

/// The four fixed catalog sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKind {
    SystemConfig,
    EssentialApps,
    AdditionalApps,
    Customization,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::SystemConfig,
        SectionKind::EssentialApps,
        SectionKind::AdditionalApps,
        SectionKind::Customization,
    ];

    /// Key used in catalog and selection documents.
    pub fn key(self) -> &'static str {
        match self {
            SectionKind::SystemConfig => "system_config",
            SectionKind::EssentialApps => "essential_apps",
            SectionKind::AdditionalApps => "additional_apps",
            SectionKind::Customization => "customization",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SectionKind::SystemConfig => "System Configuration",
            SectionKind::EssentialApps => "Essential Applications",
            SectionKind::AdditionalApps => "Additional Applications",
            SectionKind::Customization => "Customization",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SectionKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| CatalogError::UnknownSection(s.to_string()))
    }
}

/// One named way of installing an option (e.g. "DNF", "Flatpak").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallMethod {
    pub label: String,
    /// Statements to run; empty only for entries kept by lenient loading.
    pub commands: Vec<String>,
    /// Option ids force-enabled when this method is chosen.
    pub dependencies: Vec<String>,
}

/// What an option does when selected, resolved once at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionAction {
    /// Fixed statement sequence.
    Command(Vec<String>),
    /// Caller picks one of several installation methods.
    Methods(Vec<InstallMethod>),
    /// Entry kept by lenient loading; the reason is rendered as a warning.
    Malformed(String),
}

/// One selectable unit of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOption {
    pub id: String,
    pub name: String,
    pub description: String,
    pub action: OptionAction,
    /// Option ids force-enabled whenever this option is chosen.
    pub dependencies: Vec<String>,
}

impl CatalogOption {
    /// Look up an installation method by label.
    pub fn method(&self, label: &str) -> Option<&InstallMethod> {
        match &self.action {
            OptionAction::Methods(methods) => methods.iter().find(|m| m.label == label),
            _ => None,
        }
    }

    /// Labels of the installation methods this option offers.
    pub fn method_labels(&self) -> Vec<&str> {
        match &self.action {
            OptionAction::Methods(methods) => methods.iter().map(|m| m.label.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    pub fn has_methods(&self) -> bool {
        matches!(self.action, OptionAction::Methods(_))
    }
}

/// Package installed through the batched essential-apps command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EssentialApp {
    /// Package name, also the selection key.
    pub name: String,
    pub description: String,
}

/// Named group of additional applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppCategory {
    pub id: String,
    pub name: String,
    pub apps: Vec<CatalogOption>,
}

impl AppCategory {
    pub fn app(&self, id: &str) -> Option<&CatalogOption> {
        self.apps.iter().find(|app| app.id == id)
    }
}

/// Immutable description of every selectable setup option, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub system_config: Vec<CatalogOption>,
    pub essential_apps: Vec<EssentialApp>,
    pub additional_apps: Vec<AppCategory>,
    pub customization: Vec<CatalogOption>,
}

/// Flattened view of one entry, used for listing and search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSummary<'a> {
    pub section: SectionKind,
    pub category: Option<&'a str>,
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub methods: Vec<&'a str>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.system_config.is_empty()
            && self.essential_apps.is_empty()
            && self.additional_apps.is_empty()
            && self.customization.is_empty()
    }

    /// Total number of selectable entries across all sections.
    pub fn option_count(&self) -> usize {
        self.system_config.len()
            + self.essential_apps.len()
            + self.additional_apps.iter().map(|c| c.apps.len()).sum::<usize>()
            + self.customization.len()
    }

    pub fn system_option(&self, id: &str) -> Option<&CatalogOption> {
        self.system_config.iter().find(|option| option.id == id)
    }

    pub fn essential_app(&self, name: &str) -> Option<&EssentialApp> {
        self.essential_apps.iter().find(|app| app.name == name)
    }

    pub fn category(&self, id: &str) -> Option<&AppCategory> {
        self.additional_apps.iter().find(|category| category.id == id)
    }

    /// Find an additional app by id in any category.
    pub fn additional_app(&self, id: &str) -> Option<(&AppCategory, &CatalogOption)> {
        self.additional_apps
            .iter()
            .find_map(|category| category.app(id).map(|app| (category, app)))
    }

    pub fn customization_option(&self, id: &str) -> Option<&CatalogOption> {
        self.customization.iter().find(|option| option.id == id)
    }

    /// Look up a non-essential option by section.
    pub fn option(&self, section: SectionKind, id: &str) -> Result<&CatalogOption, CatalogError> {
        let found = match section {
            SectionKind::SystemConfig => self.system_option(id),
            SectionKind::AdditionalApps => self.additional_app(id).map(|(_, app)| app),
            SectionKind::Customization => self.customization_option(id),
            SectionKind::EssentialApps => None,
        };
        found.ok_or_else(|| CatalogError::UnknownOption { section, id: id.to_string() })
    }

    /// Human-readable label of an entry.
    pub fn name_of(&self, section: SectionKind, id: &str) -> Result<&str, CatalogError> {
        match section {
            SectionKind::EssentialApps => self
                .essential_app(id)
                .map(|app| app.name.as_str())
                .ok_or_else(|| CatalogError::UnknownOption { section, id: id.to_string() }),
            _ => self.option(section, id).map(|option| option.name.as_str()),
        }
    }

    /// Help text of an entry.
    pub fn description_of(&self, section: SectionKind, id: &str) -> Result<&str, CatalogError> {
        match section {
            SectionKind::EssentialApps => self
                .essential_app(id)
                .map(|app| app.description.as_str())
                .ok_or_else(|| CatalogError::UnknownOption { section, id: id.to_string() }),
            _ => self.option(section, id).map(|option| option.description.as_str()),
        }
    }

    /// Every entry in document order, section by section.
    pub fn summaries(&self) -> Vec<OptionSummary<'_>> {
        let mut out = Vec::with_capacity(self.option_count());

        for option in &self.system_config {
            out.push(summarize(SectionKind::SystemConfig, None, option));
        }
        for app in &self.essential_apps {
            out.push(OptionSummary {
                section: SectionKind::EssentialApps,
                category: None,
                id: &app.name,
                name: &app.name,
                description: &app.description,
                methods: Vec::new(),
            });
        }
        for category in &self.additional_apps {
            for app in &category.apps {
                out.push(summarize(SectionKind::AdditionalApps, Some(&category.id), app));
            }
        }
        for option in &self.customization {
            out.push(summarize(SectionKind::Customization, None, option));
        }

        out
    }
}

fn summarize<'a>(
    section: SectionKind,
    category: Option<&'a str>,
    option: &'a CatalogOption,
) -> OptionSummary<'a> {
    OptionSummary {
        section,
        category,
        id: &option.id,
        name: &option.name,
        description: &option.description,
        methods: option.method_labels(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_catalog;

    #[test]
    fn section_kind_parses_fixed_keys() {
        assert_eq!("system_config".parse::<SectionKind>(), Ok(SectionKind::SystemConfig));
        assert_eq!("customization".parse::<SectionKind>(), Ok(SectionKind::Customization));
        assert_eq!(
            "apps".parse::<SectionKind>(),
            Err(CatalogError::UnknownSection("apps".to_string()))
        );
    }

    #[test]
    fn name_of_covers_every_section() {
        let catalog = fixture_catalog();

        assert_eq!(
            catalog.name_of(SectionKind::SystemConfig, "enable_rpmfusion").unwrap(),
            "RPM Fusion"
        );
        assert_eq!(catalog.name_of(SectionKind::EssentialApps, "git").unwrap(), "git");
        assert_eq!(catalog.name_of(SectionKind::AdditionalApps, "install_vlc").unwrap(), "VLC");
        assert_eq!(
            catalog.name_of(SectionKind::Customization, "install_windows_fonts").unwrap(),
            "Windows Fonts"
        );
    }

    #[test]
    fn description_of_unknown_option_fails() {
        let catalog = fixture_catalog();

        let err = catalog.description_of(SectionKind::Customization, "missing").unwrap_err();

        assert_eq!(
            err,
            CatalogError::UnknownOption {
                section: SectionKind::Customization,
                id: "missing".to_string()
            }
        );
    }

    #[test]
    fn additional_app_is_found_in_any_category() {
        let catalog = fixture_catalog();

        let (category, app) = catalog.additional_app("install_docker").unwrap();

        assert_eq!(category.id, "development");
        assert_eq!(app.name, "Docker");
    }

    #[test]
    fn summaries_follow_document_order() {
        let catalog = fixture_catalog();
        let summaries = catalog.summaries();

        assert_eq!(summaries.len(), catalog.option_count());
        assert_eq!(summaries[0].section, SectionKind::SystemConfig);
        assert_eq!(summaries.last().unwrap().section, SectionKind::Customization);

        let vlc = summaries.iter().find(|s| s.id == "install_vlc").unwrap();
        assert_eq!(vlc.category, Some("media_graphics"));
        assert_eq!(vlc.methods, vec!["DNF", "Flatpak"]);
    }

    #[test]
    fn default_catalog_is_empty() {
        assert!(Catalog::default().is_empty());
        assert!(!fixture_catalog().is_empty());
    }
}
