//! Selection domain model: the caller's choices, mirroring the catalog shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Choice for an option that may offer installation methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppChoice {
    #[serde(default)]
    pub selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation_type: Option<String>,
}

impl AppChoice {
    pub fn selected() -> Self {
        Self { selected: true, installation_type: None }
    }

    pub fn with_method(method: impl Into<String>) -> Self {
        Self { selected: true, installation_type: Some(method.into()) }
    }

    /// Chosen method label, ignoring blank values.
    pub fn method(&self) -> Option<&str> {
        self.installation_type.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Customization entries are either plain toggles or method choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomizationChoice {
    Toggle(bool),
    Method(AppChoice),
}

impl Default for CustomizationChoice {
    fn default() -> Self {
        CustomizationChoice::Toggle(false)
    }
}

impl CustomizationChoice {
    pub fn is_selected(&self) -> bool {
        match self {
            CustomizationChoice::Toggle(enabled) => *enabled,
            CustomizationChoice::Method(choice) => choice.selected,
        }
    }

    pub fn method(&self) -> Option<&str> {
        match self {
            CustomizationChoice::Toggle(_) => None,
            CustomizationChoice::Method(choice) => choice.method(),
        }
    }
}

/// The user's concrete choices.
///
/// Owned by the caller; the resolver and renderers only ever read it or work
/// on a private clone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Run the full system upgrade first. Absent from a file means `true`.
    #[serde(default = "default_true")]
    pub system_upgrade: bool,
    #[serde(default)]
    pub system_config: BTreeMap<String, bool>,
    /// Keyed by package name.
    #[serde(default)]
    pub essential_apps: BTreeMap<String, bool>,
    /// Category id -> app id -> choice.
    #[serde(default)]
    pub additional_apps: BTreeMap<String, BTreeMap<String, AppChoice>>,
    #[serde(default)]
    pub customization: BTreeMap<String, CustomizationChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default)]
    pub custom_script: String,
}

fn default_true() -> bool {
    true
}

impl Selection {
    pub fn is_system_enabled(&self, id: &str) -> bool {
        self.system_config.get(id).copied().unwrap_or(false)
    }

    pub fn set_system(&mut self, id: impl Into<String>, enabled: bool) {
        self.system_config.insert(id.into(), enabled);
    }

    pub fn is_essential_selected(&self, name: &str) -> bool {
        self.essential_apps.get(name).copied().unwrap_or(false)
    }

    pub fn app_choice(&self, category: &str, id: &str) -> Option<&AppChoice> {
        self.additional_apps.get(category).and_then(|apps| apps.get(id))
    }

    pub fn set_app(&mut self, category: impl Into<String>, id: impl Into<String>, choice: AppChoice) {
        self.additional_apps.entry(category.into()).or_default().insert(id.into(), choice);
    }

    pub fn customization_choice(&self, id: &str) -> Option<&CustomizationChoice> {
        self.customization.get(id)
    }

    /// Hostname to apply, ignoring blank values.
    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref().map(str::trim).filter(|h| !h.is_empty())
    }

    /// Ids of every enabled system-configuration option.
    pub fn enabled_system_ids(&self) -> impl Iterator<Item = &str> {
        self.system_config.iter().filter(|(_, on)| **on).map(|(id, _)| id.as_str())
    }
}
