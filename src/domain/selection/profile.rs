//! Preset profiles that expand into a full selection.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::selection::model::{AppChoice, CustomizationChoice, Selection};

/// A named preset of options, read from YAML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub system_config: Vec<String>,
    /// Package names.
    #[serde(default)]
    pub essential_apps: Vec<String>,
    /// Category id -> app ids.
    #[serde(default)]
    pub additional_apps: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub customization: Vec<String>,
    #[serde(default)]
    pub custom_script: String,
    /// Option id -> installation method label.
    #[serde(default)]
    pub installation_methods: BTreeMap<String, String>,
}

impl Profile {
    pub fn parse_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Expand the preset into a selection that starts with a system upgrade.
    pub fn to_selection(&self) -> Selection {
        let mut selection = Selection { system_upgrade: true, ..Selection::default() };

        for id in &self.system_config {
            selection.set_system(id.clone(), true);
        }
        for name in &self.essential_apps {
            selection.essential_apps.insert(name.clone(), true);
        }
        for (category, apps) in &self.additional_apps {
            for id in apps {
                let choice = AppChoice {
                    selected: true,
                    installation_type: self.installation_methods.get(id).cloned(),
                };
                selection.set_app(category.clone(), id.clone(), choice);
            }
        }
        for id in &self.customization {
            let choice = match self.installation_methods.get(id) {
                Some(method) => CustomizationChoice::Method(AppChoice::with_method(method.clone())),
                None => CustomizationChoice::Toggle(true),
            };
            selection.customization.insert(id.clone(), choice);
        }
        selection.custom_script = self.custom_script.clone();

        selection
    }
}
