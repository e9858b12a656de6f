/// The five fixed script sections, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptSlot {
    SystemUpgrade,
    SystemConfig,
    AppInstall,
    Customization,
    CustomScript,
}

impl ScriptSlot {
    pub const ALL: [ScriptSlot; 5] = [
        ScriptSlot::SystemUpgrade,
        ScriptSlot::SystemConfig,
        ScriptSlot::AppInstall,
        ScriptSlot::Customization,
        ScriptSlot::CustomScript,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ScriptSlot::SystemUpgrade => "system_upgrade",
            ScriptSlot::SystemConfig => "system_config",
            ScriptSlot::AppInstall => "app_install",
            ScriptSlot::Customization => "customization",
            ScriptSlot::CustomScript => "custom_script",
        }
    }

    /// Template placeholder, e.g. `{{system_upgrade}}`.
    pub fn token(self) -> String {
        format!("{{{{{}}}}}", self.key())
    }

    /// Section heading used in previews.
    pub fn title(self) -> &'static str {
        match self {
            ScriptSlot::SystemUpgrade => "System Upgrade",
            ScriptSlot::SystemConfig => "System Config",
            ScriptSlot::AppInstall => "App Install",
            ScriptSlot::Customization => "Customization",
            ScriptSlot::CustomScript => "Custom Script",
        }
    }
}
