//! Tool configuration loaded from `nattd.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;
use crate::domain::script::{DEFAULT_HOSTNAME, Verbosity, validate_hostname};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "nattd.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NattdConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub script: ScriptConfig,
}

impl NattdConfig {
    pub fn parse(content: &str) -> Result<Self, AppError> {
        let config: NattdConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.catalog.validate()?;
        self.script.validate()?;
        Ok(())
    }
}

/// Where the catalog comes from and how it is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Catalog document; the embedded one when absent.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Keep malformed entries and render warnings for them.
    #[serde(default)]
    pub lenient: bool,
    /// Lifetime of a cached catalog. 0 disables caching.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { path: None, lenient: false, cache_ttl_secs: default_cache_ttl_secs() }
    }
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(AppError::config_error("catalog.path must not be empty"));
        }
        Ok(())
    }
}

/// Script rendering defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptConfig {
    /// Script template; the embedded one when absent.
    #[serde(default)]
    pub template: Option<PathBuf>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub mode: Verbosity,
    #[serde(default = "default_hostname")]
    pub default_hostname: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            template: None,
            output: default_output(),
            mode: Verbosity::default(),
            default_hostname: default_hostname(),
        }
    }
}

impl ScriptConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.output.as_os_str().is_empty() {
            return Err(AppError::config_error("script.output must not be empty"));
        }
        if self.template.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(AppError::config_error("script.template must not be empty"));
        }
        validate_hostname(&self.default_hostname).map_err(|e| {
            AppError::config_error(format!("script.default_hostname is invalid: {}", e))
        })?;
        Ok(())
    }
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_output() -> PathBuf {
    PathBuf::from("fedora_things_to_do.sh")
}

fn default_hostname() -> String {
    DEFAULT_HOSTNAME.to_string()
}
