//! Configuration loading and command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::config::CONFIG_FILE;
use crate::domain::{AppError, NattdConfig};

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Explicit configuration file; must exist when given.
    pub config: Option<PathBuf>,
    /// Catalog document overriding the configured one.
    pub catalog: Option<PathBuf>,
    /// Keep malformed catalog entries.
    pub lenient: bool,
}

/// Load the configuration for `dir`, then apply overrides.
///
/// An explicit path must exist. Without one, `nattd.toml` in `dir` is used
/// when present and defaults otherwise.
pub fn load_config(dir: &Path, options: &GlobalOptions) -> Result<NattdConfig, AppError> {
    let mut config = match &options.config {
        Some(path) => {
            let path = dir.join(path);
            if !path.is_file() {
                return Err(AppError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            read_config(&path)?
        }
        None => {
            let path = dir.join(CONFIG_FILE);
            if path.is_file() { read_config(&path)? } else { NattdConfig::default() }
        }
    };

    if let Some(catalog) = &options.catalog {
        config.catalog.path = Some(catalog.clone());
    }
    config.catalog.lenient |= options.lenient;
    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<NattdConfig, AppError> {
    log::debug!("Reading configuration from {}", path.display());
    let content = fs::read_to_string(path)?;
    NattdConfig::parse(&content).map_err(|err| match err {
        AppError::TomlParseError(e) => {
            AppError::config_error(format!("Invalid {}: {}", path.display(), e))
        }
        other => other,
    })
}
