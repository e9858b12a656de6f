//! Assets compiled into the binary: catalog, script template, and profiles.

use include_dir::{Dir, include_dir};

use crate::domain::error::CatalogLoadError;
use crate::domain::{AppError, Profile};
use crate::ports::CatalogSource;

static ASSETS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/assets");

const CATALOG_PATH: &str = "catalog/nattd.json";
const TEMPLATE_PATH: &str = "template/template.sh";
const PROFILES_DIR: &str = "profiles";

/// The catalog shipped with the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalogSource;

impl CatalogSource for EmbeddedCatalogSource {
    fn read_document(&self) -> Result<String, CatalogLoadError> {
        let file = ASSETS_DIR
            .get_file(CATALOG_PATH)
            .ok_or_else(|| CatalogLoadError::Missing(self.describe()))?;
        let content = file.contents_utf8().ok_or_else(|| CatalogLoadError::Unreadable {
            source_name: self.describe(),
            details: "not valid UTF-8".to_string(),
        })?;
        Ok(content.to_string())
    }

    fn describe(&self) -> String {
        format!("embedded:{}", CATALOG_PATH)
    }
}

/// The default script template.
pub fn embedded_template() -> Result<&'static str, AppError> {
    ASSETS_DIR
        .get_file(TEMPLATE_PATH)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| AppError::TemplateMissing(format!("embedded:{}", TEMPLATE_PATH)))
}

/// Preset profiles, sorted by name.
#[derive(Debug, Clone)]
pub struct EmbeddedProfiles {
    profiles: Vec<Profile>,
}

impl EmbeddedProfiles {
    pub fn load() -> Result<Self, AppError> {
        let Some(dir) = ASSETS_DIR.get_dir(PROFILES_DIR) else {
            return Ok(Self { profiles: Vec::new() });
        };

        let mut profiles = Vec::new();
        for file in dir.files() {
            let path = file.path().display().to_string();
            if !path.ends_with(".yml") && !path.ends_with(".yaml") {
                continue;
            }
            let content = file.contents_utf8().ok_or_else(|| {
                AppError::config_error(format!("Profile {} is not valid UTF-8", path))
            })?;
            let profile = Profile::parse_yaml(content).map_err(|e| {
                AppError::config_error(format!("Invalid profile {}: {}", path, e))
            })?;
            profiles.push(profile);
        }
        profiles.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self { profiles })
    }

    pub fn all(&self) -> &[Profile] {
        &self.profiles
    }

    /// Case-insensitive lookup by profile name.
    pub fn find(&self, name: &str) -> Result<&Profile, AppError> {
        self.profiles.iter().find(|p| p.name.eq_ignore_ascii_case(name.trim())).ok_or_else(|| {
            AppError::ProfileNotFound {
                name: name.to_string(),
                available: self.names().join(", "),
            }
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }
}
