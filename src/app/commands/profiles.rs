//! Profiles command: the preset selections shipped with the binary.

use crate::adapters::EmbeddedProfiles;
use crate::domain::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub name: String,
    pub description: String,
    pub option_count: usize,
}

pub fn execute() -> Result<Vec<ProfileSummary>, AppError> {
    let profiles = EmbeddedProfiles::load()?;
    Ok(profiles
        .all()
        .iter()
        .map(|profile| ProfileSummary {
            name: profile.name.clone(),
            description: profile.description.clone(),
            option_count: profile.system_config.len()
                + profile.essential_apps.len()
                + profile.additional_apps.values().map(Vec::len).sum::<usize>()
                + profile.customization.len(),
        })
        .collect())
}
