//! Show command: everything the catalog knows about one entry.

use crate::app::AppContext;
use crate::domain::catalog::InstallMethod;
use crate::domain::{AppError, OptionAction, SectionKind};
use crate::ports::CatalogSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailAction {
    /// Installed by the batched essential-apps command.
    Batched,
    Commands(Vec<String>),
    Methods(Vec<InstallMethod>),
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDetail {
    pub section: SectionKind,
    pub category: Option<String>,
    pub id: String,
    pub name: String,
    pub description: String,
    pub action: DetailAction,
    pub dependencies: Vec<String>,
}

pub fn execute<S: CatalogSource>(
    ctx: &AppContext<S>,
    section: SectionKind,
    id: &str,
) -> Result<OptionDetail, AppError> {
    let catalog = ctx.catalog()?;

    if section == SectionKind::EssentialApps {
        return Ok(OptionDetail {
            section,
            category: None,
            id: id.to_string(),
            name: catalog.name_of(section, id)?.to_string(),
            description: catalog.description_of(section, id)?.to_string(),
            action: DetailAction::Batched,
            dependencies: Vec::new(),
        });
    }

    let option = catalog.option(section, id)?;
    let category = match section {
        SectionKind::AdditionalApps => catalog.additional_app(id).map(|(c, _)| c.name.clone()),
        _ => None,
    };
    let action = match &option.action {
        OptionAction::Command(commands) => DetailAction::Commands(commands.clone()),
        OptionAction::Methods(methods) => DetailAction::Methods(methods.clone()),
        OptionAction::Malformed(reason) => DetailAction::Malformed(reason.clone()),
    };

    Ok(OptionDetail {
        section,
        category,
        id: option.id.clone(),
        name: option.name.clone(),
        description: option.description.clone(),
        action,
        dependencies: option.dependencies.clone(),
    })
}
