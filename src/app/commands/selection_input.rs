//! Where a command takes its selection from.

use std::path::PathBuf;

use crate::adapters::{EmbeddedProfiles, read_selection};
use crate::app::AppContext;
use crate::domain::{AppError, Selection};
use crate::ports::CatalogSource;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionInput {
    /// Nothing selected.
    #[default]
    Empty,
    /// YAML or JSON selection file.
    File(PathBuf),
    /// Named preset profile.
    Profile(String),
}

impl SelectionInput {
    pub fn from_args(file: Option<PathBuf>, profile: Option<String>) -> Self {
        match (file, profile) {
            (Some(path), _) => SelectionInput::File(path),
            (None, Some(name)) => SelectionInput::Profile(name),
            (None, None) => SelectionInput::Empty,
        }
    }
}

pub fn load_selection<S: CatalogSource>(
    ctx: &AppContext<S>,
    input: &SelectionInput,
) -> Result<Selection, AppError> {
    match input {
        SelectionInput::Empty => Ok(Selection::default()),
        SelectionInput::File(path) => read_selection(&ctx.resolve(path)),
        SelectionInput::Profile(name) => Ok(EmbeddedProfiles::load()?.find(name)?.to_selection()),
    }
}
