//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together configuration
//! loading, context creation and command execution.

use std::path::{Path, PathBuf};

use crate::adapters::CatalogLocation;
use crate::app::{
    AppContext,
    commands::{build, check, init, list, preview, profiles, show},
    config::load_config,
};
use crate::domain::SectionKind;

pub use crate::app::commands::SelectionInput;
pub use crate::app::commands::build::{BuildOptions, BuildOutcome};
pub use crate::app::commands::check::CheckOutcome;
pub use crate::app::commands::init::InitOptions;
pub use crate::app::commands::list::{ListOptions, OptionListing};
pub use crate::app::commands::preview::PreviewOptions;
pub use crate::app::commands::profiles::ProfileSummary;
pub use crate::app::commands::show::{DetailAction, OptionDetail};
pub use crate::app::config::GlobalOptions;
pub use crate::domain::{AppError, RenderedScript, Verbosity};

/// Create an `AppContext` rooted at `dir`.
fn create_context(
    dir: &Path,
    global: &GlobalOptions,
) -> Result<AppContext<CatalogLocation>, AppError> {
    let config = load_config(dir, global)?;
    Ok(AppContext::from_config(config, dir))
}

fn current_context(global: &GlobalOptions) -> Result<AppContext<CatalogLocation>, AppError> {
    create_context(&std::env::current_dir()?, global)
}

// =============================================================================
// Script API
// =============================================================================

/// Render the preview script for a selection.
pub fn preview(global: &GlobalOptions, options: &PreviewOptions) -> Result<RenderedScript, AppError> {
    preview_at(std::env::current_dir()?, global, options)
}

/// Render the preview script with paths resolved against `dir`.
pub fn preview_at(
    dir: impl Into<PathBuf>,
    global: &GlobalOptions,
    options: &PreviewOptions,
) -> Result<RenderedScript, AppError> {
    let ctx = create_context(&dir.into(), global)?;
    preview::execute(&ctx, options)
}

/// Build the full setup script and write it to disk.
pub fn build(global: &GlobalOptions, options: &BuildOptions) -> Result<BuildOutcome, AppError> {
    build_at(std::env::current_dir()?, global, options)
}

/// Build the full setup script with paths resolved against `dir`.
pub fn build_at(
    dir: impl Into<PathBuf>,
    global: &GlobalOptions,
    options: &BuildOptions,
) -> Result<BuildOutcome, AppError> {
    let ctx = create_context(&dir.into(), global)?;
    build::execute(&ctx, options)
}

/// Where `build` would write for these options.
pub fn build_output_path(global: &GlobalOptions, options: &BuildOptions) -> Result<PathBuf, AppError> {
    let ctx = current_context(global)?;
    Ok(build::output_path(&ctx, options))
}

// =============================================================================
// Catalog API
// =============================================================================

/// List catalog options, optionally filtered.
pub fn list(global: &GlobalOptions, options: &ListOptions) -> Result<Vec<OptionListing>, AppError> {
    let ctx = current_context(global)?;
    list::execute(&ctx, options)
}

/// Describe a single catalog option.
pub fn show(global: &GlobalOptions, section: SectionKind, id: &str) -> Result<OptionDetail, AppError> {
    let ctx = current_context(global)?;
    show::execute(&ctx, section, id)
}

/// Validate the catalog document.
pub fn check(global: &GlobalOptions) -> Result<CheckOutcome, AppError> {
    let ctx = current_context(global)?;
    check::execute(&ctx)
}

// =============================================================================
// Selection API
// =============================================================================

/// List the bundled preset profiles.
pub fn profiles() -> Result<Vec<ProfileSummary>, AppError> {
    profiles::execute()
}

/// Write a starter selection file.
pub fn init(global: &GlobalOptions, options: &InitOptions) -> Result<PathBuf, AppError> {
    init_at(std::env::current_dir()?, global, options)
}

/// Write a starter selection file with paths resolved against `dir`.
pub fn init_at(
    dir: impl Into<PathBuf>,
    global: &GlobalOptions,
    options: &InitOptions,
) -> Result<PathBuf, AppError> {
    let ctx = create_context(&dir.into(), global)?;
    init::execute(&ctx, options)
}
