//! Preview command: annotated script body without header or footer.

use crate::app::AppContext;
use crate::app::commands::selection_input::{SelectionInput, load_selection};
use crate::domain::{AppError, RenderedScript, Verbosity};
use crate::ports::CatalogSource;

#[derive(Debug, Clone, Default)]
pub struct PreviewOptions {
    pub selection: SelectionInput,
    /// Overrides the configured mode.
    pub mode: Option<Verbosity>,
}

/// Render the preview.
///
/// Malformed catalog entries render as warnings; a catalog that cannot be
/// read or parsed renders as empty.
pub fn execute<S: CatalogSource>(
    ctx: &AppContext<S>,
    options: &PreviewOptions,
) -> Result<RenderedScript, AppError> {
    let selection = load_selection(ctx, &options.selection)?;
    let mode = options.mode.unwrap_or(ctx.config().script.mode);
    let catalog = ctx.render_catalog();
    Ok(ctx.assembler(&catalog).preview(&selection, mode))
}
