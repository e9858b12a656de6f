//! Build command: render the full script and write it to disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::adapters::{embedded_template, read_template};
use crate::app::AppContext;
use crate::app::commands::selection_input::{SelectionInput, load_selection};
use crate::domain::{AppError, Verbosity};
use crate::ports::CatalogSource;

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub selection: SelectionInput,
    pub mode: Option<Verbosity>,
    /// Overrides the configured template.
    pub template: Option<PathBuf>,
    /// Overrides the configured output path.
    pub output: Option<PathBuf>,
    /// Overwrite an existing output file.
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    pub path: PathBuf,
    pub notifications: Vec<String>,
}

/// Output path for `options`, resolved against the working directory.
pub fn output_path<S: CatalogSource>(ctx: &AppContext<S>, options: &BuildOptions) -> PathBuf {
    ctx.resolve(options.output.as_deref().unwrap_or(ctx.config().script.output.as_path()))
}

/// Render the script and write it as an executable file.
///
/// Rendering problems end up inside the written script, so only I/O and
/// input errors fail the command.
pub fn execute<S: CatalogSource>(
    ctx: &AppContext<S>,
    options: &BuildOptions,
) -> Result<BuildOutcome, AppError> {
    let output = output_path(ctx, options);
    if output.exists() && !options.force {
        return Err(AppError::OutputExists(output.display().to_string()));
    }

    let template = load_template(ctx, options.template.as_deref())?;
    let selection = load_selection(ctx, &options.selection)?;
    let mode = options.mode.unwrap_or(ctx.config().script.mode);

    let catalog = ctx.render_catalog();
    let rendered = ctx.assembler(&catalog).full(&template, &selection, mode);
    let script = stamp(&rendered.text, Local::now());

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output, script)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&output)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&output, perms)?;
    }

    log::info!("Wrote {}", output.display());
    Ok(BuildOutcome { path: output, notifications: rendered.notifications })
}

fn load_template<S: CatalogSource>(
    ctx: &AppContext<S>,
    path: Option<&Path>,
) -> Result<String, AppError> {
    match path.or(ctx.config().script.template.as_deref()) {
        Some(path) => read_template(&ctx.resolve(path)),
        None => Ok(embedded_template()?.to_string()),
    }
}

/// Add a "Generated by" line right after the shebang.
pub fn stamp(script: &str, at: DateTime<Local>) -> String {
    let line = format!(
        "# Generated by nattd {} on {}",
        env!("CARGO_PKG_VERSION"),
        at.format("%Y-%m-%d %H:%M:%S")
    );
    match script.split_once('\n') {
        Some((shebang, rest)) if shebang.starts_with("#!") => {
            format!("{}\n{}\n{}", shebang, line, rest)
        }
        _ => format!("{}\n{}", line, script),
    }
}
