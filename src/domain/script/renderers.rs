//! Section renderers.
//!
//! Each renderer turns the resolved selection into the shell text of one
//! script section. Problems with a single catalog entry become `# Warning:`
//! lines; a failure of the whole renderer becomes an `# Error:` comment at
//! [`render_section`], so one bad entry never blocks the rest of the script.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::domain::catalog::{Catalog, CatalogOption, OptionAction, SectionKind};
use crate::domain::error::RenderError;
use crate::domain::script::slot::ScriptSlot;
use crate::domain::script::verbosity::Verbosity;
use crate::domain::selection::Selection;

/// Placeholder replaced with the hostname.
pub const HOSTNAME_TOKEN: &str = "{hostname}";

/// Option whose commands carry the hostname placeholder.
pub const HOSTNAME_OPTION: &str = "set_hostname";

/// Option that needs a re-login before its group membership applies.
pub const CONTAINER_RUNTIME_OPTION: &str = "install_docker";

/// Inputs shared by every renderer.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub catalog: &'a Catalog,
    /// Already resolved; renderers never change it.
    pub selection: &'a Selection,
    pub verbosity: Verbosity,
    /// Hostname substituted into the hostname option.
    pub hostname: &'a str,
}

/// One script section renderer, bound to its slot at compile time.
pub trait SectionRenderer {
    const SLOT: ScriptSlot;

    fn render(ctx: &RenderContext<'_>) -> Result<String, RenderError>;
}

/// Run a renderer, turning a failure into an error comment.
pub fn render_section<R: SectionRenderer>(ctx: &RenderContext<'_>) -> String {
    R::render(ctx).unwrap_or_else(|err| {
        log::error!("Error building {} section: {}", R::SLOT.key(), err);
        format!("# Error: failed to build {} section: {}\n", R::SLOT.key(), err)
    })
}

pub struct SystemUpgradeRenderer;
pub struct SystemConfigRenderer;
pub struct AppInstallRenderer;
pub struct CustomizationRenderer;
pub struct CustomScriptRenderer;

impl SectionRenderer for SystemUpgradeRenderer {
    const SLOT: ScriptSlot = ScriptSlot::SystemUpgrade;

    fn render(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let mut out = String::new();
        if !ctx.selection.system_upgrade {
            return Ok(out);
        }

        writeln!(out, "{}", color_echo("blue", "Performing system upgrade... This may take a while..."))?;
        writeln!(out, "{}", ctx.verbosity.apply("dnf upgrade -y"))?;
        writeln!(out)?;
        Ok(out)
    }
}

impl SectionRenderer for SystemConfigRenderer {
    const SLOT: ScriptSlot = ScriptSlot::SystemConfig;

    fn render(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let mut out = String::new();

        for option in &ctx.catalog.system_config {
            if !ctx.selection.is_system_enabled(&option.id) {
                continue;
            }

            let statements = match &option.action {
                OptionAction::Command(statements) => statements,
                OptionAction::Methods(_) => {
                    write_warning(
                        &mut out,
                        &format!(
                            "{} defines installation types, which system configuration options do not support",
                            option.name
                        ),
                    )?;
                    continue;
                }
                OptionAction::Malformed(reason) => {
                    write_warning(
                        &mut out,
                        &format!("Invalid configuration for {}: {}", option.name, reason),
                    )?;
                    continue;
                }
            };

            writeln!(out, "# {}", option.description)?;
            for statement in statements {
                if option.id == HOSTNAME_OPTION {
                    let statement = statement.replace(HOSTNAME_TOKEN, ctx.hostname);
                    writeln!(out, "{}", ctx.verbosity.apply(&statement))?;
                } else {
                    writeln!(out, "{}", ctx.verbosity.apply(statement))?;
                }
            }
            writeln!(out, "{}", color_echo("green", &format!("{} configured.", option.name)))?;
            writeln!(out)?;
        }

        let unknown = ctx
            .selection
            .enabled_system_ids()
            .filter(|id| ctx.catalog.system_option(id).is_none());
        write_unknown(&mut out, SectionKind::SystemConfig, unknown)?;

        Ok(out)
    }
}

impl SectionRenderer for AppInstallRenderer {
    const SLOT: ScriptSlot = ScriptSlot::AppInstall;

    fn render(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let mut out = String::new();
        write_essential_apps(&mut out, ctx)?;
        write_additional_apps(&mut out, ctx)?;
        Ok(out)
    }
}

fn write_essential_apps(out: &mut String, ctx: &RenderContext<'_>) -> Result<(), RenderError> {
    let names: Vec<&str> = ctx
        .catalog
        .essential_apps
        .iter()
        .filter(|app| ctx.selection.is_essential_selected(&app.name))
        .map(|app| app.name.as_str())
        .collect();

    if !names.is_empty() {
        writeln!(out, "# Install essential applications")?;
        writeln!(out, "{}", color_echo("yellow", "Installing essential applications..."))?;
        let install = format!("dnf install -y {}", names.join(" "));
        writeln!(out, "{}", ctx.verbosity.apply(&install))?;
        writeln!(out, "{}", color_echo("green", "Essential applications installed successfully."))?;
        writeln!(out)?;
    }

    let unknown = ctx
        .selection
        .essential_apps
        .iter()
        .filter(|(name, on)| **on && ctx.catalog.essential_app(name).is_none())
        .map(|(name, _)| name.as_str());
    write_unknown(out, SectionKind::EssentialApps, unknown)
}

fn write_additional_apps(out: &mut String, ctx: &RenderContext<'_>) -> Result<(), RenderError> {
    for category in &ctx.catalog.additional_apps {
        let selected: Vec<(&CatalogOption, Option<&str>)> = category
            .apps
            .iter()
            .filter_map(|app| {
                let choice = ctx.selection.app_choice(&category.id, &app.id)?;
                choice.selected.then(|| (app, choice.method()))
            })
            .collect();

        if selected.is_empty() {
            continue;
        }

        writeln!(out, "# Install {} applications", category.name)?;
        for (app, method) in selected {
            let installed = write_installed_option(out, ctx, app, method)?;
            if installed && app.id == CONTAINER_RUNTIME_OPTION {
                writeln!(
                    out,
                    "# Note: Docker group changes will take effect after logging out and back in"
                )?;
            }
            writeln!(out)?;
        }
    }

    let mut unknown = Vec::new();
    for (category_id, apps) in &ctx.selection.additional_apps {
        let category = ctx.catalog.category(category_id);
        for (id, choice) in apps {
            if !choice.selected {
                continue;
            }
            match category {
                Some(category) if category.app(id).is_some() => {}
                Some(_) => unknown.push(id.clone()),
                None => unknown.push(format!("{}/{}", category_id, id)),
            }
        }
    }
    write_unknown(out, SectionKind::AdditionalApps, unknown.iter().map(String::as_str))
}

impl SectionRenderer for CustomizationRenderer {
    const SLOT: ScriptSlot = ScriptSlot::Customization;

    fn render(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let mut out = String::new();

        for option in &ctx.catalog.customization {
            let Some(choice) = ctx.selection.customization_choice(&option.id) else {
                continue;
            };
            if !choice.is_selected() {
                continue;
            }
            write_installed_option(&mut out, ctx, option, choice.method())?;
            writeln!(out)?;
        }

        let unknown = ctx
            .selection
            .customization
            .iter()
            .filter(|(id, choice)| {
                choice.is_selected() && ctx.catalog.customization_option(id).is_none()
            })
            .map(|(id, _)| id.as_str());
        write_unknown(&mut out, SectionKind::Customization, unknown)?;

        Ok(out)
    }
}

impl SectionRenderer for CustomScriptRenderer {
    const SLOT: ScriptSlot = ScriptSlot::CustomScript;

    fn render(ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let mut out = String::new();
        let script = ctx.selection.custom_script.trim();
        if script.is_empty() {
            return Ok(out);
        }

        writeln!(out, "# Custom user-defined commands")?;
        writeln!(out, "{}", script)?;
        writeln!(out)?;
        Ok(out)
    }
}

/// Statements chosen for an option, or the reason they cannot be.
struct Planned<'a> {
    method: Option<&'a str>,
    statements: &'a [String],
}

fn plan<'a>(option: &'a CatalogOption, method: Option<&str>) -> Result<Planned<'a>, String> {
    match &option.action {
        OptionAction::Command(statements) => {
            Ok(Planned { method: None, statements: statements.as_slice() })
        }
        OptionAction::Methods(_) => {
            let label =
                method.ok_or_else(|| format!("No installation type selected for {}", option.name))?;
            let chosen = option
                .method(label)
                .ok_or_else(|| format!("Installation type {} not found for {}", label, option.name))?;
            if chosen.commands.is_empty() {
                return Err(format!("No command found for {} ({})", option.name, label));
            }
            Ok(Planned { method: Some(chosen.label.as_str()), statements: chosen.commands.as_slice() })
        }
        OptionAction::Malformed(reason) => {
            Err(format!("No command found for {}: {}", option.name, reason))
        }
    }
}

/// Description, start notice, statements, and success notice for one option.
///
/// Returns `false` when the option could not be planned and only a warning
/// was written.
fn write_installed_option(
    out: &mut String,
    ctx: &RenderContext<'_>,
    option: &CatalogOption,
    method: Option<&str>,
) -> Result<bool, RenderError> {
    let planned = match plan(option, method) {
        Ok(planned) => planned,
        Err(warning) => {
            write_warning(out, &warning)?;
            return Ok(false);
        }
    };

    let label = match planned.method {
        Some(method) => format!("{} ({})", option.name, method),
        None => option.name.clone(),
    };

    match planned.method {
        Some(method) => writeln!(out, "# {} ({})", option.description, method)?,
        None => writeln!(out, "# {}", option.description)?,
    }
    writeln!(out, "{}", color_echo("yellow", &format!("Installing {}...", label)))?;
    for statement in planned.statements {
        writeln!(out, "{}", ctx.verbosity.apply(statement))?;
    }
    writeln!(out, "{}", color_echo("green", &format!("{} installed successfully.", label)))?;
    Ok(true)
}

fn write_warning(out: &mut String, message: &str) -> Result<(), RenderError> {
    log::warn!("{}", message);
    writeln!(out, "# Warning: {}", message)?;
    Ok(())
}

fn write_unknown<'a>(
    out: &mut String,
    section: SectionKind,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), RenderError> {
    let ids: BTreeSet<&str> = ids.collect();
    if ids.is_empty() {
        return Ok(());
    }
    for id in ids {
        write_warning(out, &format!("Unknown option '{}' in {} skipped", id, section))?;
    }
    writeln!(out)?;
    Ok(())
}

/// Call to the template's colored log helper.
pub fn color_echo(color: &str, message: &str) -> String {
    format!("color_echo \"{}\" \"{}\"", color, escape_double_quoted(message))
}

/// Escape text for use inside a double-quoted shell string.
pub fn escape_double_quoted(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
