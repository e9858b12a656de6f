//! Script assembly: resolve, render every section, and bind the result.

use std::fmt::Write;

use crate::domain::catalog::Catalog;
use crate::domain::dependency_resolver::DependencyResolver;
use crate::domain::error::RenderError;
use crate::domain::script::renderers::{
    AppInstallRenderer, CustomScriptRenderer, CustomizationRenderer, HOSTNAME_TOKEN,
    RenderContext, SystemConfigRenderer, SystemUpgradeRenderer, escape_double_quoted,
    render_section,
};
use crate::domain::script::slot::ScriptSlot;
use crate::domain::script::verbosity::Verbosity;
use crate::domain::selection::Selection;

/// Hostname used when the selection supplies none.
pub const DEFAULT_HOSTNAME: &str = "fedora-workstation";

const MAX_HOSTNAME_LEN: usize = 64;
const PREVIEW_HEADER: &str = "(...)  # Script header and initial setup\n\n";
const PREVIEW_FOOTER: &str = "(...)  # Script footer";

/// Which entry point produced a [`RenderedScript`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    Preview,
    Full,
}

/// Output of one render, recomputed on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedScript {
    pub kind: ScriptKind,
    pub text: String,
    /// Resolver notifications for the caller to display.
    pub notifications: Vec<String>,
}

/// Every section's text, in slot order, plus resolution output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSections {
    pub sections: Vec<(ScriptSlot, String)>,
    pub hostname: String,
    pub notifications: Vec<String>,
}

/// Stateless pipeline over an immutable catalog.
#[derive(Debug, Clone)]
pub struct ScriptAssembler<'a> {
    catalog: &'a Catalog,
    default_hostname: String,
}

impl<'a> ScriptAssembler<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog, default_hostname: DEFAULT_HOSTNAME.to_string() }
    }

    pub fn with_default_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.default_hostname = hostname.into();
        self
    }

    /// Resolve dependencies and run the five renderers in slot order.
    pub fn render_sections(
        &self,
        selection: &Selection,
        verbosity: Verbosity,
    ) -> Result<RenderedSections, RenderError> {
        let (hostname, hostname_warning) = self.hostname_for(selection);

        let resolution = DependencyResolver::resolve(selection, self.catalog);
        let ctx = RenderContext {
            catalog: self.catalog,
            selection: &resolution.selection,
            verbosity,
            hostname,
        };

        let mut system_config = render_section::<SystemConfigRenderer>(&ctx);
        if let Some(warning) = hostname_warning {
            system_config.insert_str(0, &warning);
        }

        let sections = vec![
            (ScriptSlot::SystemUpgrade, render_section::<SystemUpgradeRenderer>(&ctx)),
            (ScriptSlot::SystemConfig, system_config),
            (ScriptSlot::AppInstall, render_section::<AppInstallRenderer>(&ctx)),
            (ScriptSlot::Customization, render_section::<CustomizationRenderer>(&ctx)),
            (ScriptSlot::CustomScript, render_section::<CustomScriptRenderer>(&ctx)),
        ];

        Ok(RenderedSections {
            sections,
            hostname: hostname.to_string(),
            notifications: resolution.notifications,
        })
    }

    /// Hostname to render with. An invalid one is replaced by the default and
    /// reported as a warning block for the system-config section.
    fn hostname_for<'s>(&'s self, selection: &'s Selection) -> (&'s str, Option<String>) {
        let Some(hostname) = selection.hostname() else {
            return (self.default_hostname.as_str(), None);
        };
        match validate_hostname(hostname) {
            Ok(()) => (hostname, None),
            Err(err) => {
                log::warn!("{}; using '{}'", err, self.default_hostname);
                let warning = format!(
                    "# Warning: Invalid hostname '{}' ignored, using '{}'\n\n",
                    hostname, self.default_hostname
                );
                (self.default_hostname.as_str(), Some(warning))
            }
        }
    }

    /// Annotated preview. Never fails; errors become a comment.
    pub fn preview(&self, selection: &Selection, verbosity: Verbosity) -> RenderedScript {
        self.try_preview(selection, verbosity).unwrap_or_else(|err| {
            log::error!("Error building script preview: {}", err);
            RenderedScript {
                kind: ScriptKind::Preview,
                text: format!(
                    "# Error building script preview: {}\n# Please check the logs for more information.",
                    err
                ),
                notifications: Vec::new(),
            }
        })
    }

    pub fn try_preview(
        &self,
        selection: &Selection,
        verbosity: Verbosity,
    ) -> Result<RenderedScript, RenderError> {
        let rendered = self.render_sections(selection, verbosity)?;

        let mut text = String::from(PREVIEW_HEADER);
        for (slot, content) in &rendered.sections {
            if content.trim().is_empty() {
                continue;
            }
            writeln!(text, "# {}", slot.title())?;
            text.push_str(content);
            text.push('\n');
        }
        text.push_str(PREVIEW_FOOTER);

        if selection.hostname().is_some() {
            text = text.replace(HOSTNAME_TOKEN, &rendered.hostname);
        }

        Ok(RenderedScript { kind: ScriptKind::Preview, text, notifications: rendered.notifications })
    }

    /// Full script bound into `template`. Never fails; errors become a
    /// self-explaining fallback script.
    pub fn full(&self, template: &str, selection: &Selection, verbosity: Verbosity) -> RenderedScript {
        self.try_full(template, selection, verbosity).unwrap_or_else(|err| {
            log::error!("Error building script: {}", err);
            RenderedScript {
                kind: ScriptKind::Full,
                text: fallback_script(&err.to_string()),
                notifications: Vec::new(),
            }
        })
    }

    pub fn try_full(
        &self,
        template: &str,
        selection: &Selection,
        verbosity: Verbosity,
    ) -> Result<RenderedScript, RenderError> {
        let rendered = self.render_sections(selection, verbosity)?;
        let text = fill_slots(template, &rendered.sections).replace(HOSTNAME_TOKEN, &rendered.hostname);
        Ok(RenderedScript { kind: ScriptKind::Full, text, notifications: rendered.notifications })
    }
}

/// Replace each slot token in one pass, so rendered text is never rescanned.
fn fill_slots(template: &str, sections: &[(ScriptSlot, String)]) -> String {
    let extra: usize = sections.iter().map(|(_, content)| content.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let matched = sections.iter().find_map(|(slot, content)| {
            let token = slot.token();
            tail.starts_with(&token).then(|| (token.len(), content))
        });
        match matched {
            Some((len, content)) => {
                out.push_str(content);
                rest = &tail[len..];
            }
            None => {
                out.push_str("{{");
                rest = &tail[2..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Minimal script that reports why the real one could not be built.
pub fn fallback_script(message: &str) -> String {
    format!(
        "#!/bin/bash\n\necho \"Error building script: {}\"\necho \"Please check the logs for more information.\"\n",
        escape_double_quoted(message)
    )
}

/// Accept only static-hostname characters: letters, digits, '-' and '.'.
pub fn validate_hostname(hostname: &str) -> Result<(), RenderError> {
    let valid = !hostname.is_empty()
        && hostname.len() <= MAX_HOSTNAME_LEN
        && hostname.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
        && !hostname.starts_with(['-', '.'])
        && !hostname.ends_with(['-', '.']);

    if valid { Ok(()) } else { Err(RenderError::InvalidHostname(hostname.to_string())) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::selection::AppChoice;
    use crate::testing::{fixture_catalog, malformed_catalog};

    const TEMPLATE: &str = "#!/bin/bash\n\
        # host: {hostname}\n\
        {{system_upgrade}}{{system_config}}{{app_install}}{{customization}}{{custom_script}}\
        echo \"done on {hostname}\"\n";

    #[test]
    fn empty_selection_preview_is_only_placeholders() {
        let catalog = fixture_catalog();

        let preview = ScriptAssembler::new(&catalog).preview(&Selection::default(), Verbosity::Quiet);

        assert_eq!(preview.text, "(...)  # Script header and initial setup\n\n(...)  # Script footer");
        assert!(preview.notifications.is_empty());
    }

    #[test]
    fn preview_titles_non_empty_sections() {
        let catalog = fixture_catalog();
        let mut selection = Selection { system_upgrade: true, ..Selection::default() };
        selection.essential_apps.insert("git".into(), true);

        let preview = ScriptAssembler::new(&catalog).preview(&selection, Verbosity::Verbose);

        assert!(preview.text.contains("# System Upgrade\ncolor_echo"));
        assert!(preview.text.contains("# App Install\n# Install essential applications"));
        assert!(!preview.text.contains("# Customization\n"));
        assert!(preview.text.ends_with("(...)  # Script footer"));
    }

    #[test]
    fn preview_reports_notifications() {
        let catalog = fixture_catalog();
        let mut selection = Selection::default();
        selection.set_app("media_graphics", "install_vlc", AppChoice::with_method("DNF"));

        let preview = ScriptAssembler::new(&catalog).preview(&selection, Verbosity::Verbose);

        assert_eq!(preview.notifications.len(), 1);
        assert!(preview.text.contains("# Enable RPM Fusion repositories"));
    }

    #[test]
    fn full_fills_every_slot_and_hostname() {
        let catalog = fixture_catalog();
        let mut selection = Selection { hostname: Some("myhost".into()), ..Selection::default() };
        selection.set_system("set_hostname", true);

        let script = ScriptAssembler::new(&catalog).full(TEMPLATE, &selection, Verbosity::Verbose);

        assert!(script.text.contains("hostnamectl set-hostname myhost"));
        assert!(script.text.contains("# host: myhost"));
        assert!(script.text.contains("echo \"done on myhost\""));
        assert!(!script.text.contains(HOSTNAME_TOKEN));
        for slot in ScriptSlot::ALL {
            assert!(!script.text.contains(&slot.token()));
        }
    }

    #[test]
    fn full_falls_back_to_default_hostname() {
        let catalog = fixture_catalog();
        let mut selection = Selection::default();
        selection.set_system("set_hostname", true);

        let script = ScriptAssembler::new(&catalog)
            .with_default_hostname("lab-box")
            .full(TEMPLATE, &selection, Verbosity::Verbose);

        assert!(script.text.contains("hostnamectl set-hostname lab-box"));
    }

    #[test]
    fn slot_tokens_inside_custom_script_are_left_alone() {
        let catalog = fixture_catalog();
        let selection = Selection { custom_script: "echo '{{app_install}}'".into(), ..Selection::default() };

        let script = ScriptAssembler::new(&catalog).full(TEMPLATE, &selection, Verbosity::Verbose);

        assert!(script.text.contains("echo '{{app_install}}'"));
    }

    #[test]
    fn invalid_hostname_falls_back_to_default_with_warning() {
        let catalog = fixture_catalog();
        let mut selection = Selection { hostname: Some("bad;rm -rf /".into()), ..Selection::default() };
        selection.set_system("set_hostname", true);

        let script = ScriptAssembler::new(&catalog).full(TEMPLATE, &selection, Verbosity::Verbose);

        assert!(script.text.starts_with("#!/bin/bash\n# host: fedora-workstation\n"));
        assert!(script.text.contains("# Warning: Invalid hostname 'bad;rm -rf /' ignored, using 'fedora-workstation'"));
        assert!(script.text.contains("hostnamectl set-hostname fedora-workstation"));
        assert!(!script.text.contains("Error building script"));
        assert!(!script.text.contains("hostnamectl set-hostname bad"));
    }

    #[test]
    fn unused_invalid_hostname_keeps_script() {
        let catalog = fixture_catalog();
        let mut selection = Selection { hostname: Some("my_laptop".into()), ..Selection::default() };
        selection.essential_apps.insert("git".into(), true);

        let script = ScriptAssembler::new(&catalog).full(TEMPLATE, &selection, Verbosity::Verbose);

        assert!(script.text.contains("dnf install -y git"));
        assert!(script.text.contains("# Warning: Invalid hostname 'my_laptop' ignored"));
        assert!(!script.text.contains("Error building script"));
    }

    #[test]
    fn invalid_hostname_preview_keeps_sections() {
        let catalog = fixture_catalog();
        let mut selection = Selection { hostname: Some("-bad".into()), ..Selection::default() };
        selection.essential_apps.insert("git".into(), true);

        let preview = ScriptAssembler::new(&catalog).preview(&selection, Verbosity::Verbose);

        assert!(preview.text.starts_with("(...)  # Script header and initial setup"));
        assert!(preview.text.contains("# System Config\n# Warning: Invalid hostname '-bad' ignored"));
        assert!(preview.text.contains("dnf install -y git"));
        assert!(!preview.text.contains("# Error building script preview"));
    }

    #[test]
    fn malformed_entry_keeps_other_sections() {
        let catalog = malformed_catalog();
        let mut selection = Selection::default();
        selection.set_system("broken_tweak", true);
        selection.essential_apps.insert("git".into(), true);

        let assembler = ScriptAssembler::new(&catalog);
        let preview = assembler.preview(&selection, Verbosity::Verbose);
        let full = assembler.full(TEMPLATE, &selection, Verbosity::Verbose);

        for text in [&preview.text, &full.text] {
            assert!(text.contains("# Warning: Invalid configuration for Broken Tweak"));
            assert!(text.contains("dnf install -y git"));
        }
    }

    #[test]
    fn fallback_script_escapes_message() {
        let script = fallback_script("bad \"quote\" $(id)");

        assert!(script.contains(r#"echo "Error building script: bad \"quote\" \$(id)""#));
    }

    #[test]
    fn hostname_validation() {
        for good in ["myhost", "fedora-workstation", "lab.example.org", "h1"] {
            assert!(validate_hostname(good).is_ok(), "{good}");
        }
        let long = "a".repeat(65);
        for bad in ["", "-lead", "trail.", "has space", "semi;colon", long.as_str()] {
            assert!(validate_hostname(bad).is_err(), "{bad}");
        }
    }
}
