//! Selection and template files on disk.

use std::fs;
use std::io;
use std::path::Path;

use crate::domain::{AppError, Selection};

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Read a selection from YAML, or JSON when the extension is `.json`.
pub fn read_selection(path: &Path) -> Result<Selection, AppError> {
    let content = fs::read_to_string(path)?;
    let invalid = |details: String| AppError::InvalidSelection {
        path: path.display().to_string(),
        details,
    };

    if is_json(path) {
        serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))
    } else {
        // An empty YAML document is a null, not an empty mapping.
        let content = if content.trim().is_empty() { "{}" } else { content.as_str() };
        serde_yaml::from_str(content).map_err(|e| invalid(e.to_string()))
    }
}

/// Write a selection in the format implied by the extension.
pub fn write_selection(path: &Path, selection: &Selection) -> Result<(), AppError> {
    let content = if is_json(path) {
        serde_json::to_string_pretty(selection)
            .map_err(|e| AppError::config_error(format!("Cannot serialize selection: {}", e)))?
    } else {
        serde_yaml::to_string(selection)
            .map_err(|e| AppError::config_error(format!("Cannot serialize selection: {}", e)))?
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Read a script template from disk.
pub fn read_template(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => AppError::TemplateMissing(path.display().to_string()),
        _ => AppError::Io(err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AppChoice;
    use tempfile::tempdir;

    #[test]
    fn reads_yaml_selection() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("selection.yml");
        fs::write(&path, "system_config:\n  enable_rpmfusion: true\nhostname: lab\n").unwrap();

        let selection = read_selection(&path).unwrap();

        assert!(selection.system_upgrade);
        assert!(selection.is_system_enabled("enable_rpmfusion"));
        assert_eq!(selection.hostname(), Some("lab"));
    }

    #[test]
    fn empty_yaml_file_is_default_file_selection() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("selection.yml");
        fs::write(&path, "").unwrap();

        let selection = read_selection(&path).unwrap();

        assert!(selection.system_upgrade);
        assert!(selection.system_config.is_empty());
    }

    #[test]
    fn invalid_selection_names_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("selection.json");
        fs::write(&path, "{ nope").unwrap();

        let err = read_selection(&path).unwrap_err();

        assert!(matches!(err, AppError::InvalidSelection { .. }));
        assert!(err.to_string().contains("selection.json"));
    }

    #[test]
    fn written_selection_reads_back() {
        let dir = tempdir().unwrap();
        let mut selection = Selection { system_upgrade: true, ..Selection::default() };
        selection.set_app("media_graphics", "install_vlc", AppChoice::with_method("Flatpak"));

        for name in ["nested/selection.yml", "selection.json"] {
            let path = dir.path().join(name);
            write_selection(&path, &selection).unwrap();
            assert_eq!(read_selection(&path).unwrap(), selection);
        }
    }

    #[test]
    fn missing_template_is_reported() {
        let dir = tempdir().unwrap();

        let err = read_template(&dir.path().join("template.sh")).unwrap_err();

        assert!(matches!(err, AppError::TemplateMissing(_)));
    }
}
