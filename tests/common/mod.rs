//! Shared testing utilities for nattd CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Catalog with one entry missing its command, for lenient-loading scenarios.
#[allow(dead_code)]
pub const BROKEN_CATALOG: &str = r#"{
    "system_config": {
        "broken_tweak": {"name": "Broken Tweak", "description": "Tweak with no command"},
        "configure_dnf": {
            "name": "DNF",
            "description": "Configure DNF for faster downloads",
            "command": "dnf -y install dnf-plugins-core"
        }
    },
    "essential_apps": {"apps": [{"name": "git", "description": "Version control"}]}
}"#;

/// Testing harness providing an isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir }
    }

    /// Path to the directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `nattd` binary within the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("nattd").expect("Failed to locate nattd binary");
        cmd.current_dir(self.work_dir());
        cmd
    }

    /// Write `content` to `name` inside the work directory.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Read a file from the work directory.
    pub fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.work_dir.join(name))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", name, e))
    }

    /// Whether `name` exists inside the work directory.
    pub fn exists(&self, name: &str) -> bool {
        self.work_dir.join(name).exists()
    }
}
