//! Catalog document read from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::error::CatalogLoadError;
use crate::ports::CatalogSource;

#[derive(Debug, Clone)]
pub struct FilesystemCatalogSource {
    path: PathBuf,
}

impl FilesystemCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FilesystemCatalogSource {
    fn read_document(&self) -> Result<String, CatalogLoadError> {
        fs::read_to_string(&self.path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => CatalogLoadError::Missing(self.describe()),
            _ => CatalogLoadError::Unreadable {
                source_name: self.describe(),
                details: err.to_string(),
            },
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
