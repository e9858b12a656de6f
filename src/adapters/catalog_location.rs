//! Catalog source chosen by configuration.

use std::path::Path;

use crate::adapters::embedded_assets::EmbeddedCatalogSource;
use crate::adapters::filesystem_catalog_source::FilesystemCatalogSource;
use crate::domain::error::CatalogLoadError;
use crate::ports::CatalogSource;

#[derive(Debug, Clone)]
pub enum CatalogLocation {
    Embedded(EmbeddedCatalogSource),
    File(FilesystemCatalogSource),
}

impl CatalogLocation {
    /// The file at `path`, or the embedded catalog when none is given.
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => CatalogLocation::File(FilesystemCatalogSource::new(path)),
            None => CatalogLocation::Embedded(EmbeddedCatalogSource),
        }
    }
}

impl CatalogSource for CatalogLocation {
    fn read_document(&self) -> Result<String, CatalogLoadError> {
        match self {
            CatalogLocation::Embedded(source) => source.read_document(),
            CatalogLocation::File(source) => source.read_document(),
        }
    }

    fn describe(&self) -> String {
        match self {
            CatalogLocation::Embedded(source) => source.describe(),
            CatalogLocation::File(source) => source.describe(),
        }
    }
}
