//! Catalog source port definition.

use crate::domain::error::CatalogLoadError;

/// Trait for reading the raw catalog document.
pub trait CatalogSource {
    /// Read the whole document as text.
    fn read_document(&self) -> Result<String, CatalogLoadError>;

    /// Human-readable origin, used in logs and messages.
    fn describe(&self) -> String;
}
