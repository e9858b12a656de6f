//! In-memory catalog source with a swappable document.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::error::CatalogLoadError;
use crate::ports::CatalogSource;

/// Catalog source backed by a string. Clones share the document and read count.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    document: Arc<Mutex<Option<String>>>,
    reads: Arc<AtomicUsize>,
}

impl StaticCatalogSource {
    pub fn new(document: &str) -> Self {
        Self { document: Arc::new(Mutex::new(Some(document.to_string()))), ..Self::default() }
    }

    /// Source whose document does not exist.
    pub fn missing() -> Self {
        Self::default()
    }

    /// Replace the document; `None` makes it missing.
    pub fn set_document(&self, document: Option<&str>) {
        *self.document.lock().unwrap() = document.map(str::to_string);
    }

    /// Number of times the document has been read.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl CatalogSource for StaticCatalogSource {
    fn read_document(&self) -> Result<String, CatalogLoadError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.document
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CatalogLoadError::Missing(self.describe()))
    }

    fn describe(&self) -> String {
        "memory://catalog.json".to_string()
    }
}
