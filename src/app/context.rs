use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::CatalogLocation;
use crate::app::services::CachedCatalog;
use crate::domain::{AppError, Catalog, CatalogStore, NattdConfig, ScriptAssembler};
use crate::ports::CatalogSource;

/// Application context holding dependencies for command execution.
pub struct AppContext<S: CatalogSource> {
    config: NattdConfig,
    catalog: CachedCatalog<S>,
    work_dir: PathBuf,
}

impl AppContext<CatalogLocation> {
    /// Context reading the catalog named by `config`.
    pub fn from_config(config: NattdConfig, work_dir: impl Into<PathBuf>) -> Self {
        let work_dir = work_dir.into();
        let path = config.catalog.path.as_ref().map(|p| work_dir.join(p));
        let source = CatalogLocation::from_path(path.as_deref());
        Self::new(config, source, work_dir)
    }
}

impl<S: CatalogSource> AppContext<S> {
    pub fn new(config: NattdConfig, source: S, work_dir: impl Into<PathBuf>) -> Self {
        let store = CatalogStore::new(source).lenient(config.catalog.lenient);
        let ttl = Duration::from_secs(config.catalog.cache_ttl_secs);
        Self { catalog: CachedCatalog::new(store, ttl), config, work_dir: work_dir.into() }
    }

    pub fn config(&self) -> &NattdConfig {
        &self.config
    }

    /// Directory relative paths are resolved against.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.work_dir.join(path)
    }

    /// Catalog, failing when it cannot be loaded.
    pub fn catalog(&self) -> Result<Arc<Catalog>, AppError> {
        Ok(self.catalog.get()?)
    }

    /// Catalog for preview and build: malformed entries are kept for the
    /// renderers, and an unreadable document yields an empty catalog.
    pub fn render_catalog(&self) -> Arc<Catalog> {
        self.catalog.get_for_render()
    }

    pub fn catalog_store(&self) -> &CatalogStore<S> {
        self.catalog.store()
    }

    pub fn assembler<'a>(&self, catalog: &'a Catalog) -> ScriptAssembler<'a> {
        ScriptAssembler::new(catalog).with_default_hostname(self.config.script.default_hostname.clone())
    }
}
