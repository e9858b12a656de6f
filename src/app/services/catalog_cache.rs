//! Time-bounded catalog cache shared across renders.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::domain::error::{CatalogLoadError, MalformedOptionError};
use crate::domain::{Catalog, CatalogStore};
use crate::ports::CatalogSource;

struct CacheEntry {
    catalog: Arc<Catalog>,
    issues: Vec<MalformedOptionError>,
    loaded_at: Instant,
}

/// Transparent cache over a [`CatalogStore`].
///
/// The parsed document is cached together with its entry-level issues, so
/// strict and rendering callers share one read. Only successful parses are
/// kept, so a failed load is retried on the next call. A zero TTL disables
/// caching.
pub struct CachedCatalog<S: CatalogSource> {
    store: CatalogStore<S>,
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl<S: CatalogSource> CachedCatalog<S> {
    pub fn new(store: CatalogStore<S>, ttl: Duration) -> Self {
        Self { store, ttl, entry: Mutex::new(None) }
    }

    pub fn store(&self) -> &CatalogStore<S> {
        &self.store
    }

    /// Cached catalog under the store's strictness policy.
    pub fn get(&self) -> Result<Arc<Catalog>, CatalogLoadError> {
        let (catalog, issues) = self.parsed()?;
        self.store.accept(&issues)?;
        Ok(catalog)
    }

    /// Cached catalog for rendering.
    ///
    /// Malformed entries are kept regardless of strictness; an empty catalog
    /// stands in only when the document cannot be read or parsed.
    pub fn get_for_render(&self) -> Arc<Catalog> {
        match self.parsed() {
            Ok((catalog, issues)) => {
                for issue in &issues {
                    log::warn!("Rendering malformed catalog entry {} as a warning", issue);
                }
                catalog
            }
            Err(err) => {
                log::error!(
                    "Error loading catalog from {}: {}",
                    self.store.source().describe(),
                    err
                );
                Arc::new(Catalog::default())
            }
        }
    }

    fn parsed(&self) -> Result<(Arc<Catalog>, Vec<MalformedOptionError>), CatalogLoadError> {
        if self.ttl.is_zero() {
            let parsed = self.store.parse()?;
            return Ok((Arc::new(parsed.catalog), parsed.issues));
        }

        let mut entry = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = entry.as_ref() {
            if cached.loaded_at.elapsed() < self.ttl {
                log::debug!("Catalog cache hit for {}", self.store.source().describe());
                return Ok((Arc::clone(&cached.catalog), cached.issues.clone()));
            }
            log::debug!("Catalog cache expired for {}", self.store.source().describe());
        }

        let parsed = self.store.parse()?;
        let catalog = Arc::new(parsed.catalog);
        *entry = Some(CacheEntry {
            catalog: Arc::clone(&catalog),
            issues: parsed.issues.clone(),
            loaded_at: Instant::now(),
        });
        Ok((catalog, parsed.issues))
    }

    /// Drop the cached catalog.
    pub fn invalidate(&self) {
        *self.entry.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::testing::{FIXTURE_CATALOG, MALFORMED_CATALOG, StaticCatalogSource};

    fn cached(source: &StaticCatalogSource, ttl: Duration) -> CachedCatalog<StaticCatalogSource> {
        CachedCatalog::new(CatalogStore::new(source.clone()), ttl)
    }

    #[test]
    fn repeated_gets_read_once() {
        let source = StaticCatalogSource::new(FIXTURE_CATALOG);
        let cache = cached(&source, Duration::from_secs(3600));

        let first = cache.get().unwrap();
        let second = cache.get().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.reads(), 1);
    }

    #[test]
    fn cached_catalog_equals_fresh_load() {
        let source = StaticCatalogSource::new(FIXTURE_CATALOG);
        let cache = cached(&source, Duration::from_secs(3600));

        let _ = cache.get().unwrap();

        assert_eq!(*cache.get().unwrap(), CatalogStore::new(source.clone()).load().unwrap());
    }

    #[test]
    fn zero_ttl_disables_caching() {
        let source = StaticCatalogSource::new(FIXTURE_CATALOG);
        let cache = cached(&source, Duration::ZERO);

        cache.get().unwrap();
        cache.get().unwrap();

        assert_eq!(source.reads(), 2);
    }

    #[test]
    fn expired_entry_is_reloaded() {
        let source = StaticCatalogSource::new(FIXTURE_CATALOG);
        let cache = cached(&source, Duration::from_millis(1));

        cache.get().unwrap();
        thread::sleep(Duration::from_millis(10));
        cache.get().unwrap();

        assert_eq!(source.reads(), 2);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let source = StaticCatalogSource::missing();
        let cache = cached(&source, Duration::from_secs(3600));

        assert!(cache.get().is_err());
        source.set_document(Some(FIXTURE_CATALOG));

        assert!(!cache.get().unwrap().is_empty());
    }

    #[test]
    fn render_catalog_degrades_when_document_is_missing() {
        let cache = cached(&StaticCatalogSource::missing(), Duration::from_secs(3600));

        assert!(cache.get_for_render().is_empty());
    }

    #[test]
    fn render_catalog_degrades_when_document_is_unparseable() {
        let cache = cached(&StaticCatalogSource::new("[1, 2"), Duration::from_secs(3600));

        assert!(cache.get_for_render().is_empty());
    }

    #[test]
    fn render_catalog_keeps_malformed_entries_when_strict() {
        let source = StaticCatalogSource::new(MALFORMED_CATALOG);
        let cache = cached(&source, Duration::from_secs(3600));

        assert!(matches!(cache.get(), Err(CatalogLoadError::InvalidOptions(issues)) if issues.len() == 2));
        let catalog = cache.get_for_render();

        assert!(catalog.system_option("configure_dnf").is_some());
        assert!(catalog.system_option("broken_tweak").is_some());
        assert_eq!(source.reads(), 1);
    }

    #[test]
    fn lenient_store_accepts_cached_issues() {
        let source = StaticCatalogSource::new(MALFORMED_CATALOG);
        let cache =
            CachedCatalog::new(CatalogStore::new(source.clone()).lenient(true), Duration::ZERO);

        assert_eq!(cache.get().unwrap().option_count(), 4);
    }

    #[test]
    fn invalidate_forces_reload() {
        let source = StaticCatalogSource::new(FIXTURE_CATALOG);
        let cache = cached(&source, Duration::from_secs(3600));

        cache.get().unwrap();
        cache.invalidate();
        cache.get().unwrap();

        assert_eq!(source.reads(), 2);
    }

    #[test]
    fn concurrent_gets_share_one_load() {
        let source = StaticCatalogSource::new(FIXTURE_CATALOG);
        let cache = cached(&source, Duration::from_secs(3600));

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| cache.get().unwrap());
            }
        });

        assert_eq!(source.reads(), 1);
    }
}
