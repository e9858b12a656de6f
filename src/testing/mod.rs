//! Shared test doubles and fixture data.

mod fixtures;
mod static_catalog_source;

pub use fixtures::{FIXTURE_CATALOG, MALFORMED_CATALOG, fixture_catalog, malformed_catalog};
pub use static_catalog_source::StaticCatalogSource;
