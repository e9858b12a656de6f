//! Catalog domain: option model, document parsing, lookup, and loading.

pub mod model;
pub mod parse;
pub mod search;
pub mod store;

pub use model::{
    AppCategory, Catalog, CatalogOption, EssentialApp, InstallMethod, OptionAction,
    OptionSummary, SectionKind,
};
pub use parse::{ParsedCatalog, parse_catalog};
pub use search::SearchQuery;
pub use store::{CatalogStore, CheckReport};
