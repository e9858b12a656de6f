pub mod catalog_location;
pub mod embedded_assets;
pub mod filesystem_catalog_source;
pub mod selection_file;

pub use catalog_location::CatalogLocation;
pub use embedded_assets::{EmbeddedCatalogSource, EmbeddedProfiles, embedded_template};
pub use filesystem_catalog_source::FilesystemCatalogSource;
pub use selection_file::{read_selection, read_template, write_selection};
