pub mod catalog;
pub mod config;
pub mod dependency_resolver;
pub mod error;
pub mod script;
pub mod selection;

pub use catalog::{Catalog, CatalogOption, CatalogStore, OptionAction, SectionKind};
pub use config::NattdConfig;
pub use dependency_resolver::{DependencyResolver, Resolution};
pub use error::{AppError, CatalogError, CatalogLoadError, MalformedOptionError, RenderError};
pub use script::{RenderedScript, ScriptAssembler, Verbosity};
pub use selection::{AppChoice, CustomizationChoice, Profile, Selection};
