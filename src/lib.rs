//! nattd: assemble Fedora Workstation post-install setup scripts from a
//! declarative option catalog.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    BuildOptions, BuildOutcome, CheckOutcome, GlobalOptions, InitOptions, ListOptions,
    OptionListing, PreviewOptions, ProfileSummary, SelectionInput, build, build_at, check, init,
    init_at, list, preview, preview_at, profiles, show,
};
pub use domain::{
    AppError, Catalog, RenderedScript, ScriptAssembler, SectionKind, Selection, Verbosity,
};
