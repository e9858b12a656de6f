//! Script assembly engine: verbosity policy, section renderers, and binding.

pub mod assembler;
pub mod renderers;
pub mod slot;
pub mod verbosity;

pub use assembler::{
    DEFAULT_HOSTNAME, RenderedScript, RenderedSections, ScriptAssembler, ScriptKind,
    fallback_script, validate_hostname,
};
pub use renderers::{HOSTNAME_TOKEN, RenderContext, SectionRenderer, render_section};
pub use slot::ScriptSlot;
pub use verbosity::Verbosity;
