//! Selection domain: user choices and preset profiles.

pub mod model;
pub mod profile;

pub use model::{AppChoice, CustomizationChoice, Selection};
pub use profile::Profile;
