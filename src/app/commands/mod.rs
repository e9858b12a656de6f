pub mod build;
pub mod check;
pub mod init;
pub mod list;
pub mod preview;
pub mod profiles;
pub mod selection_input;
pub mod show;

pub use selection_input::SelectionInput;
