use std::fmt;
use std::io;

use thiserror::Error;

use crate::domain::catalog::SectionKind;

/// Library-wide error type for nattd operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Catalog document could not be loaded.
    #[error(transparent)]
    CatalogLoad(#[from] CatalogLoadError),

    /// Catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Selection file could not be parsed.
    #[error("Invalid selection file '{path}': {details}")]
    InvalidSelection { path: String, details: String },

    /// Requested profile does not exist.
    #[error("Profile '{name}' not found. Available: {available}")]
    ProfileNotFound { name: String, available: String },

    /// Output file exists and overwriting was not requested.
    #[error("Output file '{0}' already exists. Use --force to overwrite.")]
    OutputExists(String),

    /// Script template file does not exist.
    #[error("Script template not found: {0}")]
    TemplateMissing(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers mapping errors to exit codes.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::CatalogLoad(CatalogLoadError::Missing(_))
            | AppError::ProfileNotFound { .. }
            | AppError::TemplateMissing(_)
            | AppError::Catalog(CatalogError::UnknownOption { .. }) => io::ErrorKind::NotFound,
            AppError::OutputExists(_) => io::ErrorKind::AlreadyExists,
            AppError::Configuration(_)
            | AppError::CatalogLoad(_)
            | AppError::Catalog(_)
            | AppError::InvalidSelection { .. }
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
        }
    }
}

/// Failure to produce a catalog from its backing document.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("Catalog document not found: {0}")]
    Missing(String),

    #[error("Failed to read catalog '{source_name}': {details}")]
    Unreadable { source_name: String, details: String },

    #[error("Malformed catalog document: {0}")]
    Malformed(String),

    #[error("Catalog has {} invalid option(s): {}", .0.len(), join_issues(.0))]
    InvalidOptions(Vec<MalformedOptionError>),
}

fn join_issues(issues: &[MalformedOptionError]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// One catalog entry that breaks the command/installation-types invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {reason}")]
pub struct MalformedOptionError {
    /// `section/category/id[/method]` path of the entry.
    pub location: String,
    pub reason: String,
}

impl MalformedOptionError {
    pub fn new(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { location: location.into(), reason: reason.into() }
    }
}

/// Catalog lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error(
        "Unknown section '{0}': must be one of system_config, essential_apps, additional_apps, customization"
    )]
    UnknownSection(String),

    #[error("Option '{id}' not found in section '{section}'")]
    UnknownOption { section: SectionKind, id: String },
}

/// Failure while rendering script text.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write script text")]
    Format(#[from] fmt::Error),

    #[error(
        "Invalid hostname '{0}': use letters, digits, '-' and '.', at most 64 characters, not starting or ending with '-' or '.'"
    )]
    InvalidHostname(String),
}
