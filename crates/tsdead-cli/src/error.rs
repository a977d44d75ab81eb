//! Error handling for the tsdead CLI.
//!
//! - **Top-level errors** (`CliError`) represent broad categories of failures
//! - **Domain-specific errors** (`ConfigError`, [`AnalyzeError`]) carry detail
//! - **Error conversion** is automatic via `#[from]` attributes

mod diagnostic;

use std::path::PathBuf;

use thiserror::Error;
use tsdead::AnalyzeError;

pub use diagnostic::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid values, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Collection or analysis of a source file failed
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    /// A path given on the command line does not exist
    #[error("Path not found: {}\n\nHint: Paths are resolved against the current directory", .0.display())]
    PathNotFound(PathBuf),

    /// Walking a source directory failed
    #[error("Failed to walk source directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file given with `--config` doesn't exist
    #[error("Config file not found: {}\n\nHint: Create a tsdead.toml file or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// Config sources could not be merged into a valid configuration
    #[error("Invalid configuration: {message}\n\nHint: Check tsdead.toml/tsdead.json and TSDEAD_* variables")]
    Invalid {
        /// Message from the config extractor
        message: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
