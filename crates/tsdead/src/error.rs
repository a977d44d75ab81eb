use std::path::PathBuf;

use thiserror::Error;

use crate::declaration::DeclarationKind;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalyzeError>;

/// Error variants for declaration collection and unused-export analysis.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Failed to read or access a source file.
    #[error("failed to read source '{path}': {error}")]
    Io {
        /// Path to the source file that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// Parsing the source file with OXC failed.
    #[error("failed to parse source '{path}': {message}")]
    Parse {
        /// Path (or virtual id) of the source file.
        path: PathBuf,
        /// Aggregated parser error message.
        message: String,
    },

    /// A declaration could not be mapped onto one of the supported kinds.
    #[error("unrecognized declaration in '{path}': {error}")]
    Classify {
        path: PathBuf,
        #[source]
        error: ClassifyError,
    },

    /// A module does not export each of its declarations exactly once.
    #[error("export coverage check failed for '{path}': {error}")]
    Coverage {
        path: PathBuf,
        #[source]
        error: CoverageError,
    },
}

impl AnalyzeError {
    /// Helper to create a parse error from multiple diagnostic strings.
    pub fn parse_error(path: impl Into<PathBuf>, diagnostics: &[String]) -> Self {
        let message = diagnostics.join("; ");
        Self::Parse {
            path: path.into(),
            message,
        }
    }
}

/// Raised when a top-level declaration is none of the seven supported kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("`{construct}` at {line}:{column} is not a class, function, variable, interface, type alias or enum")]
    Unrecognized {
        /// Short description of the offending construct, e.g. `namespace Foo`.
        construct: String,
        line: u32,
        column: u32,
    },
}

/// Violations of the "every declaration is exported exactly once" property.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoverageError {
    #[error("{kind} `{name}` is declared but never exported")]
    Unexported { kind: DeclarationKind, name: String },

    #[error("{kind} `{name}` is exported {count} times")]
    ExportedMoreThanOnce {
        kind: DeclarationKind,
        name: String,
        count: usize,
    },
}
