//! Miette diagnostic conversion for CLI errors.

use miette::Report;
use tsdead::AnalyzeError;

use crate::error::CliError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Analyze(e) => analyze_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert AnalyzeError to miette Report
pub fn analyze_error_to_miette(err: AnalyzeError) -> Report {
    match err {
        AnalyzeError::Parse { path, message } => miette::miette!(
            help = "Fix the syntax error or exclude the file with `ignore` in tsdead.toml",
            "Failed to parse {}: {}",
            path.display(),
            message
        ),
        AnalyzeError::Classify { path, error } => miette::miette!(
            help = "Run without --strict to skip declarations tsdead does not classify",
            "Unrecognized declaration in {}: {}",
            path.display(),
            error
        ),
        AnalyzeError::Coverage { path, error } => miette::miette!(
            help = "Every top-level declaration must appear in exactly one export",
            "Export coverage failed for {}: {}",
            path.display(),
            error
        ),
        other => miette::miette!("{}", other),
    }
}
