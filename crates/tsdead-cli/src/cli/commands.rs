use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available tsdead subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report exports that no analyzed module imports
    ///
    /// Walks the given paths (default: the configured root), analyzes every
    /// matching source file and exits with status 1 when unused exports exist.
    Check(CheckArgs),

    /// Show the declarations and export bindings of a single file
    Exports(ExportsArgs),
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to analyze
    ///
    /// Examples:
    ///   tsdead check
    ///   tsdead check src packages/shared/src
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Module whose exports are public API (repeatable)
    ///
    /// Paths are relative to the configured root.
    #[arg(short, long = "entry", value_name = "MODULE")]
    pub entry: Vec<String>,

    /// Do not report unused default exports
    #[arg(long)]
    pub no_default_exports: bool,

    /// Fail on namespaces and `import x = require()` declarations
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the exports command
#[derive(Args, Debug)]
pub struct ExportsArgs {
    /// Source file to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the module record as JSON
    #[arg(long, conflicts_with = "render")]
    pub json: bool,

    /// Print the export bindings as a single `export { ... };` statement
    #[arg(long)]
    pub render: bool,

    /// Check that every declaration is exported exactly once
    #[arg(long)]
    pub verify: bool,

    /// Fail on namespaces and `import x = require()` declarations
    #[arg(long)]
    pub strict: bool,
}
