//! Command implementations for the tsdead CLI.
//!
//! - [`check`] - Unused-export report for a project
//! - [`exports`] - Declarations and export bindings of one file
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and the optional `--config` path and returns the exit code.

pub mod check;
pub mod exports;

pub use check::execute as check_execute;
pub use exports::execute as exports_execute;
