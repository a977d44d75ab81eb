#![deny(clippy::all)]
// The CLI walks and reads the project directly
#![allow(clippy::disallowed_methods)]

//! tsdead CLI - unused-export detection for TypeScript projects.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - `check` and `exports` implementations
//! - [`config`] - figment-based configuration loading
//! - [`discovery`] - source file discovery with walkdir
//! - [`error`] - CLI error types and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - terminal output
//!
//! # Example
//!
//! ```rust,no_run
//! use tsdead_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result};
