//! tsdead CLI - find exports no module imports.
//!
//! This is the main entry point for the tsdead CLI. It handles command-line
//! argument parsing, logging initialization, and command dispatch.

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tsdead_cli::{cli, commands, error, logger, ui};

fn main() -> Result<ExitCode> {
    // Parse command-line arguments
    let args = cli::Cli::parse();

    // Initialize logging and colors based on global flags
    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let config = args.config.as_deref();
    let result = match args.command {
        cli::Command::Check(check_args) => commands::check_execute(check_args, config),
        cli::Command::Exports(exports_args) => commands::exports_execute(exports_args, config),
    };

    // Convert CLI errors to miette diagnostics
    result.map_err(error::cli_error_to_miette)
}
