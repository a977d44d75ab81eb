//! Command-line interface definition for tsdead.
//!
//! # Command Structure
//!
//! - `tsdead check` - Report unused exports across a project
//! - `tsdead exports` - Show the declarations and exports of one file

mod commands;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{CheckArgs, Command, ExportsArgs};

/// tsdead - find unused exports in TypeScript projects
#[derive(Parser, Debug)]
#[command(
    name = "tsdead",
    version,
    about = "Find unused exports in TypeScript projects",
    long_about = "tsdead parses every TypeScript and JavaScript module of a project,\n\
                  records what each module exports and what it imports from the others,\n\
                  and reports the exports nothing consumes."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to a tsdead.toml or tsdead.json config file
    ///
    /// Defaults to tsdead.toml, then tsdead.json, in the current directory.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_check_with_global_flags() {
        let cli = Cli::try_parse_from([
            "tsdead",
            "--no-color",
            "check",
            "src",
            "--json",
            "--entry",
            "src/index.ts",
        ])
        .unwrap();

        assert!(cli.no_color);
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.paths, vec![PathBuf::from("src")]);
                assert!(args.json);
                assert_eq!(args.entry, vec!["src/index.ts".to_string()]);
            }
            other => panic!("expected check, got {other:?}"),
        }
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["tsdead", "-v", "-q", "check"]).is_err());
    }

    #[test]
    fn exports_requires_a_file() {
        assert!(Cli::try_parse_from(["tsdead", "exports"]).is_err());
        let cli = Cli::try_parse_from(["tsdead", "exports", "a.ts", "--render"]).unwrap();
        assert!(matches!(cli.command, Command::Exports(ExportsArgs { render: true, .. })));
    }
}
