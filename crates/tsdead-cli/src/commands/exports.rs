//! Exports command implementation.

use std::path::Path;
use std::process::ExitCode;

use tsdead::{AnalyzeError, collect_file};

use crate::cli::ExportsArgs;
use crate::config::{ConfigOverrides, TsdeadConfig};
use crate::error::Result;
use crate::ui;

/// Execute the exports command.
///
/// Prints the module record of one file as text, JSON, or a rendered
/// `export { ... };` statement. With `--verify`, fails unless every
/// declaration is exported exactly once.
pub fn execute(args: ExportsArgs, config_path: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let overrides = ConfigOverrides {
        strict_declarations: args.strict.then_some(true),
        ..ConfigOverrides::default()
    };
    let config = TsdeadConfig::load(&cwd, config_path, &overrides)?;

    let record = collect_file(&args.file, config.collect_options())?;

    if args.verify {
        record
            .verify_export_coverage()
            .map_err(|error| AnalyzeError::Coverage {
                path: args.file.clone(),
                error,
            })?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else if args.render {
        println!("{}", record.render_export_list());
    } else {
        print!("{}", ui::render_record(&record));
    }

    if args.verify {
        ui::success(&format!(
            "{} declarations, each exported exactly once",
            record.declarations.len()
        ));
    }
    Ok(ExitCode::SUCCESS)
}
