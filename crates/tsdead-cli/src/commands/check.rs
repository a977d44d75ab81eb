//! Check command implementation.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tsdead::Analyzer;

use crate::cli::CheckArgs;
use crate::config::{ConfigOverrides, TsdeadConfig};
use crate::discovery::discover_sources;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Steps
///
/// 1. Load configuration (defaults, config file, `TSDEAD_*`, flags)
/// 2. Discover source files under the given paths or the configured root
/// 3. Analyze them in parallel and report unused exports
///
/// Exits with status 1 when any unused export is found.
pub fn execute(args: CheckArgs, config_path: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let config = TsdeadConfig::load(&cwd, config_path, &overrides(&args))?;
    let root = config.root_dir(&cwd);

    let paths: Vec<PathBuf> = if args.paths.is_empty() {
        vec![root.clone()]
    } else {
        args.paths.iter().map(|path| cwd.join(path)).collect()
    };
    let files = discover_sources(&paths, &config)?;
    if files.is_empty() {
        ui::warning("No source files found");
        return Ok(ExitCode::SUCCESS);
    }

    let mut analyzer = Analyzer::new(config.analyze_options(&root));
    analyzer.add_files(&files)?;
    let results = analyzer.finalize();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        ui::success(&format!("No unused exports in {} files", files.len()));
    } else {
        print!("{}", ui::render_results(&results));
        let unused: usize = results.values().map(|module| module.unused_exports.len()).sum();
        ui::warning(&format!(
            "{unused} unused exports in {} of {} files",
            results.len(),
            files.len()
        ));
    }

    Ok(if results.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn overrides(args: &CheckArgs) -> ConfigOverrides {
    ConfigOverrides {
        entries: (!args.entry.is_empty()).then(|| args.entry.clone()),
        report_default_exports: args.no_default_exports.then_some(false),
        strict_declarations: args.strict.then_some(true),
    }
}
