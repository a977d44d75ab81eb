//! Source file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::TsdeadConfig;
use crate::error::{CliError, Result};

/// Collect every analyzable file under `paths`, sorted and deduplicated.
///
/// Files named explicitly are taken as-is; directories are walked, skipping
/// ignored components and files without a configured extension.
pub fn discover_sources(paths: &[PathBuf], config: &TsdeadConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            return Err(CliError::PathNotFound(path.clone()));
        }
        walk_directory(path, config, &mut files)?;
    }

    files.sort();
    files.dedup();
    tracing::debug!(count = files.len(), "discovered source files");
    Ok(files)
}

fn walk_directory(dir: &Path, config: &TsdeadConfig, files: &mut Vec<PathBuf>) -> Result<()> {
    let walker = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
            !config.is_ignored(relative)
        });

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && config.matches_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(())
}
