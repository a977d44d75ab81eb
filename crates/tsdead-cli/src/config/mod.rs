//! Configuration with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and config files.
//! Priority: CLI > Environment > File > Defaults

mod defaults;
mod loading;
mod validation;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tsdead::{AnalyzeOptions, CollectOptions};

pub use defaults::*;

/// tsdead configuration - loaded from tsdead.toml, tsdead.json or CLI args.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TsdeadConfig {
    /// Project root; module ids and entries are relative to it
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// File extensions analyzed while walking directories
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Modules whose exports are public API and never reported
    #[serde(default)]
    pub entries: Vec<String>,

    /// Path fragments skipped while walking directories
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    /// Report unused default exports
    #[serde(default = "default_report_default_exports")]
    pub report_default_exports: bool,

    /// Fail on declarations that are not one of the seven supported kinds
    #[serde(default)]
    pub strict_declarations: bool,
}

/// Values given on the command line. `None` leaves lower layers untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_default_exports: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_declarations: Option<bool>,
}

impl TsdeadConfig {
    /// Root directory, resolved against `cwd`.
    pub fn root_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.root)
    }

    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            strict_declarations: self.strict_declarations,
        }
    }

    /// Analyzer options with module ids relative to `root`.
    pub fn analyze_options(&self, root: &Path) -> AnalyzeOptions {
        AnalyzeOptions {
            collect: self.collect_options(),
            report_default_exports: self.report_default_exports,
            entries: self.entries.clone(),
            root: Some(root.to_path_buf()),
        }
    }

    /// Returns true if the file name ends in one of the configured extensions.
    pub fn matches_extension(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|ext| name.len() > ext.len() + 1 && name.ends_with(&format!(".{ext}")))
    }

    /// Returns true if any path component equals an ignore entry.
    pub fn is_ignored(&self, path: &Path) -> bool {
        path.components().any(|component| {
            let component = component.as_os_str().to_string_lossy();
            self.ignore.iter().any(|ignored| *ignored == component)
        })
    }
}

impl Default for TsdeadConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            extensions: default_extensions(),
            entries: Vec::new(),
            ignore: default_ignore(),
            report_default_exports: default_report_default_exports(),
            strict_declarations: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_configured_extensions() {
        let config = TsdeadConfig::default();
        assert!(config.matches_extension(Path::new("src/a.ts")));
        assert!(config.matches_extension(Path::new("src/types.d.ts")));
        assert!(config.matches_extension(Path::new("src/view.tsx")));
        assert!(!config.matches_extension(Path::new("src/style.css")));
        assert!(!config.matches_extension(Path::new("src/.ts")));
    }

    #[test]
    fn ignores_whole_components_only() {
        let config = TsdeadConfig::default();
        assert!(config.is_ignored(Path::new("app/node_modules/react/index.js")));
        assert!(!config.is_ignored(Path::new("app/src/node_modules_helper.ts")));
    }
}
