//! Unused-export analysis across a set of modules.
//!
//! Every module added to an [`Analyzer`] contributes both its exports and the
//! names it imports. [`Analyzer::finalize`] resolves each import onto an
//! analyzed module and reports the exports nobody consumes.
//!
//! ```no_run
//! use tsdead::{AnalyzeOptions, Analyzer};
//!
//! let mut analyzer = Analyzer::new(AnalyzeOptions::default());
//! analyzer.add_file("src/lib.ts")?;
//! analyzer.add_file("src/main.ts")?;
//! for (module, results) in analyzer.finalize() {
//!     println!("{module}: {:?}", results.unused_symbols);
//! }
//! # Ok::<(), tsdead::AnalyzeError>(())
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::collect::{CollectOptions, ModuleRecord, collect_module_with_options};
use crate::error::{AnalyzeError, Result};
use crate::export::{ExportBinding, ExportForm};
use crate::location::SourceLocation;
use crate::resolve::{ModuleResolver, normalize_id};

/// Options for an analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub collect: CollectOptions,
    /// Report unused `export default` bindings.
    pub report_default_exports: bool,
    /// Module ids whose exports are public API and never reported.
    pub entries: Vec<String>,
    /// Directory module ids are made relative to.
    pub root: Option<PathBuf>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            collect: CollectOptions::default(),
            report_default_exports: true,
            entries: Vec::new(),
            root: None,
        }
    }
}

/// One export that no analyzed module consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusedExport {
    pub exported: String,
    pub local: String,
    pub form: ExportForm,
    pub location: SourceLocation,
}

impl From<&ExportBinding> for UnusedExport {
    fn from(binding: &ExportBinding) -> Self {
        Self {
            exported: binding.exported.clone(),
            local: binding.local.clone(),
            form: binding.form,
            location: binding.location,
        }
    }
}

/// Unused exports of one module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleResults {
    /// The default export exists and is never imported.
    pub unused_default_export: bool,
    /// Local names of unused named exports (exported name for re-exports).
    pub unused_symbols: BTreeSet<String>,
    /// Every unused binding, in source order.
    pub unused_exports: Vec<UnusedExport>,
}

impl ModuleResults {
    pub fn is_empty(&self) -> bool {
        !self.unused_default_export && self.unused_symbols.is_empty()
    }
}

/// Module id -> unused exports. Modules without findings are absent.
pub type AnalysisResults = BTreeMap<String, ModuleResults>;

/// Resolved imports across all recorded modules.
#[derive(Debug, Default)]
struct Usage<'a> {
    /// Target module id -> names imported from it.
    names: FxHashMap<String, FxHashSet<&'a str>>,
    /// Modules reached through `export *`, rest patterns or computed member
    /// access, where every export counts as used.
    whole_modules: FxHashSet<String>,
}

/// Accumulates module records and computes unused exports.
#[derive(Debug, Default)]
pub struct Analyzer {
    options: AnalyzeOptions,
    modules: IndexMap<String, ModuleRecord>,
    entries: FxHashSet<String>,
}

impl Analyzer {
    pub fn new(options: AnalyzeOptions) -> Self {
        let entries = options.entries.iter().map(normalize_id).collect();
        Self {
            options,
            modules: IndexMap::new(),
            entries,
        }
    }

    /// Module id for a path: relative to the configured root, normalized.
    pub fn module_id(&self, path: &Path) -> String {
        let relative = match &self.options.root {
            Some(root) => path.strip_prefix(root).unwrap_or(path),
            None => path,
        };
        normalize_id(relative)
    }

    /// Read, parse and record one file.
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let source = read_source(path)?;
        let id = self.module_id(path);
        self.add_source(id, &source)
    }

    /// Parse and record an in-memory module under `id`.
    pub fn add_source(&mut self, id: impl Into<String>, source: &str) -> Result<()> {
        let id = normalize_id(id.into());
        let record = collect_module_with_options(&id, source, self.options.collect)?;
        self.add_record(record);
        Ok(())
    }

    /// Read and parse a batch of files in parallel.
    ///
    /// Fails on the first file that cannot be read or parsed; nothing from
    /// the batch is recorded in that case.
    pub fn add_files<P>(&mut self, paths: &[P]) -> Result<usize>
    where
        P: AsRef<Path> + Sync,
    {
        let collect = self.options.collect;
        let records = paths
            .par_iter()
            .map(|path| {
                let path = path.as_ref();
                let source = read_source(path)?;
                collect_module_with_options(&self.module_id(path), &source, collect)
            })
            .collect::<Result<Vec<_>>>()?;

        let count = records.len();
        for record in records {
            self.add_record(record);
        }
        Ok(count)
    }

    /// Record an already collected module, replacing any previous record
    /// with the same id.
    pub fn add_record(&mut self, record: ModuleRecord) {
        if self.modules.contains_key(&record.id) {
            tracing::debug!(module = %record.id, "replacing module record");
        }
        self.modules.insert(record.id.clone(), record);
    }

    /// Exclude a module's exports from the report.
    pub fn mark_entry(&mut self, id: impl AsRef<Path>) {
        self.entries.insert(normalize_id(id));
    }

    pub fn module(&self, id: &str) -> Option<&ModuleRecord> {
        self.modules.get(id)
    }

    pub fn modules(&self) -> impl Iterator<Item = &ModuleRecord> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Resolve all imports and report unused exports per module.
    pub fn finalize(self) -> AnalysisResults {
        let usage = self.resolve_usage();
        let mut results = AnalysisResults::new();

        for (id, record) in &self.modules {
            if self.entries.contains(id) {
                tracing::trace!(module = %id, "skipping entry module");
                continue;
            }
            if usage.whole_modules.contains(id) {
                tracing::trace!(module = %id, "module object used as a whole");
                continue;
            }
            let used = usage.names.get(id.as_str());

            let module_results = self.unused_in(record, used);
            if !module_results.is_empty() {
                results.insert(id.clone(), module_results);
            }
        }

        tracing::info!(
            modules = self.modules.len(),
            with_unused = results.len(),
            "analysis complete"
        );
        results
    }

    fn resolve_usage(&self) -> Usage<'_> {
        let resolver = ModuleResolver::new(self.modules.keys().cloned());
        let mut usage = Usage::default();
        for (id, record) in &self.modules {
            for import in &record.imports {
                let Some(target) = resolver.resolve(id, &import.source) else {
                    continue;
                };
                if import.is_wildcard() {
                    usage.whole_modules.insert(target);
                } else {
                    usage.names.entry(target).or_default().insert(import.name.as_str());
                }
            }
        }
        usage
    }

    fn unused_in(&self, record: &ModuleRecord, used: Option<&FxHashSet<&str>>) -> ModuleResults {
        let mut results = ModuleResults::default();
        for binding in &record.exports {
            if used.is_some_and(|names| names.contains(binding.exported.as_str())) {
                continue;
            }
            if binding.is_default() {
                if !self.options.report_default_exports {
                    continue;
                }
                results.unused_default_export = true;
            } else if binding.has_local_binding() {
                results.unused_symbols.insert(binding.local.clone());
            } else {
                results.unused_symbols.insert(binding.exported.clone());
            }
            results.unused_exports.push(UnusedExport::from(binding));
        }
        results
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|error| AnalyzeError::Io {
        path: path.to_path_buf(),
        error,
    })
}
