#![deny(clippy::all)]
// tsdead reads sources with std::fs
#![allow(clippy::disallowed_methods)]

//! Declaration, export and unused-export analysis for TypeScript modules.
//!
//! This crate provides:
//! - A classifier for the seven top-level declaration kinds (class, function,
//!   const, var, interface, type alias, enum).
//! - An export binder that pairs every exported name with the local name it
//!   refers to, across inline, list, destructuring, default and re-export forms.
//! - Import usage tracking for ESM, `require` and dynamic `import()`.
//! - An [`Analyzer`] that reports exports no analyzed module consumes.
//!
//! Parsing is done with OXC; records own their data and outlive the parser
//! arena.

pub mod analyzer;
pub mod collect;
pub mod declaration;
pub mod error;
pub mod export;
mod location;
pub mod resolve;
pub mod usage;

pub use analyzer::{AnalysisResults, AnalyzeOptions, Analyzer, ModuleResults, UnusedExport};
pub use collect::{
    CollectOptions, ModuleRecord, collect_file, collect_module, collect_module_with_options,
};
pub use declaration::{Declaration, DeclarationKind};
pub use error::{AnalyzeError, ClassifyError, CoverageError, Result};
pub use export::{DEFAULT_EXPORT, ExportBinding, ExportForm, render_export_list};
pub use location::SourceLocation;
pub use resolve::{ModuleResolver, normalize_id};
pub use usage::{ImportedSymbol, WILDCARD};
