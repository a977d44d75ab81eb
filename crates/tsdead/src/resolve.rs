//! Specifier resolution against the set of analyzed modules.
//!
//! Resolution never touches the filesystem: a specifier resolves only if one
//! of its candidate ids was added to the analyzer. Anything else (packages,
//! files outside the analyzed set) is treated as external.

use std::path::Path;

use path_clean::PathClean;
use rustc_hash::FxHashSet;

/// Extensions tried, in order, when a specifier omits one.
pub const EXTENSIONS: &[&str] = &["ts", "tsx", "d.ts", "js", "jsx", "mjs", "cjs"];

/// Runtime extensions whose TypeScript source lives under a different one
/// (`import "./a.js"` compiled from `a.ts`).
const SOURCE_EXTENSIONS: &[(&str, &[&str])] = &[
    ("js", &["ts", "tsx"]),
    ("jsx", &["tsx"]),
    ("mjs", &["mts"]),
    ("cjs", &["cts"]),
];

/// Normalize a path into a module id: `.`/`..` removed, forward slashes.
pub fn normalize_id(path: impl AsRef<Path>) -> String {
    let cleaned = path.as_ref().clean();
    let id = cleaned.to_string_lossy().replace('\\', "/");
    match id.strip_prefix("./") {
        Some(stripped) => stripped.to_string(),
        None => id,
    }
}

/// Returns true for `./x`, `../x`, `.` and `..`.
pub fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Maps import specifiers onto known module ids.
#[derive(Debug, Default)]
pub struct ModuleResolver {
    known: FxHashSet<String>,
}

impl ModuleResolver {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.known.contains(id)
    }

    /// Resolve `specifier` as written in module `importer`.
    ///
    /// Relative specifiers are joined onto the importer's directory; all
    /// other specifiers are matched against ids directly.
    pub fn resolve(&self, importer: &str, specifier: &str) -> Option<String> {
        let base = if is_relative(specifier) {
            let dir = Path::new(importer).parent().unwrap_or(Path::new(""));
            normalize_id(dir.join(specifier))
        } else {
            normalize_id(specifier)
        };

        let resolved = candidates(&base).into_iter().find(|candidate| self.contains(candidate));
        if resolved.is_none() {
            tracing::debug!(importer, specifier, "specifier did not resolve to an analyzed module");
        }
        resolved
    }
}

/// Candidate ids for a base path, in priority order.
fn candidates(base: &str) -> Vec<String> {
    let mut out = vec![base.to_string()];

    if let Some((stem, ext)) = base.rsplit_once('.') {
        if let Some((_, sources)) = SOURCE_EXTENSIONS.iter().find(|(runtime, _)| *runtime == ext) {
            out.extend(sources.iter().map(|source| format!("{stem}.{source}")));
        }
    }

    out.extend(EXTENSIONS.iter().map(|ext| format!("{base}.{ext}")));
    out.extend(EXTENSIONS.iter().map(|ext| format!("{base}/index.{ext}")));
    out
}
