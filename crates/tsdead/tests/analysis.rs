//! Unused-export analysis over the shared testdata modules.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use tsdead::{AnalysisResults, AnalyzeError, AnalyzeOptions, Analyzer, ModuleResults};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn analyze(files: &[&str]) -> AnalysisResults {
    let root = workspace_root();
    let mut analyzer = Analyzer::new(AnalyzeOptions {
        root: Some(root.clone()),
        ..AnalyzeOptions::default()
    });
    for file in files {
        analyzer.add_file(root.join(file)).unwrap();
    }
    analyzer.finalize()
}

fn unused(symbols: &[&str]) -> BTreeSet<String> {
    symbols.iter().map(|symbol| symbol.to_string()).collect()
}

fn only(results: &AnalysisResults, module: &str) -> ModuleResults {
    assert_eq!(
        results.keys().collect::<Vec<_>>(),
        vec![module],
        "unexpected modules in {results:#?}"
    );
    results[module].clone()
}

const ALL_SYMBOLS: [&str; 7] = ["Class", "Enum", "Fn", "Var", "Interface", "Const", "Type"];

#[test]
fn named_exports() {
    let results = analyze(&["testdata/export_named.ts"]);
    let module = only(&results, "testdata/export_named.ts");
    assert!(!module.unused_default_export);
    assert_eq!(module.unused_symbols, unused(&ALL_SYMBOLS));
}

#[test]
fn named_exports_inline() {
    let results = analyze(&["testdata/export_decl.ts"]);
    let module = only(&results, "testdata/export_decl.ts");
    assert_eq!(module.unused_symbols, unused(&ALL_SYMBOLS));
}

#[test]
fn destructured_exports() {
    let results = analyze(&["testdata/export_destructured.ts"]);
    let module = only(&results, "testdata/export_destructured.ts");
    assert_eq!(module.unused_symbols, unused(&ALL_SYMBOLS));
}

#[test]
fn named_exports_imported_partially() {
    let results = analyze(&[
        "testdata/export_named.ts",
        "testdata/import_named_partial_no_class.ts",
    ]);
    let module = only(&results, "testdata/export_named.ts");
    assert_eq!(module.unused_symbols, unused(&["Class"]));
}

#[test]
fn named_exports_imported_fully() {
    let results = analyze(&[
        "testdata/export_named.ts",
        "testdata/import_named_partial_no_class.ts",
        "testdata/import_named_partial_only_class.ts",
    ]);
    assert!(results.is_empty(), "{results:#?}");
}

#[test]
fn aliased_named_exports() {
    let results = analyze(&["testdata/export_named_aliased.ts"]);
    let module = only(&results, "testdata/export_named_aliased.ts");
    assert_eq!(module.unused_symbols, unused(&ALL_SYMBOLS));

    let exported: BTreeSet<_> = module
        .unused_exports
        .iter()
        .map(|export| export.exported.as_str())
        .collect();
    assert!(exported.iter().all(|name| name.starts_with("Aliased")));
}

#[test]
fn aliased_named_exports_imported_partially() {
    let results = analyze(&[
        "testdata/export_named_aliased.ts",
        "testdata/import_named_aliased_no_enum.ts",
    ]);
    let module = only(&results, "testdata/export_named_aliased.ts");
    assert_eq!(module.unused_symbols, unused(&["Enum"]));
}

#[test]
fn aliased_named_exports_imported_fully() {
    let results = analyze(&[
        "testdata/export_named_aliased.ts",
        "testdata/import_named_aliased_no_enum.ts",
        "testdata/import_named_aliased_only_enum.ts",
    ]);
    assert!(results.is_empty(), "{results:#?}");
}

#[test]
fn namespace_imported_partially() {
    let results = analyze(&[
        "testdata/export_named.ts",
        "testdata/import_namespace_partial.ts",
    ]);
    let module = only(&results, "testdata/export_named.ts");
    assert_eq!(module.unused_symbols, unused(&["Enum"]));
}

#[test]
fn require_named() {
    let results = analyze(&["testdata/export_named.ts", "testdata/require_named.ts"]);
    let module = only(&results, "testdata/export_named.ts");
    assert_eq!(module.unused_symbols, unused(&["Class"]));
}

#[test]
fn async_import_named() {
    let results = analyze(&[
        "testdata/export_named.ts",
        "testdata/async_import_named.ts",
    ]);
    let module = only(&results, "testdata/export_named.ts");
    assert_eq!(module.unused_symbols, unused(&["Class"]));
}

#[test]
fn import_defaults() {
    let results = analyze(&[
        "testdata/export_default_class.ts",
        "testdata/export_default_interface.ts",
        "testdata/export_default_function.ts",
        "testdata/export_default_object.ts",
        "testdata/import_defaults.ts",
    ]);
    let module = only(&results, "testdata/export_default_interface.ts");
    assert!(module.unused_default_export);
    assert!(module.unused_symbols.is_empty());
    assert_eq!(module.unused_exports[0].local, "Interface");
}

#[test]
fn import_module_obj_name_collisions() {
    let results = analyze(&[
        "testdata/export_foo.ts",
        "testdata/export_bar.ts",
        "testdata/import_foo_bar.ts",
    ]);
    assert_eq!(results.len(), 2, "{results:#?}");
    assert_eq!(results["testdata/export_foo.ts"].unused_symbols, unused(&["baz"]));
    assert_eq!(results["testdata/export_bar.ts"].unused_symbols, unused(&["foo"]));
}

#[test]
fn acid_test() {
    let results = analyze(&["testdata/acid.ts"]);
    assert!(results.is_empty(), "{results:#?}");
}

#[test]
fn entries_are_excluded_from_results() {
    let root = workspace_root();
    let mut analyzer = Analyzer::new(AnalyzeOptions {
        root: Some(root.clone()),
        ..AnalyzeOptions::default()
    });
    analyzer.add_file(root.join("testdata/export_named.ts")).unwrap();
    analyzer.mark_entry("testdata/export_named.ts");
    assert!(analyzer.finalize().is_empty());
}

#[test]
fn parallel_batch_matches_sequential_adds() {
    let root = workspace_root();
    let files: Vec<PathBuf> = [
        "testdata/export_named.ts",
        "testdata/require_named.ts",
        "testdata/export_foo.ts",
        "testdata/export_bar.ts",
        "testdata/import_foo_bar.ts",
    ]
    .iter()
    .map(|file| root.join(file))
    .collect();

    let mut analyzer = Analyzer::new(AnalyzeOptions {
        root: Some(root.clone()),
        ..AnalyzeOptions::default()
    });
    assert_eq!(analyzer.add_files(&files).unwrap(), files.len());
    assert_eq!(analyzer.len(), files.len());

    let results = analyzer.finalize();
    assert_eq!(
        results,
        analyze(&[
            "testdata/export_named.ts",
            "testdata/require_named.ts",
            "testdata/export_foo.ts",
            "testdata/export_bar.ts",
            "testdata/import_foo_bar.ts",
        ])
    );
}

#[test]
fn resolves_nested_directories_and_index_files() {
    let temp = TempDir::new().unwrap();
    let project = temp.path();
    fs::create_dir_all(project.join("src/utils")).unwrap();
    fs::write(
        project.join("src/utils/index.ts"),
        "export function format() {}\nexport function parse() {}\n",
    )
    .unwrap();
    fs::write(
        project.join("src/main.ts"),
        "import { format } from \"./utils\";\nformat();\n",
    )
    .unwrap();

    let mut analyzer = Analyzer::new(AnalyzeOptions {
        root: Some(project.to_path_buf()),
        entries: vec!["src/main.ts".to_string()],
        ..AnalyzeOptions::default()
    });
    analyzer
        .add_files(&[project.join("src/utils/index.ts"), project.join("src/main.ts")])
        .unwrap();

    let results = analyzer.finalize();
    let module = only(&results, "src/utils/index.ts");
    assert_eq!(module.unused_symbols, unused(&["parse"]));
    assert_eq!(module.unused_exports[0].location.line, 2);
}

#[test]
fn missing_files_report_io_errors() {
    let temp = TempDir::new().unwrap();
    let mut analyzer = Analyzer::new(AnalyzeOptions::default());
    let error = analyzer.add_file(temp.path().join("missing.ts")).unwrap_err();
    assert!(matches!(error, AnalyzeError::Io { .. }), "{error}");
}

#[test]
fn syntax_errors_fail_the_file() {
    let mut analyzer = Analyzer::new(AnalyzeOptions::default());
    let error = analyzer
        .add_source("broken.ts", "export class {")
        .unwrap_err();
    assert!(matches!(error, AnalyzeError::Parse { .. }), "{error}");
    assert!(analyzer.is_empty());
}

#[test]
fn results_serialize_with_module_keys() {
    let results = analyze(&["testdata/export_foo.ts"]);
    let json = serde_json::to_value(&results).unwrap();
    let module = &json["testdata/export_foo.ts"];
    assert_eq!(module["unused_default_export"], false);
    assert_eq!(module["unused_symbols"], serde_json::json!(["baz", "foo"]));
    assert_eq!(module["unused_exports"][0]["exported"], "foo");
    assert_eq!(module["unused_exports"][0]["location"]["line"], 1);
}
