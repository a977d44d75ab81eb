//! Declaration and export recognition over the three export-form fixtures.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use tsdead::{DeclarationKind, ExportForm, ModuleRecord, collect_module};

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../testdata")
        .join(name)
}

fn load(name: &str) -> (String, ModuleRecord) {
    let source = fs::read_to_string(testdata(name)).unwrap();
    let record = collect_module(name, &source).unwrap();
    (source, record)
}

fn pairs(record: &ModuleRecord) -> BTreeSet<(String, String)> {
    record
        .exports
        .iter()
        .map(|binding| (binding.local.clone(), binding.exported.clone()))
        .collect()
}

const FIXTURES: [&str; 3] = [
    "export_named_aliased.ts",
    "export_named.ts",
    "export_destructured.ts",
];

#[test]
fn every_fixture_declares_each_kind_once() {
    for fixture in FIXTURES {
        let (_, record) = load(fixture);
        let mut kinds: Vec<DeclarationKind> =
            record.declarations.iter().map(|declaration| declaration.kind).collect();
        kinds.sort();
        assert_eq!(kinds, DeclarationKind::ALL.to_vec(), "{fixture}");
    }
}

#[test]
fn every_fixture_exports_each_declaration_exactly_once() {
    for fixture in FIXTURES {
        let (_, record) = load(fixture);
        assert_eq!(record.verify_export_coverage(), Ok(()), "{fixture}");
        assert_eq!(record.exports.len(), 7, "{fixture}");
    }
}

#[test]
fn aliased_list_prefixes_every_name() {
    let (_, record) = load("export_named_aliased.ts");
    for declaration in &record.declarations {
        let binding = record.export_of(&declaration.name).unwrap();
        assert_eq!(binding.exported, format!("Aliased{}", declaration.name));
        assert_eq!(binding.form, ExportForm::Specifier);
        assert!(binding.is_aliased());
    }
}

#[test]
fn direct_list_keeps_local_names() {
    let (_, record) = load("export_named.ts");
    for declaration in &record.declarations {
        let binding = record.export_of(&declaration.name).unwrap();
        assert_eq!(binding.exported, declaration.name);
        assert_eq!(binding.form, ExportForm::Specifier);
    }
}

#[test]
fn destructuring_export_declares_and_exports_once() {
    let (_, record) = load("export_destructured.ts");

    let consts: Vec<_> = record
        .declarations
        .iter()
        .filter(|declaration| declaration.name == "Const")
        .collect();
    assert_eq!(consts.len(), 1);
    assert_eq!(consts[0].kind, DeclarationKind::Const);

    let destructured: Vec<_> = record
        .exports
        .iter()
        .filter(|binding| binding.form == ExportForm::Destructuring)
        .collect();
    assert_eq!(destructured.len(), 1);
    assert_eq!(destructured[0].local, "Const");
    assert_eq!(destructured[0].exported, "Const");

    let listed = record
        .exports
        .iter()
        .filter(|binding| binding.form == ExportForm::Specifier)
        .inspect(|binding| assert_eq!(binding.exported, binding.local))
        .count();
    assert_eq!(listed, 6);
}

/// Drops `export { ... };` lists and the `export` keyword of inline
/// declarations, leaving only the declarations.
fn strip_exports(source: &str) -> String {
    let mut out = Vec::new();
    let mut in_list = false;
    for line in source.lines() {
        if in_list {
            in_list = !line.trim_end().ends_with("};");
            continue;
        }
        if line.starts_with("export {") {
            in_list = !line.trim_end().ends_with("};");
            continue;
        }
        out.push(line.strip_prefix("export ").unwrap_or(line));
    }
    out.join("\n")
}

#[test]
fn rendered_export_list_round_trips() {
    for fixture in FIXTURES.iter().chain(["export_decl.ts"].iter()) {
        let (source, record) = load(fixture);
        let rebuilt = format!("{}\n{}\n", strip_exports(&source), record.render_export_list());
        let reparsed = collect_module(fixture, &rebuilt).unwrap();

        assert_eq!(pairs(&reparsed), pairs(&record), "{fixture}:\n{rebuilt}");
        assert_eq!(reparsed.declarations.len(), record.declarations.len(), "{fixture}");
    }
}

#[test]
fn string_named_exports_round_trip() {
    let declarations = "const value = 1;\nclass Widget {}\n";
    let source =
        format!("{declarations}export {{ value as \"kebab-name\", Widget as \"fancy widget\" }};\n");
    let record = collect_module("strings.ts", &source).unwrap();

    let rendered = record.render_export_list();
    assert_eq!(
        rendered,
        r#"export { value as "kebab-name", Widget as "fancy widget" };"#
    );

    let reparsed = collect_module("strings.ts", &format!("{declarations}{rendered}\n")).unwrap();
    assert_eq!(pairs(&reparsed), pairs(&record));
    assert_eq!(
        reparsed.declaration("Widget").map(|declaration| declaration.kind),
        Some(DeclarationKind::Class)
    );
}

#[test]
fn inline_exports_cover_all_kinds() {
    let (_, record) = load("export_decl.ts");
    assert_eq!(record.verify_export_coverage(), Ok(()));
    assert!(
        record
            .exports
            .iter()
            .all(|binding| binding.form == ExportForm::Declaration && !binding.is_aliased())
    );
}
