//! Single-pass collection of a module's declarations, exports and imports.
//!
//! [`collect_module`] parses one file with OXC and produces a
//! [`ModuleRecord`]: the top-level declarations (via the declaration
//! classifier), the export bindings (via the export binder) and the names the
//! module imports from elsewhere. Records own their strings, so nothing
//! borrows from the parser arena once collection returns.
//!
//! # Errors
//!
//! Malformed source fails the whole file with [`AnalyzeError::Parse`]; there
//! is no error recovery and no partial record.

use std::fs;
use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPatternKind, Declaration as AstDeclaration, ExportAllDeclaration,
    ExportDefaultDeclaration, ExportDefaultDeclarationKind, ExportNamedDeclaration,
    ModuleExportName, Program, Statement, TSExportAssignment,
};
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_span::SourceType;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::declaration::{Declaration, DeclarationKind, bound_identifiers, classify_declaration};
use crate::error::{AnalyzeError, ClassifyError, CoverageError, Result};
use crate::export::{DEFAULT_EXPORT, ExportBinding, ExportForm, render_export_list};
use crate::location::LineIndex;
use crate::usage::{ImportedSymbol, UsageVisitor, WILDCARD};

/// Options controlling declaration collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectOptions {
    /// Fail on top-level declarations that are none of the seven supported
    /// kinds (namespaces, `import x = require()`), instead of skipping them.
    pub strict_declarations: bool,
}

/// Everything one parse of one file yields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Module id (normally the normalized path).
    pub id: String,
    /// Top-level declarations in source order.
    pub declarations: Vec<Declaration>,
    /// Export bindings in source order.
    pub exports: Vec<ExportBinding>,
    /// Names consumed from other modules, sorted and deduplicated.
    pub imports: Vec<ImportedSymbol>,
}

impl ModuleRecord {
    /// Finds the declaration introducing `name`.
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|declaration| declaration.name == name)
    }

    /// Finds the first export binding whose local name is `local`.
    pub fn export_of(&self, local: &str) -> Option<&ExportBinding> {
        self.exports
            .iter()
            .find(|binding| binding.has_local_binding() && binding.local == local)
    }

    /// Returns true if anything occupies the default export slot.
    pub fn has_default_export(&self) -> bool {
        self.exports.iter().any(ExportBinding::is_default)
    }

    /// Checks that every declaration is exported by exactly one binding.
    pub fn verify_export_coverage(&self) -> std::result::Result<(), CoverageError> {
        for declaration in &self.declarations {
            let count = self
                .exports
                .iter()
                .filter(|binding| binding.has_local_binding() && binding.local == declaration.name)
                .count();
            match count {
                1 => {}
                0 => {
                    return Err(CoverageError::Unexported {
                        kind: declaration.kind,
                        name: declaration.name.clone(),
                    });
                }
                count => {
                    return Err(CoverageError::ExportedMoreThanOnce {
                        kind: declaration.kind,
                        name: declaration.name.clone(),
                        count,
                    });
                }
            }
        }
        Ok(())
    }

    /// Re-serializes the local export bindings as one `export { ... };` list.
    pub fn render_export_list(&self) -> String {
        render_export_list(&self.exports)
    }
}

/// Parse a file from disk and collect its record.
pub fn collect_file(path: impl AsRef<Path>, options: CollectOptions) -> Result<ModuleRecord> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|error| AnalyzeError::Io {
        path: path.to_path_buf(),
        error,
    })?;
    collect_module_with_options(&path.to_string_lossy(), &source, options)
}

/// Parse an in-memory module and collect its record with default options.
pub fn collect_module(id: &str, source: &str) -> Result<ModuleRecord> {
    collect_module_with_options(id, source, CollectOptions::default())
}

/// Parse an in-memory module and collect its record.
///
/// The source type is inferred from `id`'s extension and falls back to
/// TypeScript for ids without a known one.
pub fn collect_module_with_options(
    id: &str,
    source: &str,
    options: CollectOptions,
) -> Result<ModuleRecord> {
    let source_type = SourceType::from_path(id).unwrap_or_else(|_| SourceType::ts());
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, source, source_type).parse();
    let line_index = LineIndex::new(source);

    if parsed.panicked || !parsed.errors.is_empty() {
        let diagnostics: Vec<String> = parsed
            .errors
            .iter()
            .map(|error| {
                let offset = error
                    .labels
                    .as_ref()
                    .and_then(|labels| labels.first())
                    .map(|label| label.offset());
                match offset {
                    Some(offset) => {
                        format!("{} at {}", error.message, line_index.location(offset as u32))
                    }
                    None => error.message.to_string(),
                }
            })
            .collect();
        return Err(AnalyzeError::parse_error(id, &diagnostics));
    }

    let mut collector = ModuleCollector::new(id, line_index, options);
    collector.collect(&parsed.program)?;
    let record = collector.finish(&parsed.program);

    tracing::debug!(
        module = id,
        declarations = record.declarations.len(),
        exports = record.exports.len(),
        imports = record.imports.len(),
        "collected module"
    );

    Ok(record)
}

/// Text of an export/import name (`foo`, or `"string name"`).
pub(crate) fn module_export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(literal) => literal.value.to_string(),
    }
}

struct ModuleCollector<'s> {
    id: &'s str,
    options: CollectOptions,
    line_index: LineIndex,
    declarations: Vec<Declaration>,
    exports: Vec<ExportBinding>,
    re_export_imports: Vec<ImportedSymbol>,
}

impl<'s> ModuleCollector<'s> {
    fn new(id: &'s str, line_index: LineIndex, options: CollectOptions) -> Self {
        Self {
            id,
            options,
            line_index,
            declarations: Vec::new(),
            exports: Vec::new(),
            re_export_imports: Vec::new(),
        }
    }

    fn collect(&mut self, program: &Program<'_>) -> Result<()> {
        for statement in program.body.iter() {
            match statement {
                Statement::ExportNamedDeclaration(export) => self.export_named(export)?,
                Statement::ExportDefaultDeclaration(export) => self.export_default(export),
                Statement::ExportAllDeclaration(export) => self.export_all(export),
                Statement::TSExportAssignment(assignment) => self.export_assignment(assignment),
                _ => {
                    if let Some(declaration) = statement.as_declaration() {
                        self.declare(declaration)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn finish(self, program: &Program<'_>) -> ModuleRecord {
        let mut visitor = UsageVisitor::default();
        visitor.visit_program(program);

        let mut imports = visitor.imports;
        imports.extend(self.re_export_imports);
        imports.sort();
        imports.dedup();

        ModuleRecord {
            id: self.id.to_string(),
            declarations: self.declarations,
            exports: self.exports,
            imports,
        }
    }

    /// Classifies a declaration and records it. Returns the names it binds.
    fn declare(&mut self, declaration: &AstDeclaration<'_>) -> Result<Vec<String>> {
        match classify_declaration(declaration, &self.line_index) {
            Ok(records) => {
                let names = records.iter().map(|record| record.name.clone()).collect();
                for record in records {
                    self.push_declaration(record);
                }
                Ok(names)
            }
            Err(error) => self.unrecognized(declaration, error),
        }
    }

    fn unrecognized(
        &self,
        declaration: &AstDeclaration<'_>,
        error: ClassifyError,
    ) -> Result<Vec<String>> {
        if self.options.strict_declarations {
            return Err(AnalyzeError::Classify {
                path: self.id.into(),
                error,
            });
        }
        tracing::warn!(module = self.id, "skipping declaration: {error}");
        let name = match declaration {
            AstDeclaration::TSModuleDeclaration(module) => Some(module.id.name().to_string()),
            AstDeclaration::TSImportEqualsDeclaration(import) => Some(import.id.name.to_string()),
            _ => None,
        };
        Ok(name.into_iter().collect())
    }

    /// Overload signatures and merged interfaces repeat a name; keep the first.
    fn push_declaration(&mut self, record: Declaration) {
        let duplicate = self
            .declarations
            .iter()
            .any(|existing| existing.kind == record.kind && existing.name == record.name);
        if !duplicate {
            self.declarations.push(record);
        }
    }

    fn push_export(&mut self, binding: ExportBinding) {
        self.exports.push(binding);
    }

    /// Overload signatures and merged declarations export the same binding
    /// once per signature; keep the first. Repeated list entries are kept so
    /// the coverage check sees them.
    fn push_declared_export(&mut self, binding: ExportBinding) {
        let overload = self.exports.iter().any(|existing| {
            existing.form == binding.form
                && existing.local == binding.local
                && existing.exported == binding.exported
        });
        if !overload {
            self.exports.push(binding);
        }
    }

    fn export_named(&mut self, export: &ExportNamedDeclaration<'_>) -> Result<()> {
        let export_type_only = export.export_kind.is_type();

        if let Some(declaration) = &export.declaration {
            let destructured = destructured_names(declaration);
            let location = self.line_index.location(export.span.start);
            for name in self.declare(declaration)? {
                let form = if destructured.contains(&name) {
                    ExportForm::Destructuring
                } else {
                    ExportForm::Declaration
                };
                self.push_declared_export(
                    ExportBinding::direct(name, form, location).with_type_only(export_type_only),
                );
            }
            return Ok(());
        }

        let source = export.source.as_ref().map(|source| source.value.to_string());
        for specifier in export.specifiers.iter() {
            let local = module_export_name(&specifier.local);
            let exported = module_export_name(&specifier.exported);
            let location = self.line_index.location(specifier.span.start);
            let type_only = export_type_only || specifier.export_kind.is_type();

            let binding = match &source {
                Some(source) => {
                    self.re_export_imports
                        .push(ImportedSymbol::new(source.as_str(), local.as_str()));
                    ExportBinding::aliased(local, exported, ExportForm::ReExport, location)
                        .with_source(source.as_str())
                }
                None => ExportBinding::aliased(local, exported, ExportForm::Specifier, location),
            };
            self.push_export(binding.with_type_only(type_only));
        }
        Ok(())
    }

    fn export_default(&mut self, export: &ExportDefaultDeclaration<'_>) {
        let location = self.line_index.location(export.span.start);
        let declared = match &export.declaration {
            ExportDefaultDeclarationKind::FunctionDeclaration(function) => function
                .id
                .as_ref()
                .map(|id| (DeclarationKind::Function, id)),
            ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                class.id.as_ref().map(|id| (DeclarationKind::Class, id))
            }
            ExportDefaultDeclarationKind::TSInterfaceDeclaration(interface) => {
                Some((DeclarationKind::Interface, &interface.id))
            }
            ExportDefaultDeclarationKind::Identifier(ident) => {
                // `export default Main;` exports an existing binding.
                self.push_export(ExportBinding::aliased(
                    ident.name.as_str(),
                    DEFAULT_EXPORT,
                    ExportForm::Default,
                    location,
                ));
                return;
            }
            _ => None,
        };

        let binding = match declared {
            Some((kind, id)) => {
                let declared_at = self.line_index.location(id.span.start);
                self.push_declaration(Declaration::new(kind, id.name.as_str(), declared_at));
                ExportBinding::aliased(id.name.as_str(), DEFAULT_EXPORT, ExportForm::Default, location)
            }
            None => ExportBinding::aliased(
                DEFAULT_EXPORT,
                DEFAULT_EXPORT,
                ExportForm::Default,
                location,
            ),
        };
        match declared {
            Some(_) => self.push_declared_export(binding),
            None => self.push_export(binding),
        }
    }

    fn export_all(&mut self, export: &ExportAllDeclaration<'_>) {
        let source = export.source.value.as_str();
        // Names forwarded by `export *` are unknown without the target
        // module, so everything it exports counts as used.
        self.re_export_imports.push(ImportedSymbol::new(source, WILDCARD));

        if let Some(exported) = &export.exported {
            let location = self.line_index.location(export.span.start);
            self.push_export(
                ExportBinding::aliased(
                    WILDCARD,
                    module_export_name(exported),
                    ExportForm::ReExport,
                    location,
                )
                .with_source(source)
                .with_type_only(export.export_kind.is_type()),
            );
        }
    }

    fn export_assignment(&mut self, assignment: &TSExportAssignment<'_>) {
        let location = self.line_index.location(assignment.span.start);
        let local = match assignment.expression.get_inner_expression() {
            oxc_ast::ast::Expression::Identifier(ident) => ident.name.to_string(),
            _ => DEFAULT_EXPORT.to_string(),
        };
        self.push_export(ExportBinding::aliased(
            local,
            DEFAULT_EXPORT,
            ExportForm::Default,
            location,
        ));
    }
}

/// Names bound through destructuring patterns in a variable declaration.
fn destructured_names(declaration: &AstDeclaration<'_>) -> FxHashSet<String> {
    let AstDeclaration::VariableDeclaration(variable) = declaration else {
        return FxHashSet::default();
    };
    variable
        .declarations
        .iter()
        .filter(|declarator| {
            !matches!(declarator.id.kind, BindingPatternKind::BindingIdentifier(_))
        })
        .flat_map(|declarator| bound_identifiers(&declarator.id))
        .map(|ident| ident.name.to_string())
        .collect()
}
