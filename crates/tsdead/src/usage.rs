//! Import usage tracking.
//!
//! Walks a whole program and records which names of which modules it
//! consumes. Besides static `import` declarations this follows the
//! CommonJS and dynamic-import idioms:
//!
//! ```text
//! import * as utils from "./named";     utils.Const;  const { Fn } = utils;
//! let shape: utils.Interface;
//! const named = require("./named");     named.Class;
//! require("./named").Interface;
//! const mod = await import("./named");  (await import("./named")).Type;
//! import("./named").then(mod => mod.Enum);
//! ```

use oxc_ast::ast::{
    Argument, BindingPattern, BindingPatternKind, CallExpression, ComputedMemberExpression,
    Expression, ImportDeclaration, ImportDeclarationSpecifier, ObjectPattern,
    StaticMemberExpression, TSQualifiedName, TSTypeName, VariableDeclarator,
};
use oxc_ast_visit::{Visit, walk};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::collect::module_export_name;
use crate::export::DEFAULT_EXPORT;

/// Marks every export of a module as used.
pub const WILDCARD: &str = "*";

/// A name consumed from another module.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ImportedSymbol {
    /// Module specifier exactly as written in the importing module.
    pub source: String,
    /// Exported name, `default`, or [`WILDCARD`].
    pub name: String,
}

impl ImportedSymbol {
    pub fn new(source: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.name == WILDCARD
    }
}

/// AST visitor that records imported names.
#[derive(Debug, Default)]
pub(crate) struct UsageVisitor {
    /// Local binding -> module specifier, for bindings that hold a whole
    /// module object (namespace imports, `require` results, awaited imports).
    namespaces: FxHashMap<String, String>,
    pub(crate) imports: Vec<ImportedSymbol>,
}

impl UsageVisitor {
    fn record(&mut self, source: &str, name: &str) {
        tracing::trace!(source, name, "recorded import usage");
        self.imports.push(ImportedSymbol::new(source, name));
    }

    /// Marks all keys of a destructuring pattern as imported from `source`.
    fn record_destructured(&mut self, source: &str, object: &ObjectPattern<'_>) {
        for property in object.properties.iter() {
            match property.key.static_name() {
                Some(name) => self.record(source, &name),
                None => {
                    tracing::debug!(source, "computed key in destructured import");
                    self.record(source, WILDCARD);
                }
            }
        }
        if object.rest.is_some() {
            self.record(source, WILDCARD);
        }
    }

    /// Binds or destructures a whole-module value.
    fn bind_module_object(&mut self, source: String, pattern: &BindingPattern<'_>) {
        match &pattern.kind {
            BindingPatternKind::BindingIdentifier(ident) => {
                self.namespaces.insert(ident.name.to_string(), source);
            }
            BindingPatternKind::ObjectPattern(object) => self.record_destructured(&source, object),
            _ => {
                tracing::debug!(source = %source, "unsupported pattern for module object");
                self.record(&source, WILDCARD);
            }
        }
    }

    /// Resolve an expression that evaluates to a whole module object.
    fn module_object_source(&self, expression: &Expression<'_>) -> Option<String> {
        match expression.get_inner_expression() {
            Expression::Identifier(ident) => self.namespaces.get(ident.name.as_str()).cloned(),
            Expression::CallExpression(call) => require_source(call),
            Expression::AwaitExpression(await_expr) => dynamic_import_source(&await_expr.argument),
            _ => None,
        }
    }

    /// `import("m").then(mod => ...)`: returns the source and the callback
    /// parameter pattern.
    fn then_callback<'c, 'a>(
        call: &'c CallExpression<'a>,
    ) -> Option<(String, &'c BindingPattern<'a>)> {
        let Expression::StaticMemberExpression(member) = call.callee.get_inner_expression() else {
            return None;
        };
        if member.property.name.as_str() != "then" {
            return None;
        }
        let source = dynamic_import_source(&member.object)?;
        let params = match call.arguments.first()? {
            Argument::ArrowFunctionExpression(arrow) => &arrow.params,
            Argument::FunctionExpression(function) => &function.params,
            _ => return None,
        };
        let param = params.items.first()?;
        Some((source, &param.pattern))
    }
}

impl<'a> Visit<'a> for UsageVisitor {
    fn visit_import_declaration(&mut self, import: &ImportDeclaration<'a>) {
        let source = import.source.value.as_str();
        if let Some(specifiers) = &import.specifiers {
            for specifier in specifiers.iter() {
                match specifier {
                    ImportDeclarationSpecifier::ImportSpecifier(named) => {
                        self.record(source, &module_export_name(&named.imported));
                    }
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(_) => {
                        self.record(source, DEFAULT_EXPORT);
                    }
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(namespace) => {
                        self.namespaces
                            .insert(namespace.local.name.to_string(), source.to_string());
                    }
                }
            }
        }
        walk::walk_import_declaration(self, import);
    }

    fn visit_variable_declarator(&mut self, declarator: &VariableDeclarator<'a>) {
        if let Some(init) = &declarator.init {
            if let Some(source) = self.module_object_source(init) {
                self.bind_module_object(source, &declarator.id);
            }
        }
        walk::walk_variable_declarator(self, declarator);
    }

    fn visit_static_member_expression(&mut self, member: &StaticMemberExpression<'a>) {
        if let Some(source) = self.module_object_source(&member.object) {
            self.record(&source, member.property.name.as_str());
        }
        walk::walk_static_member_expression(self, member);
    }

    fn visit_computed_member_expression(&mut self, member: &ComputedMemberExpression<'a>) {
        if let Some(source) = self.module_object_source(&member.object) {
            match member.expression.get_inner_expression() {
                Expression::StringLiteral(key) => self.record(&source, key.value.as_str()),
                _ => self.record(&source, WILDCARD),
            }
        }
        walk::walk_computed_member_expression(self, member);
    }

    /// `let shape: utils.Shape` uses `Shape` at the type level.
    fn visit_ts_qualified_name(&mut self, name: &TSQualifiedName<'a>) {
        if let TSTypeName::IdentifierReference(ident) = &name.left {
            if let Some(source) = self.namespaces.get(ident.name.as_str()).cloned() {
                self.record(&source, name.right.name.as_str());
            }
        }
        walk::walk_ts_qualified_name(self, name);
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        let Some((source, pattern)) = Self::then_callback(call) else {
            walk::walk_call_expression(self, call);
            return;
        };

        match &pattern.kind {
            BindingPatternKind::BindingIdentifier(ident) => {
                // The callback parameter shadows any outer binding only
                // while its body is walked.
                let name = ident.name.to_string();
                let previous = self.namespaces.insert(name.clone(), source);
                walk::walk_call_expression(self, call);
                match previous {
                    Some(previous) => self.namespaces.insert(name, previous),
                    None => self.namespaces.remove(&name),
                };
            }
            _ => {
                self.bind_module_object(source, pattern);
                walk::walk_call_expression(self, call);
            }
        }
    }
}

/// `require("m")` -> `"m"`
fn require_source(call: &CallExpression<'_>) -> Option<String> {
    let Expression::Identifier(callee) = &call.callee else {
        return None;
    };
    if callee.name.as_str() != "require" {
        return None;
    }
    match call.arguments.first() {
        Some(Argument::StringLiteral(literal)) => Some(literal.value.to_string()),
        Some(_) => {
            tracing::warn!("unhandled non-literal require");
            None
        }
        None => None,
    }
}

/// `import("m")` -> `"m"`
fn dynamic_import_source(expression: &Expression<'_>) -> Option<String> {
    let Expression::ImportExpression(import) = expression.get_inner_expression() else {
        return None;
    };
    match import.source.get_inner_expression() {
        Expression::StringLiteral(literal) => Some(literal.value.to_string()),
        _ => {
            tracing::warn!("unhandled non-literal dynamic import");
            None
        }
    }
}
