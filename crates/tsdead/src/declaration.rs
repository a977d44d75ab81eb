//! Declaration classifier.
//!
//! Maps a single top-level OXC [`oxc_ast::ast::Declaration`] onto one or more
//! [`Declaration`] records tagged with one of seven [`DeclarationKind`]s.

use oxc_ast::ast::{
    BindingIdentifier, BindingPattern, BindingPatternKind, Declaration as AstDeclaration,
    VariableDeclarationKind,
};
use oxc_span::GetSpan;
use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;
use crate::location::{LineIndex, SourceLocation};

/// Kind of a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeclarationKind {
    Class,
    Function,
    Const,
    /// `var` and `let` bindings.
    Var,
    Interface,
    TypeAlias,
    Enum,
}

impl DeclarationKind {
    /// Every kind, in declaration order.
    pub const ALL: [DeclarationKind; 7] = [
        DeclarationKind::Class,
        DeclarationKind::Function,
        DeclarationKind::Const,
        DeclarationKind::Var,
        DeclarationKind::Interface,
        DeclarationKind::TypeAlias,
        DeclarationKind::Enum,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::Class => "class",
            DeclarationKind::Function => "function",
            DeclarationKind::Const => "const",
            DeclarationKind::Var => "var",
            DeclarationKind::Interface => "interface",
            DeclarationKind::TypeAlias => "type alias",
            DeclarationKind::Enum => "enum",
        }
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A top-level binding introduced by a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub location: SourceLocation,
}

impl Declaration {
    pub fn new(kind: DeclarationKind, name: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            name: name.into(),
            location,
        }
    }
}

/// Classify one top-level declaration.
///
/// Variable declarations produce one record per bound identifier, so a
/// destructuring `const { a, b: [c] } = value` yields `a` and `c`. Anonymous
/// functions and classes (only legal behind `export default`) yield nothing.
pub(crate) fn classify_declaration(
    declaration: &AstDeclaration<'_>,
    line_index: &LineIndex,
) -> Result<Vec<Declaration>, ClassifyError> {
    let records = match declaration {
        AstDeclaration::VariableDeclaration(variable) => {
            let kind = variable_kind(variable.kind);
            let mut records = Vec::new();
            for declarator in variable.declarations.iter() {
                for id in bound_identifiers(&declarator.id) {
                    records.push(named_declaration(kind, id, line_index));
                }
            }
            records
        }
        AstDeclaration::FunctionDeclaration(function) => function
            .id
            .iter()
            .map(|id| named_declaration(DeclarationKind::Function, id, line_index))
            .collect(),
        AstDeclaration::ClassDeclaration(class) => class
            .id
            .iter()
            .map(|id| named_declaration(DeclarationKind::Class, id, line_index))
            .collect(),
        AstDeclaration::TSTypeAliasDeclaration(alias) => {
            vec![named_declaration(DeclarationKind::TypeAlias, &alias.id, line_index)]
        }
        AstDeclaration::TSInterfaceDeclaration(interface) => {
            vec![named_declaration(DeclarationKind::Interface, &interface.id, line_index)]
        }
        AstDeclaration::TSEnumDeclaration(enumeration) => {
            vec![named_declaration(DeclarationKind::Enum, &enumeration.id, line_index)]
        }
        AstDeclaration::TSModuleDeclaration(module) => {
            return Err(unrecognized(
                format!("namespace {}", module.id.name()),
                declaration,
                line_index,
            ));
        }
        AstDeclaration::TSImportEqualsDeclaration(import_equals) => {
            return Err(unrecognized(
                format!("import {} =", import_equals.id.name),
                declaration,
                line_index,
            ));
        }
        #[allow(unreachable_patterns)]
        _ => {
            return Err(unrecognized(
                "declaration".to_string(),
                declaration,
                line_index,
            ));
        }
    };

    Ok(records)
}

fn named_declaration(
    kind: DeclarationKind,
    id: &BindingIdentifier<'_>,
    line_index: &LineIndex,
) -> Declaration {
    Declaration::new(kind, id.name.as_str(), line_index.location(id.span.start))
}

fn unrecognized(
    construct: String,
    declaration: &AstDeclaration<'_>,
    line_index: &LineIndex,
) -> ClassifyError {
    let location = line_index.location(declaration.span().start);
    ClassifyError::Unrecognized {
        construct,
        line: location.line,
        column: location.column,
    }
}

fn variable_kind(kind: VariableDeclarationKind) -> DeclarationKind {
    match kind {
        VariableDeclarationKind::Var | VariableDeclarationKind::Let => DeclarationKind::Var,
        VariableDeclarationKind::Const
        | VariableDeclarationKind::Using
        | VariableDeclarationKind::AwaitUsing => DeclarationKind::Const,
    }
}

/// Every identifier bound by a pattern, in source order.
pub(crate) fn bound_identifiers<'p, 'a>(
    pattern: &'p BindingPattern<'a>,
) -> Vec<&'p BindingIdentifier<'a>> {
    let mut out = Vec::new();
    collect_bound_identifiers(pattern, &mut out);
    out
}

fn collect_bound_identifiers<'p, 'a>(
    pattern: &'p BindingPattern<'a>,
    out: &mut Vec<&'p BindingIdentifier<'a>>,
) {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(ident) => out.push(ident),
        BindingPatternKind::ObjectPattern(object) => {
            for property in object.properties.iter() {
                collect_bound_identifiers(&property.value, out);
            }
            if let Some(rest) = &object.rest {
                collect_bound_identifiers(&rest.argument, out);
            }
        }
        BindingPatternKind::ArrayPattern(array) => {
            for element in array.elements.iter().flatten() {
                collect_bound_identifiers(element, out);
            }
            if let Some(rest) = &array.rest {
                collect_bound_identifiers(&rest.argument, out);
            }
        }
        BindingPatternKind::AssignmentPattern(assignment) => {
            collect_bound_identifiers(&assignment.left, out);
        }
    }
}
