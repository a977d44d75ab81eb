use serde::{Deserialize, Serialize};

use crate::location::SourceLocation;

/// Name used for the default export slot.
pub const DEFAULT_EXPORT: &str = "default";

/// Syntactic path through which a binding was exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportForm {
    /// `export class Class {}`
    Declaration,
    /// `export { Class }` or `export { Class as AliasedClass }`
    Specifier,
    /// `export const { Const } = { Const: "1" }`
    ///
    /// Declares and exports in a single statement.
    Destructuring,
    /// `export default ...` and `export = x`. An `export { x as default }`
    /// list entry is a [`ExportForm::Specifier`].
    Default,
    /// `export { Class } from "./module"`
    ReExport,
}

/// Association between a locally declared name and its exported name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExportBinding {
    /// Name of the binding inside the module (or inside `re_exported_from`).
    pub local: String,
    /// Name under which the binding is visible to importers.
    pub exported: String,
    pub form: ExportForm,
    /// True for `export type { ... }` and `export { type X }`.
    pub type_only: bool,
    /// Source module specifier for re-exports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub re_exported_from: Option<String>,
    pub location: SourceLocation,
}

impl ExportBinding {
    /// Binding whose exported name equals its local name.
    pub fn direct(local: impl Into<String>, form: ExportForm, location: SourceLocation) -> Self {
        let local = local.into();
        Self {
            exported: local.clone(),
            local,
            form,
            type_only: false,
            re_exported_from: None,
            location,
        }
    }

    /// Binding exported under an explicit name.
    pub fn aliased(
        local: impl Into<String>,
        exported: impl Into<String>,
        form: ExportForm,
        location: SourceLocation,
    ) -> Self {
        Self {
            local: local.into(),
            exported: exported.into(),
            form,
            type_only: false,
            re_exported_from: None,
            location,
        }
    }

    pub fn with_type_only(mut self, type_only: bool) -> Self {
        self.type_only = type_only;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.re_exported_from = Some(source.into());
        self
    }

    /// Returns true when the exported name differs from the local one.
    pub fn is_aliased(&self) -> bool {
        self.local != self.exported
    }

    /// Convenience check for the default export slot.
    pub fn is_default(&self) -> bool {
        self.exported == DEFAULT_EXPORT
    }

    /// Returns true if the binding forwards another module's export.
    pub fn is_re_export(&self) -> bool {
        matches!(self.form, ExportForm::ReExport)
    }

    /// Returns true when the binding refers to a name declared in this module.
    ///
    /// Anonymous default exports (`export default 42`) have no local name.
    pub fn has_local_binding(&self) -> bool {
        !self.is_re_export() && self.local != DEFAULT_EXPORT
    }

    /// Render the binding as it would appear inside an `export { ... }` list.
    ///
    /// Names that are not identifiers (`export { x as "kebab-name" }`) are
    /// written back as string literals.
    pub fn specifier(&self) -> String {
        let prefix = if self.type_only { "type " } else { "" };
        if self.is_aliased() {
            format!(
                "{prefix}{} as {}",
                export_name(&self.local),
                export_name(&self.exported)
            )
        } else {
            format!("{prefix}{}", export_name(&self.local))
        }
    }
}

/// Returns true when `name` can be written as a bare `IdentifierName`.
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let continues = |c: char| c.is_alphanumeric() || matches!(c, '_' | '$' | '\u{200c}' | '\u{200d}');
    (first.is_alphabetic() || first == '_' || first == '$') && chars.all(continues)
}

fn export_name(name: &str) -> String {
    if is_identifier_name(name) {
        return name.to_string();
    }
    serde_json::to_string(name).unwrap_or_else(|_| format!("\"{name}\""))
}

/// Re-serialize bindings as a single `export { ... };` statement.
///
/// Only bindings that name a local declaration take part; re-exports and
/// anonymous default exports have no local name to list.
pub fn render_export_list<'a>(bindings: impl IntoIterator<Item = &'a ExportBinding>) -> String {
    let specifiers: Vec<String> = bindings
        .into_iter()
        .filter(|binding| binding.has_local_binding())
        .map(ExportBinding::specifier)
        .collect();
    if specifiers.is_empty() {
        return "export {};".to_string();
    }
    format!("export {{ {} }};", specifiers.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: u32) -> SourceLocation {
        SourceLocation::new(line, 1)
    }

    #[test]
    fn renders_direct_and_aliased_specifiers() {
        let bindings = vec![
            ExportBinding::direct("Class", ExportForm::Specifier, at(1)),
            ExportBinding::aliased("Fn", "AliasedFn", ExportForm::Specifier, at(2)),
            ExportBinding::direct("Type", ExportForm::Specifier, at(3)).with_type_only(true),
        ];

        assert_eq!(
            render_export_list(&bindings),
            "export { Class, Fn as AliasedFn, type Type };"
        );
    }

    #[test]
    fn skips_re_exports_and_anonymous_defaults() {
        let bindings = vec![
            ExportBinding::direct("Const", ExportForm::Destructuring, at(1)),
            ExportBinding::direct("Other", ExportForm::ReExport, at(2)).with_source("./other"),
            ExportBinding::direct(DEFAULT_EXPORT, ExportForm::Default, at(3)),
            ExportBinding::aliased("Main", DEFAULT_EXPORT, ExportForm::Default, at(4)),
        ];

        assert_eq!(
            render_export_list(&bindings),
            "export { Const, Main as default };"
        );
    }

    #[test]
    fn string_names_are_quoted() {
        let bindings = vec![
            ExportBinding::aliased("value", "kebab-name", ExportForm::Specifier, at(1)),
            ExportBinding::aliased("other", "with \"quotes\"", ExportForm::Specifier, at(2)),
            ExportBinding::aliased("Ünïcode", "$ok_1", ExportForm::Specifier, at(3)),
        ];

        assert_eq!(
            render_export_list(&bindings),
            r#"export { value as "kebab-name", other as "with \"quotes\"", Ünïcode as $ok_1 };"#
        );
    }

    #[test]
    fn identifier_names() {
        assert!(is_identifier_name("Class"));
        assert!(is_identifier_name("_private$"));
        assert!(!is_identifier_name(""));
        assert!(!is_identifier_name("1st"));
        assert!(!is_identifier_name("kebab-name"));
        assert!(!is_identifier_name("has space"));
    }

    #[test]
    fn aliasing_is_derived_from_names() {
        let direct = ExportBinding::direct("Enum", ExportForm::Specifier, at(1));
        let aliased = ExportBinding::aliased("Enum", "AliasedEnum", ExportForm::Specifier, at(1));
        assert!(!direct.is_aliased());
        assert!(aliased.is_aliased());
        assert!(!aliased.is_default());
    }
}
