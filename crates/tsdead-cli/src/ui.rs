//! Terminal output for analysis results and module records.
//!
//! Status lines go to stderr; reports go to stdout.

use console::style;
use tsdead::{AnalysisResults, ExportForm, ModuleRecord};

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR, falls back to terminal detection.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    console::user_attended_stderr()
}

/// Configure console styling for the process.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}

pub fn success(message: &str) {
    eprintln!("{} {}", style("✔").green().bold(), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), style(message).yellow());
}

/// Render unused exports, one module per block.
pub fn render_results(results: &AnalysisResults) -> String {
    let mut out = String::new();
    for (module, module_results) in results {
        out.push_str(&format!("{}\n", style(module).bold().underlined()));
        for unused in &module_results.unused_exports {
            let name = if unused.exported == unused.local || unused.form == ExportForm::ReExport {
                unused.exported.clone()
            } else {
                format!("{} (as {})", unused.local, unused.exported)
            };
            out.push_str(&format!(
                "  {}  {}  {}\n",
                style(unused.location).dim(),
                style(name).red(),
                style(form_label(unused.form)).dim()
            ));
        }
    }
    out
}

/// Render the declarations and export bindings of one module.
pub fn render_record(record: &ModuleRecord) -> String {
    let mut out = format!("{}\n", style(&record.id).bold().underlined());

    out.push_str(&format!("{}\n", style("declarations").cyan()));
    for declaration in &record.declarations {
        out.push_str(&format!(
            "  {}  {:<10} {}\n",
            style(declaration.location).dim(),
            declaration.kind.as_str(),
            declaration.name
        ));
    }

    out.push_str(&format!("{}\n", style("exports").cyan()));
    for binding in &record.exports {
        let mut line = format!(
            "  {}  {:<13} {}",
            style(binding.location).dim(),
            form_label(binding.form),
            binding.specifier()
        );
        if let Some(source) = &binding.re_exported_from {
            line.push_str(&format!(" from {source:?}"));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn form_label(form: ExportForm) -> &'static str {
    match form {
        ExportForm::Declaration => "declaration",
        ExportForm::Specifier => "list",
        ExportForm::Destructuring => "destructuring",
        ExportForm::Default => "default",
        ExportForm::ReExport => "re-export",
    }
}
