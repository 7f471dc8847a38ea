use crate::render::render_file;
use anyhow::{Result, bail};
use colored::Colorize;
use std::path::Path;
use trellis_ui::validation::FieldReport;
use trellis_ui::{ElementId, Renderer, UiTree};

pub struct ValidateOptions<'a> {
    pub file: &'a Path,
    pub values: &'a [(String, String)],
}

/// Render, apply `--set` values, validate, print per-field results.
/// Returns whether everything passed.
pub fn run_validate(renderer: &Renderer, options: &ValidateOptions<'_>) -> Result<bool> {
    let mut tree = render_file(renderer, options.file)?;
    apply_values(&mut tree, options.values)?;

    let reports = validate_all(renderer, &mut tree)?;
    print_reports(&tree, &reports);
    Ok(reports.iter().all(FieldReport::is_valid))
}

/// Set the live value of each named field; toggles are checked unless the
/// value is empty, `false` or `off`
pub fn apply_values(tree: &mut UiTree, values: &[(String, String)]) -> Result<()> {
    for (name, value) in values {
        let Some(id) = tree.find_by_name(name) else {
            bail!("No field named `{}` in the document", name);
        };
        let is_toggle = tree.get(id).is_some_and(|e| e.is_toggle());
        if is_toggle {
            let checked = !matches!(value.as_str(), "" | "false" | "off");
            tree.set_checked(id, checked)?;
        } else {
            tree.set_value(id, value.clone())?;
        }
    }
    Ok(())
}

/// Validate every form, or the whole tree when it has none
pub fn validate_all(renderer: &Renderer, tree: &mut UiTree) -> Result<Vec<FieldReport>> {
    let mut scopes = tree.find_by_tag("form");
    if scopes.is_empty() {
        scopes = tree.roots().to_vec();
    }

    let mut reports = Vec::new();
    for scope in scopes {
        reports.extend(renderer.validation().validate_scope(tree, scope)?);
    }
    Ok(reports)
}

fn field_label(tree: &UiTree, report: &FieldReport) -> String {
    if let Some(name) = &report.name {
        return name.clone();
    }
    match tree.get(report.element).and_then(|e| e.attribute_str("id")) {
        Some(id) => format!("#{id}"),
        None => format!("<element {}>", ElementId::index(report.element)),
    }
}

fn print_reports(tree: &UiTree, reports: &[FieldReport]) {
    if reports.is_empty() {
        println!("{}", "No fields with validation rules".dimmed());
        return;
    }

    for report in reports {
        let label = field_label(tree, report);
        if report.is_valid() {
            println!("  {} {}", "✓".green(), label);
        } else {
            println!("  {} {}: {}", "✗".red(), label.bold(), report.message().red());
        }
    }

    let failed = reports.iter().filter(|r| !r.is_valid()).count();
    println!();
    if failed == 0 {
        println!("{}", format!("All {} field(s) valid", reports.len()).green());
    } else {
        println!(
            "{}",
            format!("{} of {} field(s) invalid", failed, reports.len()).yellow()
        );
    }
}
