//! Shared output formatting for lint results.

use anyhow::Result;
use procedure_lint_core::{LintResult, ViolationDiagnostic};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    print!("{}", render_text(result));
    print_summary(result);
}

/// Renders every violation as a block followed by a blank line.
fn render_text(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(|violation| format!("{}\n", violation.format()))
        .collect()
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s), {} class(es)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked, result.classes_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

fn print_pretty(result: &LintResult) {
    for violation in &result.violations {
        let report = miette::Report::new(ViolationDiagnostic::from(violation));
        eprintln!("{report:?}");
    }

    print_summary(result);
}
