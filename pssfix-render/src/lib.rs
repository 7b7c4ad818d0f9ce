//! Rendering helpers (markdown) for human-readable artifacts.

use pssfix_types::report::{CorrectionReport, ReportSummary};

pub fn render_corrections_md(report: &CorrectionReport) -> String {
    let mut out = String::new();
    out.push_str("# pssfix corrections\n\n");
    out.push_str(&format!("- Result: `{}`\n", report.result_name));
    out.push_str(&format!("- {}\n", render_summary_line(&report.summary)));
    out.push_str(&format!(
        "- Uncorrected divergences: {}\n",
        report.summary.uncorrected
    ));
    out.push_str(&format!("- Inputs: {}", report.inputs.len()));
    if report.summary.skipped_inputs > 0 {
        out.push_str(&format!(
            " (skipped {})",
            report.summary.skipped_inputs
        ));
    }
    out.push_str("\n\n");

    let failed: Vec<_> = report.inputs.iter().filter(|i| i.error.is_some()).collect();
    if !failed.is_empty() {
        out.push_str("## Skipped inputs\n\n");
        for input in failed {
            let reason = input.error.as_deref().unwrap_or("-");
            out.push_str(&format!("- `{}`: {}\n", input.path, reason));
        }
        out.push('\n');
    }

    out.push_str("## Corrections\n\n");
    if report.corrections.is_empty() {
        out.push_str("_No corrections provided._\n");
        return out;
    }

    out.push_str(&table_row(&report.header));
    out.push_str(&format!(
        "|{}\n",
        "---|".repeat(report.header.len())
    ));
    for c in &report.corrections {
        out.push_str(&table_row(&c.row));
    }

    out
}

/// One-line batch summary, e.g. "2 corrections for 3 received divergences provided".
pub fn render_summary_line(summary: &ReportSummary) -> String {
    format!(
        "{} corrections for {} received divergences provided",
        summary.provided, summary.received
    )
}

fn table_row(cells: &[String]) -> String {
    let mut out = String::from("|");
    for cell in cells {
        out.push(' ');
        out.push_str(&table_cell(cell));
        out.push_str(" |");
    }
    out.push('\n');
    out
}

fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br>")
}
