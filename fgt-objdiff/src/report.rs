use colored::{ColoredString, Colorize};
use fgt_objdiff_core::format::{format_summary, NO_VALUE, OBJECT_MISSING};
use fgt_objdiff_core::report::{Cell, ComparisonReport, ReportSummary};
use fgt_objdiff_core::ClassifiedToken;

use crate::inspect::InspectReport;

/// Render a comparison report for terminal output.
///
/// Each item is painted on its classification color; items seen in only one column
/// are also bold so they stand out without color support.
pub fn render_text(report: &ComparisonReport) -> String {
    let mut out = Vec::new();

    for row in &report.rows {
        out.push(format!(
            "{} {} {}",
            format!("#{}", row.number).bold(),
            row.object_type.blue(),
            format!("\"{}\"", row.name).bold()
        ));
        for property in &row.properties {
            out.push(format!("  {}", property.property.yellow()));
            for (header, cell) in report.columns.iter().zip(&property.cells) {
                let label = header.label.replace('\n', "");
                out.push(format!("    {label}: {}", render_cell(cell)));
            }
        }
    }

    out.join("\n")
}

/// Render summary counts for terminal output.
pub fn render_summary(summary: &ReportSummary) -> String {
    format_summary(summary).cyan().to_string()
}

/// Render per-tenant object counts of one parsed file.
pub fn render_inspect(report: &InspectReport) -> String {
    let mut out = Vec::new();
    out.push(format!(
        "source={} multi_tenant={} objects={}",
        report.source, report.multi_tenant, report.objects
    ));
    for tenant in &report.tenants {
        out.push(format!("tenant {}", tenant.name.bold()));
        for object_type in &tenant.types {
            out.push(format!("  {}: {}", object_type.object_type, object_type.objects));
        }
    }
    for warning in &report.warnings {
        out.push(format!("warning: {warning}").yellow().to_string());
    }
    out.join("\n")
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::ObjectMissing => OBJECT_MISSING.dimmed().to_string(),
        Cell::NoValue => NO_VALUE.italic().to_string(),
        Cell::Value { tokens } => tokens
            .iter()
            .map(|token| paint(token).to_string())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn paint(token: &ClassifiedToken) -> ColoredString {
    let text = format!("\"{}\"", token.token);
    let painted = match parse_hex(&token.color) {
        Some((r, g, b)) => text.black().on_truecolor(r, g, b),
        None => text.normal(),
    };
    if token.duplicate {
        painted
    } else {
        painted.bold()
    }
}

/// Parse `#rrggbb`.
fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
