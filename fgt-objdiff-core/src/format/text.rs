use crate::report::{Cell, ComparisonReport, ReportSummary};

/// Placeholder for a column where the object does not exist.
pub const OBJECT_MISSING: &str = "Object missing";
/// Placeholder for a present object without this property.
pub const NO_VALUE: &str = "No property value";

/// Format a report as plain text.
///
/// Items found in only one column are prefixed with `!`.
pub fn format_text(report: &ComparisonReport) -> String {
    let mut lines = Vec::new();
    for row in &report.rows {
        lines.push(format!("#{} {} \"{}\"", row.number, row.object_type, row.name));
        for property in &row.properties {
            lines.push(format!("  {}", property.property));
            for (header, cell) in report.columns.iter().zip(&property.cells) {
                let column = header.label.replace('\n', "");
                lines.push(format!("    {column}: {}", format_cell(cell)));
            }
        }
    }
    lines.join("\n")
}

/// Render one cell's content without colors.
pub fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::ObjectMissing => OBJECT_MISSING.to_string(),
        Cell::NoValue => NO_VALUE.to_string(),
        Cell::Value { tokens } => tokens
            .iter()
            .map(|t| {
                if t.duplicate {
                    format!("\"{}\"", t.token)
                } else {
                    format!("!\"{}\"", t.token)
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Format summary counts.
pub fn format_summary(summary: &ReportSummary) -> String {
    format!(
        "columns={} objects={} differing_objects={} differing_properties={}",
        summary.columns, summary.objects, summary.differing_objects, summary.differing_properties
    )
}
