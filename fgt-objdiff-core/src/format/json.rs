use crate::report::ComparisonReport;

/// Format a comparison report as pretty-printed JSON.
pub fn format_json(report: &ComparisonReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}
