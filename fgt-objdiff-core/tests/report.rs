use std::path::PathBuf;

use fgt_objdiff_core::format::text::{NO_VALUE, OBJECT_MISSING};
use fgt_objdiff_core::{
    build_filtered_report, build_report, compare_texts, format_json, format_summary, format_text,
    load_file, Cell, Comparison, DiffFilter, NormalizeOptions, ReportOptions,
};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn fixture_run() -> Comparison {
    let a = load_file(&fixture("fixtures/fgt-a.conf")).expect("fixture a");
    let b = load_file(&fixture("fixtures/fgt-b.conf")).expect("fixture b");
    compare_texts([("fgt-a.conf", a), ("fgt-b.conf", b)], &NormalizeOptions::standard())
        .expect("two columns")
}

#[test]
fn rows_follow_type_order_then_name() {
    let run = fixture_run();
    let report = build_report(&run.index, &run.diffs, &ReportOptions::default());

    let rows: Vec<(usize, &str)> = report
        .rows
        .iter()
        .map(|row| (row.number, row.name.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![(1, "srv1"), (2, "web-01"), (3, "backends"), (4, "HTTPS-ALT")]
    );
    assert_eq!(report.summary.columns, 2);
    assert_eq!(report.summary.objects, 7);
    assert_eq!(report.summary.differing_properties, 5);
}

#[test]
fn missing_object_and_missing_value_are_distinct_cells() {
    let text = |body: &str| format!("config firewall address\n{body}end\n");
    let run = compare_texts(
        [
            ("F1", text("edit \"h\"\nset comment \"x\"\nnext\n")),
            ("F2", text("edit \"h\"\nnext\n")),
            ("F3", text("")),
        ],
        &NormalizeOptions::standard(),
    )
    .expect("three columns");
    let report = build_report(&run.index, &run.diffs, &ReportOptions::default());

    let cells = &report.rows[0].properties[0].cells;
    assert!(matches!(&cells[0], Cell::Value { tokens } if tokens[0].token == "x"));
    assert_eq!(cells[1], Cell::NoValue);
    assert_eq!(cells[2], Cell::ObjectMissing);

    let text = format_text(&report);
    assert!(text.contains(&format!("F2[root]: {NO_VALUE}")));
    assert!(text.contains(&format!("F3[root]: {OBJECT_MISSING}")));
    assert!(text.contains("F1[root]: !\"x\""));
}

#[test]
fn filter_narrows_by_type_property_name_and_value() {
    let run = fixture_run();

    let by_type = DiffFilter {
        types: vec!["service".to_string()],
        ..DiffFilter::default()
    };
    let view = by_type.apply(&run.diffs);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].key.name, "HTTPS-ALT");

    let by_property = DiffFilter {
        properties: vec!["MEMBER".to_string()],
        ..DiffFilter::default()
    };
    let view = by_property.apply(&run.diffs);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].properties.len(), 1);
    assert_eq!(view[0].properties[0].0, "member");

    let by_value = DiffFilter {
        value: Some("10.0.0.2".to_string()),
        ..DiffFilter::default()
    };
    assert_eq!(by_value.apply(&run.diffs)[0].key.name, "srv1");

    let by_name = DiffFilter {
        name: Some("WEB".to_string()),
        ..DiffFilter::default()
    };
    let names: Vec<&str> = by_name
        .apply(&run.diffs)
        .iter()
        .map(|o| o.key.name.as_str())
        .collect();
    assert_eq!(names, vec!["web-01"]);
}

#[test]
fn inverted_filter_excludes_matching_properties() {
    let run = fixture_run();
    let filter = DiffFilter {
        properties: vec!["member".to_string()],
        invert: true,
        ..DiffFilter::default()
    };
    let view = filter.apply(&run.diffs);
    assert!(view
        .iter()
        .flat_map(|o| o.properties.iter())
        .all(|(property, _)| *property != "member"));
    assert_eq!(view.len(), 4);

    let report = build_filtered_report(&run.index, &view, &ReportOptions::default());
    assert_eq!(report.summary.differing_properties, 4);
}

#[test]
fn json_and_summary_formats() {
    let run = fixture_run();
    let report = build_report(&run.index, &run.diffs, &ReportOptions::default());

    let json: serde_json::Value = serde_json::from_str(&format_json(&report)).expect("valid json");
    assert_eq!(json["columns"][0]["label"], "fgt-a.conf\n[root]");
    assert_eq!(json["rows"][0]["properties"][0]["cells"][1]["state"], "value");
    assert_eq!(json["summary"]["differing_objects"], 4);

    assert_eq!(
        format_summary(&report.summary),
        "columns=2 objects=7 differing_objects=4 differing_properties=5"
    );
}

#[test]
fn same_file_name_in_different_directories_gets_full_labels() {
    let text = |subnet: &str| {
        format!("config firewall address\nedit \"h\"\nset subnet {subnet}\nnext\nend\n")
    };
    let run = compare_texts(
        [
            ("site1/fgt.conf", text("1.1.1.1/32")),
            ("site2/fgt.conf", text("2.2.2.2/32")),
            ("other.conf", text("3.3.3.3/32")),
        ],
        &NormalizeOptions::standard(),
    )
    .expect("three columns");
    let report = build_report(&run.index, &run.diffs, &ReportOptions::default());

    let labels: Vec<&str> = report.columns.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["site1/fgt.conf\n[root]", "site2/fgt.conf\n[root]", "other.conf\n[root]"]
    );
    let text = format_text(&report);
    assert!(text.contains("site1/fgt.conf[root]: !\"1.1.1.1/32\""));
    assert!(text.contains("site2/fgt.conf[root]: !\"2.2.2.2/32\""));
}
