use std::path::PathBuf;

use fgt_objdiff_core::{
    compare_texts, load_file, CompareError, Column, CrossSourceIndex, NormalizeOptions, ObjectKey,
};
use pretty_assertions::assert_eq;

const ADDRESS: &str = "config firewall address";
const ADDRGRP: &str = "config firewall addrgrp";

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn address(name: &str, props: &[(&str, &str)]) -> String {
    let mut text = format!("config firewall address\n    edit \"{name}\"\n");
    for (key, value) in props {
        text.push_str(&format!("        set {key} {value}\n"));
    }
    text.push_str("    next\nend\n");
    text
}

#[test]
fn scenario_a_differing_subnet_is_reported() {
    let run = compare_texts(
        [
            ("F1", address("srv1", &[("subnet", "10.0.0.1/32")])),
            ("F2", address("srv1", &[("subnet", "10.0.0.2/32")])),
        ],
        &NormalizeOptions::standard(),
    )
    .expect("two columns");

    let subnet = run
        .diffs
        .property(&ObjectKey::new(ADDRESS, "srv1"), "subnet")
        .expect("subnet differs");
    let rendered: Vec<(String, &str)> = subnet
        .iter()
        .map(|(column, value)| (column.to_string(), value.as_str()))
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("F1[root]".to_string(), "10.0.0.1/32"),
            ("F2[root]".to_string(), "10.0.0.2/32"),
        ]
    );
}

#[test]
fn scenario_b_identical_values_are_excluded() {
    let text = address("srv1", &[("subnet", "10.0.0.1/32"), ("uuid", "aaaa")]);
    let other = address("srv1", &[("subnet", "10.0.0.1/32"), ("uuid", "bbbb")]);
    let run = compare_texts([("F1", text), ("F2", other)], &NormalizeOptions::standard())
        .expect("two columns");
    assert!(run.diffs.is_empty());
}

#[test]
fn scenario_c_object_in_one_column_is_indexed_but_not_diffed() {
    let run = compare_texts(
        [
            ("F1", address("srv1", &[("subnet", "10.0.0.1/32")])),
            ("F2", address("other", &[("subnet", "10.0.0.9/32")])),
        ],
        &NormalizeOptions::standard(),
    )
    .expect("two columns");

    let key = ObjectKey::new(ADDRESS, "srv1");
    assert!(run.diffs.get(&key).is_none());
    let per_column = run.index.get(&key).expect("indexed");
    let columns: Vec<&Column> = per_column.keys().collect();
    assert_eq!(columns, vec![&Column::new("F1", "root")]);
    assert!(!run.index.is_present(&key, &Column::new("F2", "root")));
}

#[test]
fn scenario_d_member_order_is_ignored() {
    let group = |members: &str| {
        format!("config firewall addrgrp\n    edit \"g\"\n        set member {members}\n    next\nend\n")
    };
    let run = compare_texts(
        [("F1", group("\"b\" \"a\"")), ("F2", group("\"a\" \"b\""))],
        &NormalizeOptions::standard(),
    )
    .expect("two columns");
    assert!(run.diffs.get(&ObjectKey::new(ADDRGRP, "g")).is_none());
}

#[test]
fn unset_property_differs_from_set_one_but_missing_object_does_not() {
    let run = compare_texts(
        [
            ("F1", address("srv1", &[("comment", "\"dmz host\"")])),
            ("F2", address("srv1", &[])),
            ("F3", address("unrelated", &[])),
        ],
        &NormalizeOptions::standard(),
    )
    .expect("three columns");

    let comment = run
        .diffs
        .property(&ObjectKey::new(ADDRESS, "srv1"), "comment")
        .expect("comment differs");
    assert_eq!(comment.len(), 2);
    assert_eq!(comment[&Column::new("F2", "root")], "");
    assert!(!comment.contains_key(&Column::new("F3", "root")));
}

#[test]
fn one_column_is_a_precondition_error() {
    let err = compare_texts(
        [("F1", address("srv1", &[("subnet", "10.0.0.1/32")]))],
        &NormalizeOptions::standard(),
    )
    .expect_err("single column");
    assert_eq!(err, CompareError::InsufficientColumns { columns: 1 });

    let empty = CrossSourceIndex::build(&[]);
    assert_eq!(
        fgt_objdiff_core::diff(&empty),
        Err(CompareError::InsufficientColumns { columns: 0 })
    );
}

#[test]
fn fixtures_report_expected_differences() {
    let a = load_file(&fixture("fixtures/fgt-a.conf")).expect("fixture a");
    let b = load_file(&fixture("fixtures/fgt-b.conf")).expect("fixture b");

    let run = compare_texts([("fgt-a.conf", &a), ("fgt-b.conf", &b)], &NormalizeOptions::standard())
        .expect("two columns");

    let differing: Vec<String> = run.diffs.iter().map(|(key, _)| key.name.clone()).collect();
    assert_eq!(differing, vec!["srv1", "web-01", "backends", "HTTPS-ALT"]);
    assert_eq!(run.diffs.property_count(), 5);

    let backends = run
        .diffs
        .get(&ObjectKey::new(ADDRGRP, "backends"))
        .expect("backends differ");
    let names: Vec<&str> = backends.properties.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["member", "color"]);

    let relaxed = compare_texts(
        [("fgt-a.conf", &a), ("fgt-b.conf", &b)],
        &NormalizeOptions::ignore_associated_interface(),
    )
    .expect("two columns");
    assert!(relaxed.diffs.get(&ObjectKey::new(ADDRESS, "web-01")).is_none());
}

#[test]
fn tenants_of_one_file_are_compared_with_each_other() {
    let text = load_file(&fixture("fixtures/fgt-multi-vdom.conf")).expect("fixture");
    let run = compare_texts([("fgt-multi-vdom.conf", &text)], &NormalizeOptions::standard())
        .expect("two tenants");

    let columns: Vec<String> = run.index.columns().iter().map(ToString::to_string).collect();
    assert_eq!(columns, vec!["fgt-multi-vdom.conf[root]", "fgt-multi-vdom.conf[dmz]"]);

    let differing: Vec<String> = run.diffs.iter().map(|(key, _)| key.name.clone()).collect();
    assert_eq!(differing, vec!["shared", "APP"]);
}
