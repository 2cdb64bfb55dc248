//! Report reduction tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeMap;

use metricdump_core::protocol::catalog::{decode_catalog_page, MetricDefinition};
use metricdump_core::protocol::measures::{decode_measures, MeasureEntry};
use metricdump_core::report::{metric_filter, reduce_measures};
use metricdump_core::{ProjectKey, ProjectMetricsReport};

use vector_loader::load;

fn catalog(keys: &[&str]) -> Vec<MetricDefinition> {
    keys.iter().map(|k| MetricDefinition::new(*k)).collect()
}

#[test]
fn filter_is_ordered_and_deduplicated() {
    let cat = catalog(&["ncloc", "coverage", "ncloc", "bugs"]);
    assert_eq!(metric_filter(&cat), "ncloc,coverage,bugs");
    assert_eq!(metric_filter(&[]), "");
}

#[test]
fn m_measures_of_n_metrics_give_m_entries() {
    let cat = catalog(&["ncloc", "coverage", "bugs", "vulnerabilities"]);
    let measures = decode_measures(load("measures_ok.json")).unwrap();

    let out = reduce_measures(&cat, measures);
    assert_eq!(out.len(), 2);
    assert_eq!(out["ncloc"], "1234");
    assert_eq!(out["coverage"], "87.5");
}

#[test]
fn duplicates_keep_last_and_unknown_or_valueless_are_skipped() {
    let mut cat = decode_catalog_page(load("catalog_page1.json")).unwrap().metrics;
    cat.push(MetricDefinition::new("new_bugs"));
    let measures = decode_measures(load("measures_mixed.json")).unwrap();

    let out = reduce_measures(&cat, measures);
    let expected: BTreeMap<String, String> = [("bugs", "3"), ("ncloc", "1001")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(out, expected);
}

#[test]
fn report_serializes_with_two_space_indent() {
    let key = ProjectKey::parse("demo").unwrap();
    let report = ProjectMetricsReport::from_measures(
        &key,
        &catalog(&["ncloc"]),
        vec![MeasureEntry::new("ncloc", "42")],
    );
    let text = String::from_utf8(report.to_pretty_json().unwrap()).unwrap();
    assert_eq!(
        text,
        "{\n  \"project\": \"demo\",\n  \"metrics\": {\n    \"ncloc\": \"42\"\n  }\n}"
    );

    let back: ProjectMetricsReport = serde_json::from_str(&text).unwrap();
    assert_eq!(back, report);
}

#[test]
fn project_key_validation() {
    assert_eq!(ProjectKey::parse("org:app").unwrap().as_str(), "org:app");
    assert_eq!(
        ProjectKey::parse("org:app").unwrap().report_file_name(),
        "org:app-metrics.json"
    );

    for bad in [
        "",
        "   ",
        " demo",
        "demo\t",
        "../etc/passwd",
        "a\\b",
        "nul\0",
        "\u{FFFD}",
        "bad\u{FFFD}key",
    ] {
        let err = ProjectKey::parse(bad).unwrap_err();
        assert_eq!(err.client_code().as_str(), "BAD_REQUEST", "input={bad:?}");
    }
}
