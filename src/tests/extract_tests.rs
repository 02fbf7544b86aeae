// src/tests/extract_tests.rs

use crate::capture::CaptureError;
use crate::config::ExtractConfig;
use crate::errors::AppError;
use crate::pipeline::{ExtractOutcome, Extractor};
use crate::tests::utils::{scratch_paths, HarBuilder};
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;

fn config_for(capture: &Path, output: &Path) -> ExtractConfig {
    ExtractConfig {
        capture_path: capture.to_path_buf(),
        output_path: output.to_path_buf(),
        ..Default::default()
    }
}

fn run(config: ExtractConfig) -> Result<ExtractOutcome, AppError> {
    Extractor::new(config)?.run()
}

/// Output rows keyed by column name.
fn read_rows(path: &Path) -> Vec<HashMap<String, String>> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().clone();

    reader
        .records()
        .map(|r| {
            let record = r.unwrap();
            headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect()
        })
        .collect()
}

fn sold_search_body() -> serde_json::Value {
    json!({"data": {"soldSearchByQuery": {"results": {"items": [
        {
            "id": "A1",
            "address": {"display": "1 Smith St, Essendon"},
            "price": {"display": "$900,000"},
            "bedrooms": 3
        }
    ]}}}})
}

#[test]
fn graphql_capture_produces_one_row() {
    let dir = tempfile::tempdir().unwrap();
    let (capture, output) = scratch_paths(&dir);
    HarBuilder::new()
        .json_response("https://lexa.example.com.au/graphql", &sold_search_body())
        .write_to(&capture);

    let outcome = run(config_for(&capture, &output)).unwrap();

    match &outcome {
        ExtractOutcome::Written { path, report } => {
            assert_eq!(path, &output);
            assert_eq!(report.rows_written, 1);
            assert_eq!(report.arrays_matched, 1);
            assert_eq!(report.json_bodies, 1);
        }
        other => panic!("expected rows to be written, got {other:?}"),
    }

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "A1");
    assert_eq!(rows[0]["sold_price"], "900000.0");
    assert_eq!(rows[0]["bedrooms"], "3");
    assert_eq!(rows[0]["address_display"], "1 Smith St, Essendon");
    assert_eq!(rows[0]["sold_price_display"], "$900,000");
    assert_eq!(rows[0]["bathrooms"], "");
    assert_eq!(rows[0]["suburb"], "");
}

#[test]
fn rerunning_gives_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let (capture, output) = scratch_paths(&dir);
    HarBuilder::new()
        .json_response("https://lexa.example.com.au/graphql", &sold_search_body())
        .html_response(
            "https://www.example.com.au/sold/in-burwood/list-1",
            r#"<script>window.__INITIAL_STATE__ = {"list": [
                {"displayAddress": "5 Park Ln", "location": {"suburb": "Burwood"}, "priceText": "$1.2m"}
            ]};</script>"#,
        )
        .write_to(&capture);

    run(config_for(&capture, &output)).unwrap();
    let first = std::fs::read(&output).unwrap();

    run(config_for(&capture, &output)).unwrap();
    let second = std::fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[test]
fn missing_capture_is_fatal_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (capture, output) = scratch_paths(&dir);

    let err = run(config_for(&capture, &output)).unwrap_err();

    assert!(matches!(err, AppError::Capture(CaptureError::NotFound(_))));
    assert!(err.to_string().contains("network.har"));
    assert!(!output.exists());
}

#[test]
fn capture_without_listings_is_an_empty_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let (capture, output) = scratch_paths(&dir);
    HarBuilder::new()
        .json_response("https://example.com/config", &json!({"flags": [{"id": 1}]}))
        .html_response("https://example.com/", "<p>Nothing here</p>")
        .raw_entry(json!({ "request": { "url": "https://example.com/img.png" } }))
        .write_to(&capture);

    let outcome = run(config_for(&capture, &output)).unwrap();

    match outcome {
        ExtractOutcome::Empty { report } => {
            assert_eq!(report.entries_read, 3);
            assert_eq!(report.entries_without_body, 1);
            assert_eq!(report.arrays_checked, 1);
            assert_eq!(report.rows_written, 0);
        }
        other => panic!("expected an empty outcome, got {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn mixed_sources_are_merged_and_deduplicated() {
    let dir = tempfile::tempdir().unwrap();
    let (capture, output) = scratch_paths(&dir);

    let page_two = json!({"data": {"soldSearchByQuery": {"results": {"items": [
        {"id": "A1", "address": {"display": "1 Smith St, Essendon"}, "price": {"display": "$1"}},
        {"id": "B2", "address": {"display": "2 Jones Rd, Bentleigh", "suburb": "Bentleigh"},
         "soldDetails": {"displayPrice": "$1,050,000", "soldDate": "2024-02-01"}}
    ]}}}});
    let ld_json = r#"<html><head><script type="application/ld+json">
        {"itemListElement": [{"id": "C3", "address": {"display": "3 Long Ave"}, "suburb": "Burwood",
                              "price": {"display": "Contact Agent"}}]}
    </script></head></html>"#;

    HarBuilder::new()
        .json_response("https://lexa.example.com.au/graphql", &sold_search_body())
        .base64_response(
            "https://lexa.example.com.au/graphql",
            "application/json",
            &page_two.to_string(),
        )
        .raw_entry(json!({ "response": { "content": {
            "mimeType": "application/json", "text": "{ truncated" } } }))
        .html_response("https://www.example.com.au/property-3", ld_json)
        .write_to(&capture);

    let outcome = run(config_for(&capture, &output)).unwrap();
    assert_eq!(outcome.report().duplicates_dropped, 1);
    assert_eq!(outcome.report().records_flattened, 4);

    let rows = read_rows(&output);
    let ids: Vec<&str> = rows.iter().map(|r| r["id"].as_str()).collect();
    assert_eq!(ids, vec!["A1", "B2", "C3"]);

    // First occurrence wins.
    assert_eq!(rows[0]["sold_price"], "900000.0");
    assert_eq!(rows[1]["sold_price"], "1050000.0");
    assert_eq!(rows[1]["sale_date"], "2024-02-01");
    assert_eq!(rows[1]["suburb"], "Bentleigh");
    assert_eq!(rows[2]["sold_price"], "");
}

#[test]
fn script_bodies_are_scanned_for_state() {
    let dir = tempfile::tempdir().unwrap();
    let (capture, output) = scratch_paths(&dir);
    HarBuilder::new()
        .script_response(
            "https://www.example.com.au/static/sold-bundle.js",
            r#"window.__INITIAL_STATE__ = {"soldResults": {"list": [
                {"id": "D4", "displayAddress": "4 Hill Cres", "location": {"suburb": "Kew"},
                 "price": {"display": "$2,000,000"}}
            ]}};
            window.NOT__INITIAL_STATE__ = {"list": [{"id": "X", "address": "nope", "price": "$1"}]};"#,
        )
        .write_to(&capture);

    let outcome = run(config_for(&capture, &output)).unwrap();
    assert_eq!(outcome.report().script_bodies, 1);
    assert_eq!(outcome.report().html_bodies, 0);
    assert_eq!(outcome.report().rows_written, 1);

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "D4");
    assert_eq!(rows[0]["suburb"], "Kew");
    assert_eq!(rows[0]["sold_price"], "2000000.0");
}

#[test]
fn operation_filter_limits_scanned_entries() {
    let dir = tempfile::tempdir().unwrap();
    let (capture, output) = scratch_paths(&dir);

    let buy = json!({"data": {"buySearch": {"results": [
        {"id": "Z9", "address": {"display": "9 Other St"}, "price": {"display": "$5"}}
    ]}}});

    HarBuilder::new()
        .graphql_response("https://lexa.example.com.au/graphql", "soldSearchByQuery", &sold_search_body())
        .graphql_response("https://lexa.example.com.au/graphql", "buySearch", &buy)
        .write_to(&capture);

    let mut config = config_for(&capture, &output);
    config.filters.operation_name = Some("soldSearchByQuery".to_string());

    let outcome = run(config).unwrap();
    assert_eq!(outcome.report().entries_filtered, 1);

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "A1");
}

#[test]
fn markup_scanning_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let (capture, output) = scratch_paths(&dir);
    HarBuilder::new()
        .html_response(
            "https://www.example.com.au/sold",
            r#"<script>__INITIAL_STATE__ = {"l": [{"address": "x", "price": "y"}]};</script>"#,
        )
        .write_to(&capture);

    let mut config = config_for(&capture, &output);
    config.scan_markup = false;

    let outcome = run(config).unwrap();
    assert!(matches!(outcome, ExtractOutcome::Empty { .. }));
    assert_eq!(outcome.report().html_bodies, 0);
}
