// ABOUTME: Property tests for the recursive data sanitizer and unit conversions
// ABOUTME: Idempotence, denylist at depth, zero-vs-empty asymmetry and embedded JSON recovery
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use gateway_core::sanitize::{sanitize, sanitize_document};
use gateway_core::units::{grams_to_kg, meters_to_km, safe_convert, seconds_to_minutes};
use serde_json::{json, Value};

fn samples() -> Vec<Value> {
    vec![
        json!(null),
        json!(0),
        json!([0, 0]),
        json!({"a": 0}),
        json!("plain text"),
        json!(r#"{""x"":1}"#),
        json!({
            "activityId": 99,
            "ownerId": 123,
            "summary": {"distance": 0.0, "calories": 410, "userRoles": ["ADMIN"]},
            "laps": [{"n": 1, "permissionId": 7}, {"n": 0}, null, []],
            "raw": "{\"inner\": {\"userProfilePk\": 5, \"keep\": \"yes\"}}",
            "steps": [{"endConditionCompareType": "gt", "stepOrder": 1}],
            "flag": false
        }),
        json!([[], [0], [{"ownerId": 1}], "[1, 0, 2]"]),
        json!({"nested": {"deeper": {"deepest": {"equipmentTypeId": 3}}}}),
    ]
}

fn contains_key(value: &Value, key: &str) -> bool {
    match value {
        Value::Object(map) => map.contains_key(key) || map.values().any(|v| contains_key(v, key)),
        Value::Array(items) => items.iter().any(|v| contains_key(v, key)),
        _ => false,
    }
}

#[test]
fn test_sanitize_is_idempotent() {
    for sample in samples() {
        let once = sanitize(sample.clone());
        let twice = once.clone().and_then(sanitize);
        assert_eq!(once, twice, "not idempotent for {sample}");
    }
}

#[test]
fn test_denylisted_keys_removed_at_any_depth() {
    for sample in samples() {
        let cleaned = sanitize_document(sample);
        for key in ["ownerId", "userProfilePk", "permissionId", "userRoles", "equipmentTypeId"] {
            assert!(!contains_key(&cleaned, key), "{key} survived in {cleaned}");
        }
        assert!(!contains_key(&cleaned, "endConditionCompareType"));
    }
}

#[test]
fn test_owner_id_dropped_next_to_valid_keys() {
    let cleaned = sanitize(json!({"ownerId": 123, "name": "Run", "inner": {"ownerId": 1, "hr": 140}}));
    assert_eq!(cleaned, Some(json!({"name": "Run", "inner": {"hr": 140}})));
}

#[test]
fn test_zero_mapping_is_absent_but_zero_sequence_is_empty() {
    assert_eq!(sanitize(json!({"a": 0})), None);
    assert_eq!(sanitize(json!([0, 0])), Some(json!([])));
    assert_eq!(sanitize_document(json!({"a": 0})), json!({}));
}

#[test]
fn test_empty_child_mapping_is_dropped_but_empty_sequence_kept() {
    assert_eq!(
        sanitize(json!({"gone": {"x": null}, "kept": [], "v": 1})),
        Some(json!({"kept": [], "v": 1}))
    );
}

#[test]
fn test_doubled_quote_string_becomes_structure() {
    assert_eq!(sanitize(json!(r#"{""x"":1}"#)), Some(json!({"x": 1})));
    assert_eq!(
        sanitize(json!({"payload": r#"{""x"":1,""ownerId"":2,""z"":0}"#})),
        Some(json!({"payload": {"x": 1}}))
    );
}

#[test]
fn test_unit_conversions_are_exact_and_total() {
    assert_eq!(safe_convert(Some(1000.0), meters_to_km), Some(1.0));
    assert_eq!(safe_convert(Some(90.0), seconds_to_minutes), Some(1.5));
    assert_eq!(safe_convert(Some(500.0), grams_to_kg), Some(0.5));
    assert_eq!(safe_convert(None, meters_to_km), None);
    assert_eq!(safe_convert(None, seconds_to_minutes), None);
    assert_eq!(safe_convert(None, grams_to_kg), None);
}

#[test]
fn test_false_flags_removed_from_activity_payloads() {
    let cleaned = sanitize_document(json!({
        "activityName": "Run",
        "favorite": false,
        "pr": false,
        "manualActivity": true,
        "splits": [false, {"hasSplits": false, "n": 2}]
    }));
    assert_eq!(
        cleaned,
        json!({"activityName": "Run", "manualActivity": true, "splits": [{"n": 2}]})
    );
}
