// ABOUTME: Recursive cleaner for Garmin JSON payloads before they leave the gateway
// ABOUTME: Drops null/zero/internal fields and re-parses JSON that arrives encoded as strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data sanitizer
//!
//! Garmin documents carry internal identifiers, zero used as an "unset"
//! marker, and sub-objects double-encoded as strings. [`sanitize`] turns
//! them into a minimal JSON tree:
//!
//! - objects lose `null` / numeric-zero / `false` values, denylisted keys and any key
//!   containing `endConditionCompare`; an object left with no keys is absent
//! - arrays lose `null`, numeric-zero, `false` and absent elements, but an array that
//!   ends up empty is kept as `[]`
//! - strings are parsed as JSON after collapsing `""` into `"`; on success the
//!   parsed value is sanitized in their place, otherwise they are kept as is
//! - other scalars pass through
//!
//! `None` is the "absent" result. Callers assembling a parent drop the field;
//! [`sanitize_document`] turns a top-level absent into `{}`.

use crate::constants::sanitize::{DENYLISTED_KEYS, DENYLISTED_KEY_FRAGMENT};
use serde_json::{Map, Value};

/// Recursively clean a JSON value, innermost first
///
/// Returns `None` when the value is null or collapses to an object with no
/// keys. Top-level scalars other than null pass through.
#[must_use]
pub fn sanitize(value: Value) -> Option<Value> {
    match value {
        Value::Object(map) => sanitize_object(map),
        Value::Array(items) => Some(Value::Array(sanitize_array(items))),
        Value::String(text) => sanitize_string(text),
        Value::Null => None,
        scalar => Some(scalar),
    }
}

/// Sanitize a top-level document; an absent result becomes an empty object
#[must_use]
pub fn sanitize_document(value: Value) -> Value {
    sanitize(value).unwrap_or_else(|| Value::Object(Map::new()))
}

/// Whether a value counts as present when filtering assembled results
///
/// `null`, `false`, numeric zero, and empty strings, arrays and objects are
/// all "empty".
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(_) => !is_zero(value),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn is_zero(value: &Value) -> bool {
    value.as_f64().is_some_and(|n| n == 0.0)
}

// `false` compares equal to zero upstream, so it is dropped with it
fn is_removable(value: &Value) -> bool {
    matches!(value, Value::Null | Value::Bool(false)) || is_zero(value)
}

fn is_denylisted(key: &str) -> bool {
    DENYLISTED_KEYS.contains(&key) || key.contains(DENYLISTED_KEY_FRAGMENT)
}

fn sanitize_object(map: Map<String, Value>) -> Option<Value> {
    let cleaned: Map<String, Value> = map
        .into_iter()
        .filter(|(key, value)| !is_removable(value) && !is_denylisted(key))
        .filter_map(|(key, value)| {
            sanitize(value)
                .filter(|cleaned| !is_removable(cleaned))
                .map(|cleaned| (key, cleaned))
        })
        .collect();

    if cleaned.is_empty() {
        None
    } else {
        Some(Value::Object(cleaned))
    }
}

fn sanitize_array(items: Vec<Value>) -> Vec<Value> {
    items
        .into_iter()
        .filter_map(sanitize)
        .filter(|item| !is_removable(item))
        .collect()
}

fn sanitize_string(text: String) -> Option<Value> {
    // Upstream double-encodes quotes inside embedded documents
    let normalized = text.replace("\"\"", "\"");
    match serde_json::from_str::<Value>(&normalized) {
        Ok(parsed) => sanitize(parsed),
        Err(_) => Some(Value::String(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_string_is_kept() {
        assert_eq!(
            sanitize(json!("Morning Run")),
            Some(json!("Morning Run"))
        );
        assert_eq!(sanitize(json!("2024-01-01")), Some(json!("2024-01-01")));
    }

    #[test]
    fn test_numeric_string_becomes_number() {
        assert_eq!(sanitize(json!("42")), Some(json!(42)));
        assert_eq!(sanitize(json!({"a": "0", "b": "7"})), Some(json!({"b": 7})));
    }

    #[test]
    fn test_null_literal_string_is_absent() {
        assert_eq!(sanitize(json!("null")), None);
        assert_eq!(sanitize(json!({"a": "null", "b": 1})), Some(json!({"b": 1})));
    }

    #[test]
    fn test_false_is_dropped_true_is_kept() {
        assert_eq!(
            sanitize(json!({"favorite": false, "name": "Run", "list": [false, 1]})),
            Some(json!({"name": "Run", "list": [1]}))
        );
        assert_eq!(
            sanitize(json!({"flag": false, "other": true})),
            Some(json!({"other": true}))
        );
        assert_eq!(sanitize(json!({"pr": false})), None);
        assert_eq!(sanitize(json!("false")), Some(json!(false)));
    }

    #[test]
    fn test_float_zero_is_removed() {
        assert_eq!(sanitize(json!({"a": 0.0, "b": 1.5})), Some(json!({"b": 1.5})));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
        assert!(is_truthy(&json!([0])));
        assert!(is_truthy(&json!({"a": null})));
    }
}
