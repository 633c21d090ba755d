// ABOUTME: Unit conversion helpers for mass, distance and duration fields
// ABOUTME: Converters are total; absent input yields absent output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::{Map, Value};

/// Grams per kilogram
const GRAMS_PER_KILOGRAM: f64 = 1000.0;

/// Meters per kilometer
const METERS_PER_KILOMETER: f64 = 1000.0;

/// Seconds per minute
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Convert grams to kilograms
#[must_use]
pub fn grams_to_kg(grams: f64) -> f64 {
    grams / GRAMS_PER_KILOGRAM
}

/// Convert meters to kilometers
#[must_use]
pub fn meters_to_km(meters: f64) -> f64 {
    meters / METERS_PER_KILOMETER
}

/// Convert seconds to minutes
#[must_use]
pub fn seconds_to_minutes(seconds: f64) -> f64 {
    seconds / SECONDS_PER_MINUTE
}

/// Apply `convert` when a value is present
#[must_use]
pub fn safe_convert(value: Option<f64>, convert: fn(f64) -> f64) -> Option<f64> {
    value.map(convert)
}

/// Convert a JSON value that should hold a number
///
/// `null`, missing and non-numeric values yield `Value::Null`, so the result
/// can be dropped by the sanitizer. Numbers always come back as floats.
#[must_use]
pub fn convert_json(value: Option<&Value>, convert: fn(f64) -> f64) -> Value {
    safe_convert(value.and_then(Value::as_f64), convert).map_or(Value::Null, Value::from)
}

/// Convert one field of a JSON object in place
///
/// Missing keys stay missing; present numeric values are replaced by their
/// converted float; anything else is left untouched.
pub fn convert_field(record: &mut Map<String, Value>, key: &str, convert: fn(f64) -> f64) {
    if let Some(slot) = record.get_mut(key) {
        if let Some(number) = slot.as_f64() {
            *slot = Value::from(convert(number));
        }
    }
}

/// Activity fields reported in meters
pub const ACTIVITY_DISTANCE_FIELDS: &[&str] = &["distance"];

/// Activity fields reported in seconds
pub const ACTIVITY_DURATION_FIELDS: &[&str] = &["duration", "elapsedDuration", "movingDuration"];

/// Normalize an activity record: meters to km, seconds to minutes
pub fn convert_activity_units(activity: &mut Map<String, Value>) {
    for key in ACTIVITY_DISTANCE_FIELDS {
        convert_field(activity, key, meters_to_km);
    }
    for key in ACTIVITY_DURATION_FIELDS {
        convert_field(activity, key, seconds_to_minutes);
    }
}

/// Normalize a daily user summary: `totalWeight` grams to kg
pub fn convert_user_summary_units(summary: &mut Map<String, Value>) {
    convert_field(summary, "totalWeight", grams_to_kg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exact_conversions() {
        assert!((meters_to_km(1000.0) - 1.0).abs() < f64::EPSILON);
        assert!((seconds_to_minutes(90.0) - 1.5).abs() < f64::EPSILON);
        assert!((grams_to_kg(500.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_absent_input_stays_absent() {
        assert_eq!(safe_convert(None, meters_to_km), None);
        assert_eq!(safe_convert(None, seconds_to_minutes), None);
        assert_eq!(safe_convert(None, grams_to_kg), None);
        assert_eq!(convert_json(None, grams_to_kg), Value::Null);
        assert_eq!(convert_json(Some(&Value::Null), grams_to_kg), Value::Null);
    }

    #[test]
    fn test_integer_input_yields_float() {
        let converted = convert_json(Some(&json!(2000)), meters_to_km);
        assert!(converted.is_f64());
        assert_eq!(converted, json!(2.0));
    }

    #[test]
    fn test_activity_conversion_only_touches_present_fields() {
        let mut activity = json!({
            "activityId": 1,
            "distance": 5000,
            "duration": 1800,
            "movingDuration": null
        });
        let Some(map) = activity.as_object_mut() else {
            unreachable!("literal is an object");
        };
        convert_activity_units(map);

        assert_eq!(activity["distance"], json!(5.0));
        assert_eq!(activity["duration"], json!(30.0));
        assert_eq!(activity["movingDuration"], Value::Null);
        assert!(activity.get("elapsedDuration").is_none());
        assert_eq!(activity["activityId"], json!(1));
    }

    #[test]
    fn test_user_summary_weight() {
        let mut summary = json!({"totalWeight": 72500});
        if let Some(map) = summary.as_object_mut() {
            convert_user_summary_units(map);
        }
        assert_eq!(summary["totalWeight"], json!(72.5));
    }
}
