// ABOUTME: Activity and workout detail expansion for the activities endpoint
// ABOUTME: Enriches base records, fetches detail documents all-or-nothing per activity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Activity/Workout Detail Expander
//!
//! Activity detail expansion is coarser than metric fetching: the six detail
//! documents of one activity are fetched in order and the first failure
//! abandons them all, leaving only the converted base record. Workouts have a
//! single detail call and fall back to the listed workout.

use crate::logging::AppLogger;
use gateway_core::units::convert_activity_units;
use gateway_core::{sanitize, sanitize_document, AppResult, DateRange, ProviderResult};
use gateway_providers::GarminDataSource;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Keys of the serialized detail documents attached to an expanded activity
pub const DETAIL_KEYS: [&str; 6] = [
    "details",
    "splits",
    "weather",
    "hr_in_timezones",
    "exercise_sets",
    "gear",
];

/// Activities and workouts for one request, already sanitized
#[derive(Debug, Default)]
pub struct ActivityReport {
    /// Expanded activity records
    pub activities: Vec<Value>,
    /// Detailed-or-bare workouts
    pub workouts: Vec<Value>,
}

/// List and expand activities and workouts for the range
///
/// # Errors
///
/// Fails only when the activity or workout list itself cannot be fetched;
/// per-activity and per-workout detail failures are absorbed.
pub async fn fetch_activities_and_workouts(
    source: &dyn GarminDataSource,
    user_id: &str,
    range: &DateRange,
    activity_type: Option<&str>,
) -> AppResult<ActivityReport> {
    let activities = source
        .activities_by_date(range.start(), range.end(), activity_type)
        .await?;
    debug!(user_id, count = activities.len(), "Fetched activity list");
    let activities = expand_activities(source, user_id, activities).await;

    let workouts = source.workouts().await?;
    debug!(user_id, count = workouts.len(), "Fetched workout list");
    let workouts = expand_workouts(source, user_id, workouts).await;

    Ok(ActivityReport {
        activities,
        workouts,
    })
}

/// Expand each activity into `{activity, <detail>: <json string>...}`
pub async fn expand_activities(
    source: &dyn GarminDataSource,
    user_id: &str,
    activities: Vec<Value>,
) -> Vec<Value> {
    let mut expanded = Vec::with_capacity(activities.len());

    for mut activity in activities {
        if let Some(record) = activity.as_object_mut() {
            fill_activity_name(record);
            convert_activity_units(record);
        }

        let mut entry = Map::new();
        let Some(id) = activity.get("activityId").and_then(id_string) else {
            warn!(user_id, "Activity without activityId; details skipped");
            entry.insert("activity".to_owned(), sanitize_document(activity));
            expanded.push(Value::Object(entry));
            continue;
        };

        match fetch_details(source, &id).await {
            Ok(documents) => {
                for (key, document) in DETAIL_KEYS.iter().zip(documents) {
                    if let Some(serialized) = serialize_detail(document) {
                        entry.insert((*key).to_owned(), Value::String(serialized));
                    }
                }
            }
            Err(e) => {
                AppLogger::log_fetch_failure(user_id, &format!("activity {id}"), None, &e.to_string());
            }
        }

        entry.insert("activity".to_owned(), sanitize_document(activity));
        expanded.push(Value::Object(entry));
    }

    expanded
}

/// Replace each listed workout by its full document when it can be fetched
pub async fn expand_workouts(
    source: &dyn GarminDataSource,
    user_id: &str,
    workouts: Vec<Value>,
) -> Vec<Value> {
    let mut detailed = Vec::with_capacity(workouts.len());

    for workout in workouts {
        let Some(id) = workout.get("workoutId").and_then(id_string) else {
            detailed.push(workout);
            continue;
        };
        match source.workout(&id).await {
            Ok(document) => detailed.push(document),
            Err(e) => {
                AppLogger::log_fetch_failure(user_id, &format!("workout {id}"), None, &e.to_string());
                detailed.push(workout);
            }
        }
    }

    match sanitize(Value::Array(detailed)) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Fetch the six detail documents in order, stopping at the first failure
async fn fetch_details(source: &dyn GarminDataSource, id: &str) -> ProviderResult<[Value; 6]> {
    Ok([
        source.activity_details(id).await?,
        source.activity_splits(id).await?,
        source.activity_weather(id).await?,
        source.activity_hr_in_timezones(id).await?,
        source.activity_exercise_sets(id).await?,
        source.activity_gear(id).await?,
    ])
}

/// Sanitize a detail document and serialize it; empty documents are omitted
fn serialize_detail(document: Value) -> Option<String> {
    let cleaned = sanitize(document)?;
    if gateway_core::sanitize::is_truthy(&cleaned) {
        serde_json::to_string(&cleaned).ok()
    } else {
        None
    }
}

/// Identifiers arrive as numbers or strings
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}

/// Derive `activityName` from `activityType.typeKey` when it is missing
fn fill_activity_name(record: &mut Map<String, Value>) {
    let has_name = record
        .get("activityName")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.trim().is_empty());
    if has_name {
        return;
    }

    let derived = record
        .get("activityType")
        .and_then(|kind| kind.get("typeKey"))
        .and_then(Value::as_str)
        .map(title_case_type_key);
    if let Some(name) = derived {
        record.insert("activityName".to_owned(), Value::String(name));
    }
}

/// `trail_running` becomes `Trail Running`
#[must_use]
pub fn title_case_type_key(type_key: &str) -> String {
    type_key
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_case_type_key() {
        assert_eq!(title_case_type_key("running"), "Running");
        assert_eq!(title_case_type_key("trail_running"), "Trail Running");
        assert_eq!(title_case_type_key("INDOOR_cardio"), "Indoor Cardio");
    }

    #[test]
    fn test_existing_name_is_kept() {
        let mut record = json!({"activityName": "Lunch Run", "activityType": {"typeKey": "running"}});
        if let Some(map) = record.as_object_mut() {
            fill_activity_name(map);
        }
        assert_eq!(record["activityName"], json!("Lunch Run"));

        let mut unnamed = json!({"activityName": "", "activityType": {"typeKey": "lap_swimming"}});
        if let Some(map) = unnamed.as_object_mut() {
            fill_activity_name(map);
        }
        assert_eq!(unnamed["activityName"], json!("Lap Swimming"));
    }

    #[test]
    fn test_empty_detail_is_omitted() {
        assert_eq!(serialize_detail(json!({"ownerId": 1, "x": null})), None);
        assert_eq!(serialize_detail(json!([])), None);
        assert_eq!(
            serialize_detail(json!({"temp": 21, "ownerId": 1})),
            Some(r#"{"temp":21}"#.to_owned())
        );
    }

    #[test]
    fn test_id_string_accepts_numbers_and_strings() {
        assert_eq!(id_string(&json!(123)), Some("123".to_owned()));
        assert_eq!(id_string(&json!("abc")), Some("abc".to_owned()));
        assert_eq!(id_string(&json!(null)), None);
    }
}
