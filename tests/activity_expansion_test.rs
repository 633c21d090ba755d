// ABOUTME: Integration tests for activity and workout detail expansion
// ABOUTME: All-or-nothing detail policy, unit conversion, name enrichment and workout fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::FakeSource;
use garmin_gateway::services::activities::{expand_activities, expand_workouts, DETAIL_KEYS};
use garmin_gateway::services::fetch_activities_and_workouts;
use gateway_core::{DateRange, ErrorCode};
use serde_json::{json, Value};

fn base_activity() -> Value {
    json!({
        "activityId": 1001,
        "activityType": {"typeKey": "trail_running"},
        "distance": 10000,
        "duration": 3600,
        "ownerId": 42
    })
}

fn source_with_details() -> FakeSource {
    FakeSource::new()
        .respond("activity_details", json!({"metrics": [1, 2], "ownerId": 1}))
        .respond("activity_splits", json!({"lapDTOs": [{"distance": 1000}]}))
        .respond("activity_weather", json!({"temp": 12}))
        .respond("activity_hr_in_timezones", json!([{"zoneNumber": 1, "secsInZone": 300}]))
        .respond("activity_exercise_sets", json!({"exerciseSets": []}))
        .respond("activity_gear", json!([{"displayName": "Shoes"}]))
}

#[tokio::test]
async fn test_successful_expansion_attaches_serialized_details() {
    let source = source_with_details();
    let expanded = expand_activities(&source, "u1", vec![base_activity()]).await;

    let entry = expanded[0].as_object().unwrap();
    for key in DETAIL_KEYS {
        let serialized = entry[key].as_str().unwrap();
        assert!(serde_json::from_str::<Value>(serialized).is_ok(), "{key} is not JSON text");
    }
    assert_eq!(entry["details"], json!(r#"{"metrics":[1,2]}"#));
    assert_eq!(entry["weather"], json!(r#"{"temp":12}"#));

    let activity = &entry["activity"];
    assert_eq!(activity["distance"], json!(10.0));
    assert_eq!(activity["duration"], json!(60.0));
    assert_eq!(activity["activityName"], json!("Trail Running"));
    assert!(activity.get("ownerId").is_none());
}

#[tokio::test]
async fn test_gear_failure_leaves_only_the_base_activity() {
    let source = source_with_details().fail("activity_gear");
    let expanded = expand_activities(&source, "u1", vec![base_activity()]).await;

    let entry = expanded[0].as_object().unwrap();
    assert_eq!(entry.keys().collect::<Vec<_>>(), vec!["activity"]);
    assert_eq!(entry["activity"]["distance"], json!(10.0));
    // Every earlier detail call still ran before the abort
    assert_eq!(source.call_count("activity_details"), 1);
    assert_eq!(source.call_count("activity_exercise_sets"), 1);
}

#[tokio::test]
async fn test_first_failure_stops_remaining_detail_calls() {
    let source = source_with_details().fail("activity_splits");
    expand_activities(&source, "u1", vec![base_activity(), base_activity()]).await;

    assert_eq!(source.call_count("activity_details"), 2);
    assert_eq!(source.call_count("activity_splits"), 2);
    assert_eq!(source.call_count("activity_weather"), 0);
    assert_eq!(source.call_count("activity_gear"), 0);
}

#[tokio::test]
async fn test_workout_detail_replaces_listing_or_falls_back() {
    let source = FakeSource::new()
        .respond("workout:1", json!({"workoutId": 1, "workoutName": "Intervals", "steps": [{"stepOrder": 1}]}))
        .fail("workout:2");
    let listed = vec![
        json!({"workoutId": 1, "workoutName": "Intervals"}),
        json!({"workoutId": 2, "workoutName": "Tempo", "ownerId": 9}),
    ];

    let workouts = expand_workouts(&source, "u1", listed).await;
    assert_eq!(workouts[0]["steps"], json!([{"stepOrder": 1}]));
    assert_eq!(workouts[1], json!({"workoutId": 2, "workoutName": "Tempo"}));
}

#[tokio::test]
async fn test_activity_list_failure_is_request_level() {
    let source = FakeSource::new().fail("activities_by_date");
    let range = DateRange::parse("2024-01-01", "2024-01-07").unwrap();

    let err = fetch_activities_and_workouts(&source, "u1", &range, None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert_eq!(err.http_status(), 500);
}
