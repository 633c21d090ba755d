// ABOUTME: Field mapping from raw Garmin metric payloads to stable output records
// ABOUTME: Each metric kind maps to zero or more dated records with fixed field names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Metric Field Mapping
//!
//! Consumers depend on these record shapes, not on the upstream documents.
//! Every function here is pure: it takes the raw payload for one kind and one
//! date and returns the records to append. Missing upstream fields become
//! `null` and are removed later by the sanitizer.

use gateway_core::sanitize::is_truthy;
use gateway_core::units::{convert_json, grams_to_kg, meters_to_km, seconds_to_minutes};
use gateway_core::MetricKind;
use serde_json::{json, Map, Value};
use tracing::warn;

/// Simple kinds: output field name and the upstream key it is copied from
fn simple_fields(kind: MetricKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        MetricKind::Floors => &[
            ("floors_ascended", "totalFloorsAscended"),
            ("floors_descended", "totalFloorsDescended"),
        ],
        MetricKind::FitnessAge => &[
            ("fitness_age", "fitnessAge"),
            ("chronological_age", "chronologicalAge"),
            ("achievable_fitness_age", "achievableFitnessAge"),
        ],
        MetricKind::HeartRates => &[("resting_heart_rate", "restingHeartRate")],
        MetricKind::Stress => &[
            ("stress_level", "overallStressLevel"),
            ("stress_duration_total", "totalStressDuration"),
            ("stress_duration_rest", "restStressDuration"),
            ("stress_duration_activity", "activityStressDuration"),
            ("stress_duration_uncategorized", "uncategorizedStressDuration"),
            ("stress_duration_low", "lowStressDuration"),
            ("stress_duration_medium", "mediumStressDuration"),
            ("stress_duration_high", "highStressDuration"),
            ("stress_percentage_low", "lowStressPercentage"),
            ("stress_percentage_medium", "mediumStressPercentage"),
            ("stress_percentage_high", "highStressPercentage"),
        ],
        MetricKind::Respiration => &[("average_respiration_rate", "avgRespiration")],
        MetricKind::Spo2 => &[("average_spo2", "avgSpO2")],
        MetricKind::IntensityMinutes => &[("total_intensity_minutes", "total")],
        MetricKind::TrainingReadiness => &[("training_readiness_score", "score")],
        MetricKind::TrainingStatus => &[("status", "status")],
        MetricKind::MaxMetrics => &[("vo2_max", "vo2Max")],
        MetricKind::EnduranceScore => &[("score", "score")],
        MetricKind::HillScore => &[("overall", "overall")],
        _ => &[],
    }
}

/// Read a document that should be an object; an array is read from its first element
fn as_document(payload: &Value) -> Option<&Map<String, Value>> {
    match payload {
        Value::Object(map) => Some(map),
        Value::Array(items) => items.first().and_then(Value::as_object),
        _ => None,
    }
}

fn field(document: &Map<String, Value>, key: &str) -> Value {
    document.get(key).cloned().unwrap_or(Value::Null)
}

fn nested(document: &Map<String, Value>, outer: &str, inner: &str) -> Value {
    document
        .get(outer)
        .and_then(|value| value.get(inner))
        .cloned()
        .unwrap_or(Value::Null)
}

fn dated(date: &str, fields: impl IntoIterator<Item = (String, Value)>) -> Value {
    let mut record = Map::new();
    record.insert("date".to_owned(), Value::String(date.to_owned()));
    record.extend(fields);
    Value::Object(record)
}

/// Map the payload fetched for `kind` on `date` to output records
///
/// Daily-summary kinds all receive the same user summary document.
#[must_use]
pub fn map_payload(kind: MetricKind, date: &str, payload: &Value) -> Vec<Value> {
    if !is_truthy(payload) {
        return Vec::new();
    }

    match kind {
        MetricKind::LactateThreshold => map_lactate_threshold(date, payload),
        MetricKind::RacePredictions => map_race_predictions(date, payload),
        MetricKind::PregnancySummary
        | MetricKind::MenstrualData
        | MetricKind::MenstrualCalendarData => vec![json!({"date": date, "data": payload})],
        MetricKind::Steps
        | MetricKind::TotalDistance
        | MetricKind::HighlyActiveSeconds
        | MetricKind::ActiveSeconds
        | MetricKind::SedentarySeconds => map_daily_summary(kind, date, payload),
        MetricKind::Sleep => map_sleep(date, payload),
        MetricKind::Hrv => as_document(payload).map_or_else(Vec::new, |doc| {
            vec![json!({"date": date, "average_overnight_hrv": nested(doc, "hrvSummary", "weeklyAvg")})]
        }),
        MetricKind::BloodPressure => map_blood_pressure(date, payload),
        MetricKind::BodyBattery => map_body_battery(date, payload),
        MetricKind::BodyComposition => map_body_composition(date, payload),
        MetricKind::Floors
        | MetricKind::FitnessAge
        | MetricKind::HeartRates
        | MetricKind::Stress
        | MetricKind::Respiration
        | MetricKind::Spo2
        | MetricKind::IntensityMinutes
        | MetricKind::TrainingReadiness
        | MetricKind::TrainingStatus
        | MetricKind::MaxMetrics
        | MetricKind::EnduranceScore
        | MetricKind::HillScore => as_document(payload).map_or_else(Vec::new, |doc| {
            let fields = simple_fields(kind)
                .iter()
                .map(|(output, input)| ((*output).to_owned(), field(doc, input)));
            vec![dated(date, fields)]
        }),
    }
}

fn map_lactate_threshold(date: &str, payload: &Value) -> Vec<Value> {
    as_document(payload).map_or_else(Vec::new, |doc| {
        vec![json!({
            "date": date,
            "lactate_threshold_hr": nested(doc, "speed_and_heart_rate", "heartRate"),
        })]
    })
}

fn map_race_predictions(date: &str, payload: &Value) -> Vec<Value> {
    let Some(doc) = as_document(payload) else {
        return Vec::new();
    };

    match doc.get("racePredictionList").and_then(Value::as_array) {
        Some(predictions) => predictions
            .iter()
            .filter(|prediction| prediction.get("raceType").and_then(Value::as_str) == Some("FIVE_K"))
            .map(|prediction| {
                json!({
                    "date": date,
                    "race_prediction_5k": prediction.get("predictedTime").cloned().unwrap_or(Value::Null),
                })
            })
            .collect(),
        None => vec![json!({"date": date, "race_prediction_5k": field(doc, "time5K")})],
    }
}

fn map_daily_summary(kind: MetricKind, date: &str, payload: &Value) -> Vec<Value> {
    let Some(summary) = as_document(payload) else {
        return Vec::new();
    };

    let value = match kind {
        MetricKind::Steps => field(summary, "totalSteps"),
        MetricKind::TotalDistance => convert_json(summary.get("totalDistance"), meters_to_km),
        MetricKind::HighlyActiveSeconds => {
            convert_json(summary.get("highlyActiveSeconds"), seconds_to_minutes)
        }
        MetricKind::ActiveSeconds => convert_json(summary.get("activeSeconds"), seconds_to_minutes),
        MetricKind::SedentarySeconds => {
            convert_json(summary.get("sedentarySeconds"), seconds_to_minutes)
        }
        _ => return Vec::new(),
    };
    vec![json!({"date": date, "value": value})]
}

fn map_sleep(date: &str, payload: &Value) -> Vec<Value> {
    as_document(payload).map_or_else(Vec::new, |doc| {
        let duration = doc
            .get("durationInSeconds")
            .filter(|value| !value.is_null())
            .cloned()
            .unwrap_or_else(|| nested(doc, "dailySleepDTO", "sleepTimeSeconds"));
        vec![json!({"date": date, "sleep_duration": duration})]
    })
}

/// Render a reading the way it appears in `"120/80, 60 bpm"`
fn display_scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn map_blood_pressure(date: &str, payload: &Value) -> Vec<Value> {
    let Some(summaries) = as_document(payload)
        .and_then(|doc| doc.get("measurementSummaries"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for summary in summaries {
        let Some(measurements) = summary.get("measurements").and_then(Value::as_array) else {
            warn!(date, "Blood pressure summary without measurements");
            continue;
        };
        for entry in measurements {
            let reading = |key: &str| entry.get(key).filter(|value| !value.is_null());
            match (reading("systolic"), reading("diastolic"), reading("pulse")) {
                (Some(systolic), Some(diastolic), Some(pulse)) => records.push(json!({
                    "date": date,
                    "value": format!(
                        "{}/{}, {} bpm",
                        display_scalar(systolic),
                        display_scalar(diastolic),
                        display_scalar(pulse)
                    ),
                })),
                _ => warn!(date, "Incomplete blood pressure measurement skipped"),
            }
        }
    }
    records
}

fn map_body_battery(date: &str, payload: &Value) -> Vec<Value> {
    let Some(entries) = payload.as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| {
            json!({
                "date": date,
                "highest": field(entry, "highest"),
                "lowest": field(entry, "lowest"),
                "atWake": field(entry, "atWake"),
                "charged": field(entry, "charged"),
                "drained": field(entry, "drained"),
            })
        })
        .collect()
}

fn map_body_composition(date: &str, payload: &Value) -> Vec<Value> {
    let Some(entries) = as_document(payload)
        .and_then(|doc| doc.get("dateWeightList"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| {
            // Weigh-ins carry their own date; the fetch date is only a fallback
            let entry_date = entry
                .get("date")
                .or_else(|| entry.get("calendarDate"))
                .filter(|value| !value.is_null())
                .cloned()
                .unwrap_or_else(|| Value::String(date.to_owned()));
            json!({
                "date": entry_date,
                "weight": convert_json(entry.get("weight"), grams_to_kg),
                "body_fat_percentage": field(entry, "bodyFat"),
                "bmi": field(entry, "bmi"),
                "body_water_percentage": field(entry, "bodyWater"),
                "bone_mass": field(entry, "boneMass"),
                "muscle_mass": field(entry, "muscleMass"),
            })
        })
        .collect()
}
