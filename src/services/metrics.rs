// ABOUTME: Metric fetch orchestrator for the health and wellness endpoint
// ABOUTME: Fetches each requested kind per date, isolating every failure to its own kind and date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Metric Fetch Orchestrator
//!
//! Every upstream call is issued one after another. A failed call becomes a
//! [`MetricFailure`] in the report and the kind is simply missing for that
//! date; nothing a single metric does can fail the request.

use super::metric_mapping::map_payload;
use crate::logging::AppLogger;
use chrono::NaiveDate;
use gateway_core::dates::format_iso_date;
use gateway_core::{DateRange, MetricCategory, MetricKind, ProviderResult};
use gateway_providers::GarminDataSource;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One metric fetch that did not produce data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricFailure {
    /// Kind that was being fetched
    pub kind: MetricKind,
    /// Date for per-day kinds, `None` for date-independent kinds
    pub date: Option<NaiveDate>,
    /// Upstream error text
    pub reason: String,
}

/// Collected records plus the failures encountered along the way
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Records per kind, in date order, not yet sanitized
    pub data: Map<String, Value>,
    /// Fetches that failed and were skipped
    pub failures: Vec<MetricFailure>,
}

/// Resolve requested kind names to the effective kind set
///
/// An empty request means the full catalog. Unknown names are dropped with a
/// warning and duplicates collapse to their first occurrence.
#[must_use]
pub fn resolve_kinds(requested: &[String]) -> Vec<MetricKind> {
    if requested.is_empty() {
        return MetricKind::ALL.to_vec();
    }

    let mut kinds = Vec::with_capacity(requested.len());
    for name in requested {
        match name.parse::<MetricKind>() {
            Ok(kind) if !kinds.contains(&kind) => kinds.push(kind),
            Ok(_) => {}
            Err(_) => warn!(metric_type = %name, "Ignoring unknown metric type"),
        }
    }
    kinds
}

/// Fetch every requested kind for the range
///
/// Date-independent kinds are fetched once and dated with the range start.
/// Per-day kinds are fetched once per date; the daily-summary kinds share
/// one `user_summary` call per date.
pub async fn fetch_metrics(
    source: &dyn GarminDataSource,
    user_id: &str,
    range: &DateRange,
    kinds: &[MetricKind],
) -> FetchReport {
    let mut records: BTreeMap<MetricKind, Vec<Value>> = BTreeMap::new();
    let mut failures = Vec::new();

    let (date_independent, per_day): (Vec<MetricKind>, Vec<MetricKind>) = kinds
        .iter()
        .copied()
        .partition(|kind| kind.category() == MetricCategory::DateIndependent);
    let (summary_kinds, per_day): (Vec<MetricKind>, Vec<MetricKind>) =
        per_day.into_iter().partition(|kind| kind.is_daily_summary());

    let start_label = format_iso_date(range.start());
    for kind in date_independent {
        match fetch_date_independent(source, kind).await {
            Ok(payload) => {
                debug!(metric = %kind, payload = %payload, "Fetched date-independent metric");
                records
                    .entry(kind)
                    .or_default()
                    .extend(map_payload(kind, &start_label, &payload));
            }
            Err(e) => failures.push(MetricFailure {
                kind,
                date: None,
                reason: e.to_string(),
            }),
        }
    }

    for date in range.dates() {
        let label = format_iso_date(date);

        if !summary_kinds.is_empty() {
            match source.user_summary(date).await {
                Ok(summary) => {
                    for &kind in &summary_kinds {
                        records
                            .entry(kind)
                            .or_default()
                            .extend(map_payload(kind, &label, &summary));
                    }
                }
                Err(e) => {
                    let reason = e.to_string();
                    failures.extend(summary_kinds.iter().map(|&kind| MetricFailure {
                        kind,
                        date: Some(date),
                        reason: reason.clone(),
                    }));
                }
            }
        }

        for &kind in &per_day {
            match fetch_per_day(source, kind, date).await {
                Ok(payload) => {
                    debug!(metric = %kind, date = %label, payload = %payload, "Fetched metric");
                    records
                        .entry(kind)
                        .or_default()
                        .extend(map_payload(kind, &label, &payload));
                }
                Err(e) => failures.push(MetricFailure {
                    kind,
                    date: Some(date),
                    reason: e.to_string(),
                }),
            }
        }
    }

    for failure in &failures {
        let date = failure.date.map(format_iso_date);
        AppLogger::log_fetch_failure(
            user_id,
            failure.kind.as_str(),
            date.as_deref(),
            &failure.reason,
        );
    }

    let data = records
        .into_iter()
        .map(|(kind, items)| (kind.as_str().to_owned(), Value::Array(items)))
        .collect();
    FetchReport { data, failures }
}

async fn fetch_date_independent(
    source: &dyn GarminDataSource,
    kind: MetricKind,
) -> ProviderResult<Value> {
    match kind {
        MetricKind::LactateThreshold => source.lactate_threshold().await,
        MetricKind::RacePredictions => source.race_predictions().await,
        MetricKind::PregnancySummary => source.pregnancy_summary().await,
        other => Ok(unreachable_kind(other)),
    }
}

async fn fetch_per_day(
    source: &dyn GarminDataSource,
    kind: MetricKind,
    date: NaiveDate,
) -> ProviderResult<Value> {
    match kind {
        MetricKind::Floors => source.floors(date).await,
        MetricKind::FitnessAge => source.fitness_age(date).await,
        MetricKind::HeartRates => source.heart_rates(date).await,
        MetricKind::Sleep => source.sleep_data(date).await,
        MetricKind::Stress => source.stress(date).await,
        MetricKind::Respiration => source.respiration(date).await,
        MetricKind::Spo2 => source.spo2(date).await,
        MetricKind::IntensityMinutes => source.intensity_minutes(date).await,
        MetricKind::TrainingReadiness => source.training_readiness(date).await,
        MetricKind::TrainingStatus => source.training_status(date).await,
        MetricKind::MaxMetrics => source.max_metrics(date).await,
        MetricKind::Hrv => source.hrv(date).await,
        MetricKind::EnduranceScore => source.endurance_score(date).await,
        MetricKind::HillScore => source.hill_score(date).await,
        MetricKind::BloodPressure => source.blood_pressure(date).await,
        MetricKind::BodyBattery => source.body_battery(date).await,
        MetricKind::MenstrualData => source.menstrual_data(date).await,
        MetricKind::MenstrualCalendarData => source.menstrual_calendar(date).await,
        MetricKind::BodyComposition => source.body_composition(date).await,
        other => Ok(unreachable_kind(other)),
    }
}

/// Kinds are partitioned by category before dispatch, so this only logs
fn unreachable_kind(kind: MetricKind) -> Value {
    warn!(metric = %kind, "Metric dispatched to the wrong category");
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_request_resolves_to_catalog() {
        assert_eq!(resolve_kinds(&[]).len(), MetricKind::ALL.len());
    }

    #[test]
    fn test_unknown_and_duplicate_kinds_are_dropped() {
        let requested = vec![
            "sleep".to_owned(),
            "not_a_metric".to_owned(),
            "stress".to_owned(),
            "sleep".to_owned(),
        ];
        assert_eq!(
            resolve_kinds(&requested),
            vec![MetricKind::Sleep, MetricKind::Stress]
        );
    }
}
