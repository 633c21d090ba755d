// ABOUTME: Metric-kind catalog with wire names and fetch categories
// ABOUTME: Decides which kinds are fetched once per request and which once per date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often a metric kind is fetched for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    /// Fetched once, records dated with the range start
    DateIndependent,
    /// Fetched once for every date in the range
    PerDay,
}

/// A named health metric returned by `/data/health_and_wellness`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Latest lactate threshold heart rate
    LactateThreshold,
    /// Latest 5K race prediction
    RacePredictions,
    /// Pregnancy snapshot
    PregnancySummary,
    /// Daily step count
    Steps,
    /// Daily distance in kilometers
    TotalDistance,
    /// Highly active time in minutes
    HighlyActiveSeconds,
    /// Active time in minutes
    ActiveSeconds,
    /// Sedentary time in minutes
    SedentarySeconds,
    /// Floors ascended and descended
    Floors,
    /// Fitness age
    FitnessAge,
    /// Resting heart rate
    HeartRates,
    /// Sleep duration
    Sleep,
    /// Stress levels and durations
    Stress,
    /// Average respiration rate
    Respiration,
    /// Average blood oxygen saturation
    Spo2,
    /// Intensity minutes
    IntensityMinutes,
    /// Training readiness score
    TrainingReadiness,
    /// Training status
    TrainingStatus,
    /// VO2 max
    MaxMetrics,
    /// Overnight heart rate variability
    Hrv,
    /// Endurance score
    EnduranceScore,
    /// Hill score
    HillScore,
    /// Individual blood pressure measurements
    BloodPressure,
    /// Body battery daily report
    BodyBattery,
    /// Menstrual cycle day view
    MenstrualData,
    /// Menstrual cycle calendar
    MenstrualCalendarData,
    /// Weigh-ins and body composition
    BodyComposition,
}

impl MetricKind {
    /// The full catalog, in fetch order; used when a request names no kinds
    pub const ALL: &'static [Self] = &[
        Self::LactateThreshold,
        Self::RacePredictions,
        Self::PregnancySummary,
        Self::Steps,
        Self::TotalDistance,
        Self::HighlyActiveSeconds,
        Self::ActiveSeconds,
        Self::SedentarySeconds,
        Self::Floors,
        Self::FitnessAge,
        Self::HeartRates,
        Self::Sleep,
        Self::Stress,
        Self::Respiration,
        Self::Spo2,
        Self::IntensityMinutes,
        Self::TrainingReadiness,
        Self::TrainingStatus,
        Self::MaxMetrics,
        Self::Hrv,
        Self::EnduranceScore,
        Self::HillScore,
        Self::BloodPressure,
        Self::BodyBattery,
        Self::MenstrualData,
        Self::MenstrualCalendarData,
        Self::BodyComposition,
    ];

    /// Wire name used in requests and as the response key
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LactateThreshold => "lactate_threshold",
            Self::RacePredictions => "race_predictions",
            Self::PregnancySummary => "pregnancy_summary",
            Self::Steps => "steps",
            Self::TotalDistance => "total_distance",
            Self::HighlyActiveSeconds => "highly_active_seconds",
            Self::ActiveSeconds => "active_seconds",
            Self::SedentarySeconds => "sedentary_seconds",
            Self::Floors => "floors",
            Self::FitnessAge => "fitness_age",
            Self::HeartRates => "heart_rates",
            Self::Sleep => "sleep",
            Self::Stress => "stress",
            Self::Respiration => "respiration",
            Self::Spo2 => "spo2",
            Self::IntensityMinutes => "intensity_minutes",
            Self::TrainingReadiness => "training_readiness",
            Self::TrainingStatus => "training_status",
            Self::MaxMetrics => "max_metrics",
            Self::Hrv => "hrv",
            Self::EnduranceScore => "endurance_score",
            Self::HillScore => "hill_score",
            Self::BloodPressure => "blood_pressure",
            Self::BodyBattery => "body_battery",
            Self::MenstrualData => "menstrual_data",
            Self::MenstrualCalendarData => "menstrual_calendar_data",
            Self::BodyComposition => "body_composition",
        }
    }

    /// Whether this kind is fetched once per request or once per date
    #[must_use]
    pub const fn category(self) -> MetricCategory {
        match self {
            Self::LactateThreshold | Self::RacePredictions | Self::PregnancySummary => {
                MetricCategory::DateIndependent
            }
            _ => MetricCategory::PerDay,
        }
    }

    /// Kinds read from the shared daily user summary document
    #[must_use]
    pub const fn is_daily_summary(self) -> bool {
        matches!(
            self,
            Self::Steps
                | Self::TotalDistance
                | Self::HighlyActiveSeconds
                | Self::ActiveSeconds
                | Self::SedentarySeconds
        )
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown metric type: {s}")))
    }
}
