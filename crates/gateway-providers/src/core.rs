// ABOUTME: Provider capability traits for login and Garmin data access
// ABOUTME: One method per metric kind or detail document, unsupported by default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Provider Capability Interface
//!
//! The pipeline depends only on these traits:
//!
//! - [`GarminConnector`]: process-wide factory handling the SSO login, the
//!   MFA resume, and opening an authenticated session from a token blob.
//! - [`GarminDataSource`]: one authenticated session, exposing one method per
//!   metric kind and per activity/workout detail document.
//!
//! Every data method returns the upstream JSON verbatim. Methods have a
//! default body returning `UnsupportedFeature`, so a test double only
//! implements the calls it exercises.

use async_trait::async_trait;
use chrono::NaiveDate;
use gateway_core::constants::providers;
use gateway_core::{ProviderError, ProviderResult};
use serde_json::Value;
use std::any::Any;
use std::fmt;

/// Opaque session blob handed to callers after a successful login
#[derive(Clone, PartialEq, Eq)]
pub struct SessionTokens(String);

impl SessionTokens {
    /// Wrap an encoded session blob
    pub fn new(blob: impl Into<String>) -> Self {
        Self(blob.into())
    }

    /// Borrow the encoded blob
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the encoded blob
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionTokens(<redacted>)")
    }
}

/// Provider-specific state needed to finish a login after an MFA challenge
///
/// Only the connector that produced a continuation knows its concrete type.
pub struct MfaContinuation {
    state: Box<dyn Any + Send + Sync>,
}

impl MfaContinuation {
    /// Type-erase a connector's pending login state
    pub fn new<T: Any + Send + Sync>(state: T) -> Self {
        Self {
            state: Box::new(state),
        }
    }

    /// Recover the concrete state, or hand the continuation back on mismatch
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged when the stored state is not a `T`
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        match self.state.downcast::<T>() {
            Ok(state) => Ok(*state),
            Err(state) => Err(Self { state }),
        }
    }
}

impl fmt::Debug for MfaContinuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MfaContinuation").finish_non_exhaustive()
    }
}

/// Result of submitting credentials
#[derive(Debug)]
pub enum LoginOutcome {
    /// Login finished without a second factor
    Authenticated(SessionTokens),
    /// Garmin asked for an MFA code; resume with this continuation
    NeedsMfa(MfaContinuation),
}

/// Process-wide entry point to the upstream service
#[async_trait]
pub trait GarminConnector: Send + Sync {
    /// Provider name used in logs and errors
    fn name(&self) -> &'static str {
        providers::GARMIN
    }

    /// Submit credentials
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` when the credentials are rejected, or a
    /// transport/API error when Garmin cannot be reached
    async fn login(&self, email: &str, password: &str) -> ProviderResult<LoginOutcome>;

    /// Finish a login that stopped at the MFA challenge
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` when the code is rejected or the
    /// continuation did not come from this connector
    async fn resume_login(
        &self,
        continuation: MfaContinuation,
        code: &str,
    ) -> ProviderResult<SessionTokens>;

    /// Open an authenticated session for one request
    ///
    /// # Errors
    ///
    /// Returns `InvalidTokens` when the blob cannot be decoded, or an auth/API
    /// error when the session cannot be established
    async fn connect(&self, tokens: &str) -> ProviderResult<Box<dyn GarminDataSource>>;
}

/// One authenticated session against the data endpoints
///
/// Empty upstream responses (204 or no body) come back as `Value::Null`.
#[async_trait]
pub trait GarminDataSource: Send + Sync {
    /// Provider name used in logs and errors
    fn name(&self) -> &'static str {
        providers::GARMIN
    }

    // Per-day documents

    /// Daily summary: steps, distance, activity seconds, weight
    async fn user_summary(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "user_summary", Some(date)))
    }

    /// Floors climbed chart
    async fn floors(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "floors", Some(date)))
    }

    /// Fitness age
    async fn fitness_age(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "fitness_age", Some(date)))
    }

    /// Daily heart rate including resting heart rate
    async fn heart_rates(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "heart_rates", Some(date)))
    }

    /// Sleep data
    async fn sleep_data(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "sleep_data", Some(date)))
    }

    /// Stress levels and durations
    async fn stress(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "stress", Some(date)))
    }

    /// Respiration
    async fn respiration(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "respiration", Some(date)))
    }

    /// Blood oxygen
    async fn spo2(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "spo2", Some(date)))
    }

    /// Intensity minutes
    async fn intensity_minutes(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "intensity_minutes", Some(date)))
    }

    /// Training readiness
    async fn training_readiness(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "training_readiness", Some(date)))
    }

    /// Aggregated training status
    async fn training_status(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "training_status", Some(date)))
    }

    /// Max metrics (VO2 max)
    async fn max_metrics(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "max_metrics", Some(date)))
    }

    /// Heart rate variability
    async fn hrv(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "hrv", Some(date)))
    }

    /// Endurance score
    async fn endurance_score(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "endurance_score", Some(date)))
    }

    /// Hill score
    async fn hill_score(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "hill_score", Some(date)))
    }

    /// Blood pressure measurement summaries
    async fn blood_pressure(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "blood_pressure", Some(date)))
    }

    /// Body battery reports
    async fn body_battery(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "body_battery", Some(date)))
    }

    /// Menstrual cycle day view
    async fn menstrual_data(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "menstrual_data", Some(date)))
    }

    /// Menstrual cycle calendar
    async fn menstrual_calendar(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "menstrual_calendar", Some(date)))
    }

    /// Weigh-ins and body composition
    async fn body_composition(&self, date: NaiveDate) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "body_composition", Some(date)))
    }

    // Date-independent documents

    /// Latest lactate threshold as `{speed_and_heart_rate, power}`
    async fn lactate_threshold(&self) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "lactate_threshold", None))
    }

    /// Latest race predictions
    async fn race_predictions(&self) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "race_predictions", None))
    }

    /// Pregnancy snapshot
    async fn pregnancy_summary(&self) -> ProviderResult<Value> {
        Err(unsupported(self.name(), "pregnancy_summary", None))
    }

    // Activities and workouts

    /// Every activity started within the range, optionally of one type
    async fn activities_by_date(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        activity_type: Option<&str>,
    ) -> ProviderResult<Vec<Value>> {
        let _ = (end, activity_type);
        Err(unsupported(self.name(), "activities_by_date", Some(start)))
    }

    /// Structured activity details
    async fn activity_details(&self, activity_id: &str) -> ProviderResult<Value> {
        Err(unsupported_detail(self.name(), "activity_details", activity_id))
    }

    /// Activity splits
    async fn activity_splits(&self, activity_id: &str) -> ProviderResult<Value> {
        Err(unsupported_detail(self.name(), "activity_splits", activity_id))
    }

    /// Weather during the activity
    async fn activity_weather(&self, activity_id: &str) -> ProviderResult<Value> {
        Err(unsupported_detail(self.name(), "activity_weather", activity_id))
    }

    /// Time in heart rate zones
    async fn activity_hr_in_timezones(&self, activity_id: &str) -> ProviderResult<Value> {
        Err(unsupported_detail(
            self.name(),
            "activity_hr_in_timezones",
            activity_id,
        ))
    }

    /// Strength exercise sets
    async fn activity_exercise_sets(&self, activity_id: &str) -> ProviderResult<Value> {
        Err(unsupported_detail(
            self.name(),
            "activity_exercise_sets",
            activity_id,
        ))
    }

    /// Gear used for the activity
    async fn activity_gear(&self, activity_id: &str) -> ProviderResult<Value> {
        Err(unsupported_detail(self.name(), "activity_gear", activity_id))
    }

    /// Saved workouts
    async fn workouts(&self) -> ProviderResult<Vec<Value>> {
        Err(unsupported(self.name(), "workouts", None))
    }

    /// Full workout document
    async fn workout(&self, workout_id: &str) -> ProviderResult<Value> {
        Err(unsupported_detail(self.name(), "workout", workout_id))
    }
}

fn unsupported(provider: &str, feature: &str, date: Option<NaiveDate>) -> ProviderError {
    match date {
        Some(date) => ProviderError::unsupported(provider, format!("{feature} (requested: {date})")),
        None => ProviderError::unsupported(provider, feature),
    }
}

fn unsupported_detail(provider: &str, feature: &str, id: &str) -> ProviderError {
    ProviderError::unsupported(provider, format!("{feature} (requested: {id})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptySource;

    #[async_trait]
    impl GarminDataSource for EmptySource {}

    #[tokio::test]
    async fn test_default_methods_are_unsupported() {
        let source = EmptySource;
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
        let err = source.sleep_data(date).await.err();
        assert!(matches!(
            err,
            Some(ProviderError::UnsupportedFeature { ref feature, .. }) if feature.contains("2024-01-01")
        ));
        assert!(source.activity_gear("42").await.is_err());
        assert!(source.workouts().await.is_err());
    }

    #[test]
    fn test_continuation_downcast() {
        let continuation = MfaContinuation::new(String::from("pending"));
        let mismatch = continuation.downcast::<u32>();
        let Err(continuation) = mismatch else {
            unreachable!("u32 is not the stored type");
        };
        assert_eq!(continuation.downcast::<String>().ok().as_deref(), Some("pending"));
    }

    #[test]
    fn test_session_tokens_debug_is_redacted() {
        let tokens = SessionTokens::new("secret-blob");
        assert!(!format!("{tokens:?}").contains("secret"));
        assert_eq!(tokens.as_str(), "secret-blob");
    }
}
