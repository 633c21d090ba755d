// ABOUTME: Shared test doubles for the gateway integration tests
// ABOUTME: In-memory Garmin connector and data source with scripted payloads and failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `garmin_gateway`
//!
//! [`FakeSource`] answers each capability from a map keyed by capability
//! name (`"sleep_data"`, `"activity_gear"`, ...). Names listed as failing
//! return an upstream API error instead. Every call is recorded.

use async_trait::async_trait;
use chrono::NaiveDate;
use garmin_gateway::config::ServerConfig;
use garmin_gateway::resources::ServerResources;
use garmin_gateway::routes::build_router;
use gateway_core::{ProviderError, ProviderResult};
use gateway_providers::{
    GarminConnector, GarminDataSource, LoginOutcome, MfaContinuation, SessionTokens,
};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Session blob accepted by [`FakeConnector`]
pub const VALID_TOKENS: &str = "fake-session-blob";

/// MFA code accepted by [`FakeConnector`]
pub const VALID_MFA_CODE: &str = "123456";

/// Scripted data source
#[derive(Clone, Default)]
pub struct FakeSource {
    responses: HashMap<String, Value>,
    failing: HashSet<String>,
    activities: Vec<Value>,
    workouts: Vec<Value>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `capability` with `payload`
    pub fn respond(mut self, capability: &str, payload: Value) -> Self {
        self.responses.insert(capability.to_owned(), payload);
        self
    }

    /// Make `capability` fail with an upstream error
    pub fn fail(mut self, capability: &str) -> Self {
        self.failing.insert(capability.to_owned());
        self
    }

    pub fn with_activities(mut self, activities: Vec<Value>) -> Self {
        self.activities = activities;
        self
    }

    pub fn with_workouts(mut self, workouts: Vec<Value>) -> Self {
        self.workouts = workouts;
        self
    }

    /// Every capability called so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// How many times `capability` was called
    pub fn call_count(&self, capability: &str) -> usize {
        self.calls().iter().filter(|call| *call == capability).count()
    }

    fn answer(&self, capability: &str) -> ProviderResult<Value> {
        self.calls.lock().unwrap().push(capability.to_owned());
        if self.failing.contains(capability) {
            return Err(ProviderError::ApiError {
                provider: "garmin".to_owned(),
                status_code: 500,
                message: format!("{capability} unavailable"),
            });
        }
        Ok(self.responses.get(capability).cloned().unwrap_or(Value::Null))
    }
}

#[async_trait]
impl GarminDataSource for FakeSource {
    async fn user_summary(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("user_summary")
    }
    async fn floors(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("floors")
    }
    async fn fitness_age(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("fitness_age")
    }
    async fn heart_rates(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("heart_rates")
    }
    async fn sleep_data(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("sleep_data")
    }
    async fn stress(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("stress")
    }
    async fn respiration(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("respiration")
    }
    async fn spo2(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("spo2")
    }
    async fn intensity_minutes(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("intensity_minutes")
    }
    async fn training_readiness(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("training_readiness")
    }
    async fn training_status(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("training_status")
    }
    async fn max_metrics(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("max_metrics")
    }
    async fn hrv(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("hrv")
    }
    async fn endurance_score(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("endurance_score")
    }
    async fn hill_score(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("hill_score")
    }
    async fn blood_pressure(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("blood_pressure")
    }
    async fn body_battery(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("body_battery")
    }
    async fn menstrual_data(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("menstrual_data")
    }
    async fn menstrual_calendar(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("menstrual_calendar")
    }
    async fn body_composition(&self, _date: NaiveDate) -> ProviderResult<Value> {
        self.answer("body_composition")
    }
    async fn lactate_threshold(&self) -> ProviderResult<Value> {
        self.answer("lactate_threshold")
    }
    async fn race_predictions(&self) -> ProviderResult<Value> {
        self.answer("race_predictions")
    }
    async fn pregnancy_summary(&self) -> ProviderResult<Value> {
        self.answer("pregnancy_summary")
    }
    async fn activities_by_date(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
        _activity_type: Option<&str>,
    ) -> ProviderResult<Vec<Value>> {
        self.answer("activities_by_date")?;
        Ok(self.activities.clone())
    }
    async fn activity_details(&self, _id: &str) -> ProviderResult<Value> {
        self.answer("activity_details")
    }
    async fn activity_splits(&self, _id: &str) -> ProviderResult<Value> {
        self.answer("activity_splits")
    }
    async fn activity_weather(&self, _id: &str) -> ProviderResult<Value> {
        self.answer("activity_weather")
    }
    async fn activity_hr_in_timezones(&self, _id: &str) -> ProviderResult<Value> {
        self.answer("activity_hr_in_timezones")
    }
    async fn activity_exercise_sets(&self, _id: &str) -> ProviderResult<Value> {
        self.answer("activity_exercise_sets")
    }
    async fn activity_gear(&self, _id: &str) -> ProviderResult<Value> {
        self.answer("activity_gear")
    }
    async fn workouts(&self) -> ProviderResult<Vec<Value>> {
        self.answer("workouts")?;
        Ok(self.workouts.clone())
    }
    async fn workout(&self, workout_id: &str) -> ProviderResult<Value> {
        self.answer(&format!("workout:{workout_id}"))
    }
}

/// Pending challenge parked by [`FakeConnector`]
struct FakeChallenge {
    email: String,
}

/// Scripted connector: optional MFA, fixed code, fixed session blob
#[derive(Clone, Default)]
pub struct FakeConnector {
    pub source: FakeSource,
    pub require_mfa: bool,
    pub reject_credentials: bool,
}

impl FakeConnector {
    pub fn new(source: FakeSource) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }

    pub fn with_mfa(mut self) -> Self {
        self.require_mfa = true;
        self
    }

    pub fn rejecting(mut self) -> Self {
        self.reject_credentials = true;
        self
    }
}

#[async_trait]
impl GarminConnector for FakeConnector {
    async fn login(&self, email: &str, _password: &str) -> ProviderResult<LoginOutcome> {
        if self.reject_credentials {
            return Err(ProviderError::AuthenticationFailed {
                provider: "garmin".to_owned(),
                reason: "Unexpected title: Sign In".to_owned(),
            });
        }
        if self.require_mfa {
            return Ok(LoginOutcome::NeedsMfa(MfaContinuation::new(FakeChallenge {
                email: email.to_owned(),
            })));
        }
        Ok(LoginOutcome::Authenticated(SessionTokens::new(VALID_TOKENS)))
    }

    async fn resume_login(
        &self,
        continuation: MfaContinuation,
        code: &str,
    ) -> ProviderResult<SessionTokens> {
        let challenge = continuation.downcast::<FakeChallenge>().map_err(|_| {
            ProviderError::AuthenticationFailed {
                provider: "garmin".to_owned(),
                reason: "foreign continuation".to_owned(),
            }
        })?;
        if code != VALID_MFA_CODE || challenge.email.is_empty() {
            return Err(ProviderError::AuthenticationFailed {
                provider: "garmin".to_owned(),
                reason: "invalid MFA code".to_owned(),
            });
        }
        Ok(SessionTokens::new(VALID_TOKENS))
    }

    async fn connect(&self, tokens: &str) -> ProviderResult<Box<dyn GarminDataSource>> {
        if tokens != VALID_TOKENS {
            return Err(ProviderError::InvalidTokens("not a session blob".to_owned()));
        }
        Ok(Box::new(self.source.clone()))
    }
}

/// Shared resources around a fake connector
pub fn resources(connector: FakeConnector) -> Arc<ServerResources> {
    Arc::new(ServerResources::with_connector(
        ServerConfig::default(),
        Arc::new(connector),
    ))
}

/// Full application router around a fake connector
pub fn router(connector: FakeConnector) -> axum::Router {
    build_router(resources(connector))
}
