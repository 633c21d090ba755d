// ABOUTME: Route handlers for health metrics and activity/workout data
// ABOUTME: Validates requests, opens a Garmin session and delegates to the data services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data routes
//!
//! Both endpoints validate every required field before any upstream call.
//! Missing fields and malformed dates are 400; failing to open the Garmin
//! session or list activities is 500; single metric or detail failures only
//! shrink the response.

use super::{json_body, require_fields};
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::resources::ServerResources;
use crate::services::{assemble_metrics, fetch_activities_and_workouts, fetch_metrics, resolve_kinds};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use gateway_core::dates::format_iso_date;
use gateway_core::DateRange;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Body of `POST /data/health_and_wellness`
#[derive(Debug, Default, Deserialize)]
pub struct HealthDataRequest {
    /// Caller's user identifier, echoed back
    pub user_id: Option<String>,
    /// Opaque session blob from a login response
    pub tokens: Option<String>,
    /// First date, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Last date inclusive, `YYYY-MM-DD`
    pub end_date: Option<String>,
    /// Metric kinds to fetch; empty or absent means all
    pub metric_types: Option<Vec<String>>,
}

/// Body of `POST /data/activities_and_workouts`
#[derive(Debug, Default, Deserialize)]
pub struct ActivitiesRequest {
    /// Caller's user identifier, echoed back
    pub user_id: Option<String>,
    /// Opaque session blob from a login response
    pub tokens: Option<String>,
    /// First date, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Last date inclusive, `YYYY-MM-DD`
    pub end_date: Option<String>,
    /// Garmin activity type filter
    pub activity_type: Option<String>,
}

/// Response of `POST /data/health_and_wellness`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDataResponse {
    /// Echoed user identifier
    pub user_id: String,
    /// Range start
    pub start_date: String,
    /// Range end
    pub end_date: String,
    /// Records per metric kind; kinds with no data are absent
    pub data: Map<String, Value>,
}

/// Response of `POST /data/activities_and_workouts`
#[derive(Debug, Serialize, Deserialize)]
pub struct ActivitiesResponse {
    /// Echoed user identifier
    pub user_id: String,
    /// Range start
    pub start_date: String,
    /// Range end
    pub end_date: String,
    /// Expanded activities
    pub activities: Vec<Value>,
    /// Detailed-or-bare workouts
    pub workouts: Vec<Value>,
}

/// Data routes implementation
pub struct DataRoutes;

impl DataRoutes {
    /// Create the data routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/data/health_and_wellness", post(Self::handle_health_and_wellness))
            .route(
                "/data/activities_and_workouts",
                post(Self::handle_activities_and_workouts),
            )
            .with_state(resources)
    }

    async fn handle_health_and_wellness(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<HealthDataRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(body)?;
        let [user_id, tokens, start_date, end_date] = require_fields([
            ("user_id", request.user_id),
            ("tokens", request.tokens),
            ("start_date", request.start_date),
            ("end_date", request.end_date),
        ])?;
        let range = DateRange::parse(&start_date, &end_date)?;
        let kinds = resolve_kinds(&request.metric_types.unwrap_or_default());

        let started = Instant::now();
        info!(user_id = %user_id, days = range.len(), kinds = kinds.len(), "Fetching health data");

        let source = resources.connector.connect(&tokens).await.map_err(|e| {
            error!(user_id = %user_id, error = %e, "Failed to open Garmin session");
            AppError::from(e)
        })?;
        let report = fetch_metrics(source.as_ref(), &user_id, &range, &kinds).await;
        let failures = report.failures.len();
        let data = assemble_metrics(report.data);

        AppLogger::log_data_request(
            &user_id,
            "health_and_wellness",
            data.len(),
            failures,
            elapsed_ms(started),
        );

        let response = HealthDataResponse {
            user_id,
            start_date: format_iso_date(range.start()),
            end_date: format_iso_date(range.end()),
            data,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn handle_activities_and_workouts(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<ActivitiesRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(body)?;
        let [user_id, tokens, start_date, end_date] = require_fields([
            ("user_id", request.user_id),
            ("tokens", request.tokens),
            ("start_date", request.start_date),
            ("end_date", request.end_date),
        ])?;
        let range = DateRange::parse(&start_date, &end_date)?;
        let activity_type = request.activity_type.filter(|kind| !kind.trim().is_empty());

        let started = Instant::now();
        info!(
            user_id = %user_id,
            activity_type = activity_type.as_deref().unwrap_or("any"),
            "Fetching activities and workouts"
        );

        let source = resources.connector.connect(&tokens).await.map_err(|e| {
            error!(user_id = %user_id, error = %e, "Failed to open Garmin session");
            AppError::from(e)
        })?;
        let report =
            fetch_activities_and_workouts(source.as_ref(), &user_id, &range, activity_type.as_deref())
                .await
                .map_err(|e| {
                    error!(user_id = %user_id, error = %e, "Failed to list activities or workouts");
                    e
                })?;

        AppLogger::log_data_request(
            &user_id,
            "activities_and_workouts",
            report.activities.len() + report.workouts.len(),
            0,
            elapsed_ms(started),
        );

        let response = ActivitiesResponse {
            user_id,
            start_date: format_iso_date(range.start()),
            end_date: format_iso_date(range.end()),
            activities: report.activities,
            workouts: report.workouts,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
