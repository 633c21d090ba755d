// ABOUTME: Route module organization for the gateway HTTP endpoints
// ABOUTME: Assembles domain routers with request ID and tracing layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Garmin gateway
//!
//! Each domain module holds route definitions and thin handlers that
//! delegate to the service layer. Shared request validation lives here.

/// Garmin login and MFA resume routes
pub mod auth;
/// Health metric and activity data routes
pub mod data;
/// Liveness route
pub mod root;

pub use auth::{AuthRoutes, LoginRequest, ResumeLoginRequest};
pub use data::{ActivitiesRequest, DataRoutes, HealthDataRequest};
pub use root::RootRoutes;

use crate::errors::AppError;
use crate::middleware::request_id_middleware;
use crate::resources::ServerResources;
use axum::{
    body::Body,
    extract::rejection::JsonRejection,
    http::Request,
    middleware, Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

/// Build the complete application router
#[must_use]
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(RootRoutes::routes())
        .merge(AuthRoutes::routes(Arc::clone(&resources)))
        .merge(DataRoutes::routes(resources))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = Empty,
                )
            }),
        )
}

/// Turn a JSON body rejection into a 400 with the standard error body
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(inner)| inner)
        .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
}

/// Require every field to be present and non-blank, reporting all that are not
pub(crate) fn require_fields<const N: usize>(
    fields: [(&'static str, Option<String>); N],
) -> Result<[String; N], AppError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| !value.as_deref().is_some_and(|v| !v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        return Err(AppError::missing_fields(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }
    Ok(fields.map(|(_, value)| value.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_core::ErrorCode;

    #[test]
    fn test_require_fields_reports_all_missing() {
        let result = require_fields([
            ("user_id", Some("u1".to_owned())),
            ("tokens", None),
            ("start_date", Some("  ".to_owned())),
        ]);
        let err = result.err();
        assert_eq!(err.as_ref().map(|e| e.code), Some(ErrorCode::MissingRequiredField));
        assert_eq!(
            err.map(|e| e.message),
            Some("Missing required fields: tokens, start_date".to_owned())
        );
    }

    #[test]
    fn test_require_fields_returns_values_in_order() {
        let result = require_fields([("a", Some("1".to_owned())), ("b", Some("2".to_owned()))]);
        assert_eq!(result.ok(), Some(["1".to_owned(), "2".to_owned()]));
    }
}
