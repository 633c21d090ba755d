// ABOUTME: Garmin login and MFA resume route handlers
// ABOUTME: Thin handlers over the login service and the shared MFA store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{json_body, require_fields};
use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Body of `POST /auth/garmin/login`
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    /// Garmin account email
    pub email: Option<String>,
    /// Garmin account password
    pub password: Option<String>,
    /// Caller's user identifier, used for logging
    pub user_id: Option<String>,
}

/// Body of `POST /auth/garmin/resume_login`
#[derive(Debug, Default, Deserialize)]
pub struct ResumeLoginRequest {
    /// Challenge token from a `needs_mfa` response
    pub client_state: Option<String>,
    /// Code the user received
    pub mfa_code: Option<String>,
    /// Caller's user identifier, used for logging
    pub user_id: Option<String>,
}

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create the Garmin authentication routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/garmin/login", post(Self::handle_login))
            .route("/auth/garmin/resume_login", post(Self::handle_resume_login))
            .with_state(resources)
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<LoginRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(body)?;
        let [email, password, user_id] = require_fields([
            ("email", request.email),
            ("password", request.password),
            ("user_id", request.user_id),
        ])?;

        info!(user_id = %user_id, "Garmin login requested");
        let response = resources
            .login_service()
            .login(&user_id, &email, &password)
            .await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn handle_resume_login(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<ResumeLoginRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(body)?;
        let [client_state, mfa_code, user_id] = require_fields([
            ("client_state", request.client_state),
            ("mfa_code", request.mfa_code),
            ("user_id", request.user_id),
        ])?;

        info!(user_id = %user_id, "Garmin MFA resume requested");
        let response = resources
            .login_service()
            .resume(&user_id, &client_state, mfa_code.trim())
            .await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
