// ABOUTME: Login state machine with MFA challenge parking and single-use resume
// ABOUTME: Converts provider outcomes into the success / needs_mfa response shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Login Service
//!
//! `login` either finishes with session tokens or parks the provider's
//! continuation in the [`MfaStateStore`] and hands back a challenge token.
//! `resume` consumes that token exactly once.

use crate::logging::AppLogger;
use crate::mfa::MfaStateStore;
use gateway_core::{AppError, AppResult};
use gateway_providers::{GarminConnector, LoginOutcome};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Body returned by both login endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoginResponse {
    /// Login complete; `tokens` is the opaque session blob
    Success {
        /// Base64 session blob for the data endpoints
        tokens: String,
    },
    /// Garmin wants a second factor; resume with `client_state`
    NeedsMfa {
        /// Challenge token
        client_state: String,
    },
}

/// Login flow over a connector and the shared MFA store
#[derive(Clone)]
pub struct LoginService {
    connector: Arc<dyn GarminConnector>,
    mfa_store: Arc<MfaStateStore>,
}

impl LoginService {
    /// Create a login service
    #[must_use]
    pub fn new(connector: Arc<dyn GarminConnector>, mfa_store: Arc<MfaStateStore>) -> Self {
        Self {
            connector,
            mfa_store,
        }
    }

    /// Submit credentials
    ///
    /// Every attempt first sweeps MFA sessions older than the store TTL.
    ///
    /// # Errors
    ///
    /// Returns an external auth/service error when Garmin rejects the
    /// credentials or cannot be reached
    pub async fn login(&self, user_id: &str, email: &str, password: &str) -> AppResult<LoginResponse> {
        let swept = self.mfa_store.sweep_expired();
        if swept > 0 {
            info!(swept, "Removed expired MFA sessions before login");
        }

        match self.connector.login(email, password).await {
            Ok(LoginOutcome::Authenticated(tokens)) => {
                AppLogger::log_auth_event(user_id, "login", true, None);
                Ok(LoginResponse::Success {
                    tokens: tokens.into_inner(),
                })
            }
            Ok(LoginOutcome::NeedsMfa(continuation)) => {
                let client_state = self.mfa_store.insert(continuation);
                AppLogger::log_auth_event(user_id, "login", true, Some("mfa_required"));
                Ok(LoginResponse::NeedsMfa { client_state })
            }
            Err(e) => {
                AppLogger::log_auth_event(user_id, "login", false, Some(&e.to_string()));
                Err(AppError::from(e))
            }
        }
    }

    /// Finish an MFA login with the code the user received
    ///
    /// # Errors
    ///
    /// Returns `MFA_SESSION_INVALID` when the challenge token is unknown or
    /// already used, and an external error when Garmin rejects the code
    pub async fn resume(&self, user_id: &str, client_state: &str, code: &str) -> AppResult<LoginResponse> {
        let Some(continuation) = self.mfa_store.take(client_state) else {
            warn!(user_id, "Resume attempted with unknown or consumed MFA token");
            return Err(AppError::mfa_session_invalid());
        };

        match self.connector.resume_login(continuation, code).await {
            Ok(tokens) => {
                AppLogger::log_auth_event(user_id, "resume_login", true, None);
                Ok(LoginResponse::Success {
                    tokens: tokens.into_inner(),
                })
            }
            Err(e) => {
                AppLogger::log_auth_event(user_id, "resume_login", false, Some(&e.to_string()));
                Err(AppError::from(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_shapes() {
        let success = LoginResponse::Success {
            tokens: "blob".to_owned(),
        };
        assert_eq!(
            serde_json::to_value(&success).ok(),
            Some(json!({"status": "success", "tokens": "blob"}))
        );

        let mfa = LoginResponse::NeedsMfa {
            client_state: "abc".to_owned(),
        };
        assert_eq!(
            serde_json::to_value(&mfa).ok(),
            Some(json!({"status": "needs_mfa", "client_state": "abc"}))
        );
    }
}
