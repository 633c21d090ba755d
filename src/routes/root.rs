// ABOUTME: Liveness route answering on the service root
// ABOUTME: Returns a fixed message so load balancers can probe the gateway
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::ROOT_MESSAGE;

/// Root routes implementation
pub struct RootRoutes;

impl RootRoutes {
    /// Create the liveness route
    #[must_use]
    pub fn routes() -> axum::Router {
        use axum::{routing::get, Json, Router};

        async fn root_handler() -> Json<serde_json::Value> {
            Json(serde_json::json!({ "message": ROOT_MESSAGE }))
        }

        Router::new().route("/", get(root_handler))
    }
}
