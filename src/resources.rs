// ABOUTME: Centralized resource container injected into every route handler
// ABOUTME: Holds configuration, the Garmin connector and the pending-MFA store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and shared as `Arc<ServerResources>` router state.
//! The MFA store is the only state shared between requests.

use crate::config::ServerConfig;
use crate::mfa::MfaStateStore;
use crate::services::LoginService;
use gateway_providers::{GarminConnectConnector, GarminConnector};
use std::sync::Arc;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Upstream login and session entry point
    pub connector: Arc<dyn GarminConnector>,
    /// Pending MFA handshakes
    pub mfa_store: Arc<MfaStateStore>,
}

impl ServerResources {
    /// Resources backed by the real Garmin Connect connector
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let connector = Arc::new(GarminConnectConnector::new(config.garmin_config()));
        Self::with_connector(config, connector)
    }

    /// Resources with an explicit connector, used by tests with fakes
    #[must_use]
    pub fn with_connector(config: ServerConfig, connector: Arc<dyn GarminConnector>) -> Self {
        let mfa_store = Arc::new(MfaStateStore::new(config.mfa_ttl));
        Self {
            config: Arc::new(config),
            connector,
            mfa_store,
        }
    }

    /// Login service over the shared connector and MFA store
    #[must_use]
    pub fn login_service(&self) -> LoginService {
        LoginService::new(Arc::clone(&self.connector), Arc::clone(&self.mfa_store))
    }
}
