// ABOUTME: Shared HTTP client with connection pooling for Garmin API calls
// ABOUTME: Singleton data client plus cookie-bearing clients for SSO logins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gateway_core::constants::providers;
use gateway_core::{ProviderError, ProviderResult};
use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// User agent Garmin expects from its mobile app
pub const USER_AGENT: &str = "com.garmin.android.apps.connectmobile";

/// Configured timeout values for provider clients
static CLIENT_TIMEOUTS: OnceLock<(u64, u64)> = OnceLock::new();

/// Global shared HTTP client with configured timeouts
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Initialize the HTTP client timeout configuration
///
/// Must be called once at server startup before the first provider call.
/// If not called, reasonable defaults are used (30s timeout, 10s connect timeout).
pub fn initialize_shared_client(timeout_secs: u64, connect_timeout_secs: u64) {
    let _ = CLIENT_TIMEOUTS.set((timeout_secs, connect_timeout_secs));
}

fn timeouts() -> (Duration, Duration) {
    let (timeout, connect_timeout) = CLIENT_TIMEOUTS
        .get()
        .copied()
        .unwrap_or((DEFAULT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS));
    (
        Duration::from_secs(timeout),
        Duration::from_secs(connect_timeout),
    )
}

/// Get the shared HTTP client for bearer-token API calls
///
/// This client pools connections and never stores cookies.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        let (timeout, connect_timeout) = timeouts();
        ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Build a fresh client with its own cookie jar for one SSO login
///
/// SSO state lives in cookies, so each login (and its MFA resume) needs a
/// private jar that is never shared with other users.
///
/// # Errors
///
/// Returns a network error if the TLS backend cannot be initialized
pub fn sso_client() -> ProviderResult<Client> {
    let (timeout, connect_timeout) = timeouts();
    ClientBuilder::new()
        .user_agent(USER_AGENT)
        .cookie_store(true)
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .build()
        .map_err(|e| ProviderError::Network {
            provider: providers::GARMIN.to_owned(),
            message: format!("Failed to build SSO client: {e}"),
        })
}
