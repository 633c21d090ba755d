// ABOUTME: Server constants and environment variable accessors
// ABOUTME: Ports, hosts and defaults for the gateway process
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use gateway_core::constants::{mfa, providers, regions, service_names};

/// Network defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8000;
    /// Default bind address
    pub const DEFAULT_HOST: &str = "0.0.0.0";
}

/// HTTP client timeout defaults
pub mod timeouts {
    /// Whole-request timeout for upstream calls, seconds
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
    /// Connect timeout for upstream calls, seconds
    pub const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Environment variable names
pub mod env_vars {
    /// Listening port
    pub const PORT: &str = "GARMIN_SERVICE_PORT";
    /// Bind address
    pub const HOST: &str = "GARMIN_SERVICE_HOST";
    /// `true` selects the China region
    pub const IS_CN: &str = "GARMIN_SERVICE_IS_CN";
    /// Pending MFA lifetime in seconds
    pub const MFA_TTL_SECS: &str = "GARMIN_MFA_TTL_SECS";
    /// Upstream request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "GARMIN_HTTP_TIMEOUT_SECS";
    /// Upstream connect timeout in seconds
    pub const HTTP_CONNECT_TIMEOUT_SECS: &str = "GARMIN_HTTP_CONNECT_TIMEOUT_SECS";
    /// `OAuth1` consumer key override
    pub const OAUTH_CONSUMER_KEY: &str = "GARMIN_OAUTH_CONSUMER_KEY";
    /// `OAuth1` consumer secret override
    pub const OAUTH_CONSUMER_SECRET: &str = "GARMIN_OAUTH_CONSUMER_SECRET";
}

/// Liveness message returned by `GET /`
pub const ROOT_MESSAGE: &str = "Garmin gateway is running";

/// Header carrying the request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";
