// ABOUTME: Structured error types for upstream provider operations
// ABOUTME: Distinguishes auth, transport, API status, parsing and unsupported-feature failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Errors raised by a provider call
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status
    #[error("{provider} API error ({status_code}): {message}")]
    ApiError {
        /// Provider name
        provider: String,
        /// HTTP status returned upstream
        status_code: u16,
        /// Response body or reason
        message: String,
    },

    /// Login, MFA verification, or token exchange was rejected
    #[error("Authentication with {provider} failed: {reason}")]
    AuthenticationFailed {
        /// Provider name
        provider: String,
        /// What went wrong
        reason: String,
    },

    /// The opaque session token blob could not be decoded
    #[error("Invalid session tokens: {0}")]
    InvalidTokens(String),

    /// Connection, TLS or timeout failure
    #[error("Network error talking to {provider}: {message}")]
    Network {
        /// Provider name
        provider: String,
        /// Transport error text
        message: String,
    },

    /// A response body did not have the expected shape
    #[error("Failed to parse {provider} response: {reason}")]
    Parse {
        /// Provider name
        provider: String,
        /// Parser error text
        reason: String,
    },

    /// The provider does not implement this capability
    #[error("{provider} does not support {feature}")]
    UnsupportedFeature {
        /// Provider name
        provider: String,
        /// Capability name
        feature: String,
    },
}

impl ProviderError {
    /// Whether the failure means the caller's credentials or tokens were rejected
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        match self {
            Self::AuthenticationFailed { .. } | Self::InvalidTokens(_) => true,
            Self::ApiError { status_code, .. } => *status_code == 401 || *status_code == 403,
            Self::Network { .. } | Self::Parse { .. } | Self::UnsupportedFeature { .. } => false,
        }
    }

    /// Shorthand for an `UnsupportedFeature` error
    pub fn unsupported(provider: impl Into<String>, feature: impl Into<String>) -> Self {
        Self::UnsupportedFeature {
            provider: provider.into(),
            feature: feature.into(),
        }
    }
}

/// Result alias for provider calls
pub type ProviderResult<T> = Result<T, ProviderError>;
