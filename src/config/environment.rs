// ABOUTME: Environment-based server configuration
// ABOUTME: Reads GARMIN_* variables (optionally from .env) into a typed ServerConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{env_vars, mfa, ports, timeouts};
use anyhow::{Context, Result};
use gateway_providers::garmin::OAuthConsumer;
use gateway_providers::GarminConfig;
use std::env;
use std::time::Duration;
use tracing::{info, warn};

/// Timeouts applied to every upstream call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout, seconds
    pub timeout_secs: u64,
    /// Connect timeout, seconds
    pub connect_timeout_secs: u64,
}

/// Gateway server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listening port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Use the Garmin China region
    pub is_cn: bool,
    /// Age after which a pending MFA challenge may be swept
    pub mfa_ttl: Duration,
    /// Upstream HTTP timeouts
    pub http_client: HttpClientConfig,
    /// Fixed `OAuth1` consumer credentials, if supplied
    pub oauth_consumer: Option<OAuthConsumer>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: ports::DEFAULT_HTTP_PORT,
            host: ports::DEFAULT_HOST.to_owned(),
            is_cn: false,
            mfa_ttl: Duration::from_secs(mfa::DEFAULT_TTL_SECS),
            http_client: HttpClientConfig {
                timeout_secs: timeouts::DEFAULT_HTTP_TIMEOUT_SECS,
                connect_timeout_secs: timeouts::DEFAULT_HTTP_CONNECT_TIMEOUT_SECS,
            },
            oauth_consumer: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that does not parse
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {e}");
        }

        let oauth_consumer = match (
            env::var(env_vars::OAUTH_CONSUMER_KEY).ok(),
            env::var(env_vars::OAUTH_CONSUMER_SECRET).ok(),
        ) {
            (Some(consumer_key), Some(consumer_secret)) => Some(OAuthConsumer {
                consumer_key,
                consumer_secret,
            }),
            (None, None) => None,
            _ => {
                warn!(
                    "Only one of {} / {} is set; consumer credentials will be fetched",
                    env_vars::OAUTH_CONSUMER_KEY,
                    env_vars::OAUTH_CONSUMER_SECRET
                );
                None
            }
        };

        let config = Self {
            http_port: env_var_or(env_vars::PORT, &ports::DEFAULT_HTTP_PORT.to_string())
                .parse()
                .with_context(|| format!("Invalid {} value", env_vars::PORT))?,
            host: env_var_or(env_vars::HOST, ports::DEFAULT_HOST),
            is_cn: is_china_region(&env_var_or(env_vars::IS_CN, "false")),
            mfa_ttl: Duration::from_secs(
                env_var_or(env_vars::MFA_TTL_SECS, &mfa::DEFAULT_TTL_SECS.to_string())
                    .parse()
                    .with_context(|| format!("Invalid {} value", env_vars::MFA_TTL_SECS))?,
            ),
            http_client: HttpClientConfig {
                timeout_secs: env_var_or(
                    env_vars::HTTP_TIMEOUT_SECS,
                    &timeouts::DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .with_context(|| format!("Invalid {} value", env_vars::HTTP_TIMEOUT_SECS))?,
                connect_timeout_secs: env_var_or(
                    env_vars::HTTP_CONNECT_TIMEOUT_SECS,
                    &timeouts::DEFAULT_HTTP_CONNECT_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .with_context(|| {
                    format!("Invalid {} value", env_vars::HTTP_CONNECT_TIMEOUT_SECS)
                })?,
            },
            oauth_consumer,
        };

        info!("{}", config.summary());
        Ok(config)
    }

    /// Garmin endpoint configuration for the selected region
    #[must_use]
    pub fn garmin_config(&self) -> GarminConfig {
        let config = GarminConfig::for_region(self.is_cn);
        match &self.oauth_consumer {
            Some(consumer) => config.with_consumer(consumer.clone()),
            None => config,
        }
    }

    /// Human-readable summary for startup logs; never includes secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Garmin Gateway Configuration:\n\
             - Listen: {}:{}\n\
             - Region: {}\n\
             - MFA TTL: {}s\n\
             - HTTP timeout: {}s (connect {}s)\n\
             - OAuth consumer: {}",
            self.host,
            self.http_port,
            if self.is_cn { "China" } else { "Global" },
            self.mfa_ttl.as_secs(),
            self.http_client.timeout_secs,
            self.http_client.connect_timeout_secs,
            if self.oauth_consumer.is_some() {
                "Configured"
            } else {
                "Fetched on first login"
            }
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Only a case-insensitive `true` selects the China region
fn is_china_region(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_china_region_flag() {
        assert!(is_china_region("true"));
        assert!(is_china_region("TRUE"));
        assert!(is_china_region(" True "));
        for other in ["false", "1", "yes", "on", "maybe", ""] {
            assert!(!is_china_region(other), "{other} selected China");
        }
    }

    #[test]
    fn test_region_selects_domain() {
        let config = ServerConfig {
            is_cn: true,
            ..ServerConfig::default()
        };
        assert_eq!(config.garmin_config().domain, "garmin.cn");
        assert_eq!(ServerConfig::default().garmin_config().domain, "garmin.com");
    }

    #[test]
    fn test_summary_hides_secrets() {
        let config = ServerConfig {
            oauth_consumer: Some(OAuthConsumer {
                consumer_key: "key".to_owned(),
                consumer_secret: "super-secret".to_owned(),
            }),
            ..ServerConfig::default()
        };
        assert!(!config.summary().contains("super-secret"));
    }
}
