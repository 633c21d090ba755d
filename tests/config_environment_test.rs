// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Defaults, overrides, region selection and invalid values, serialized over env access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use garmin_gateway::config::ServerConfig;
use garmin_gateway::constants::env_vars;
use serial_test::serial;
use std::env;
use std::time::Duration;

const ALL_VARS: [&str; 8] = [
    env_vars::PORT,
    env_vars::HOST,
    env_vars::IS_CN,
    env_vars::MFA_TTL_SECS,
    env_vars::HTTP_TIMEOUT_SECS,
    env_vars::HTTP_CONNECT_TIMEOUT_SECS,
    env_vars::OAUTH_CONSUMER_KEY,
    env_vars::OAUTH_CONSUMER_SECRET,
];

fn clear_env() {
    for key in ALL_VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8000);
    assert_eq!(config.host, "0.0.0.0");
    assert!(!config.is_cn);
    assert_eq!(config.mfa_ttl, Duration::from_secs(300));
    assert_eq!(config.http_client.timeout_secs, 30);
    assert_eq!(config.http_client.connect_timeout_secs, 10);
    assert!(config.oauth_consumer.is_none());
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var(env_vars::PORT, "9100");
    env::set_var(env_vars::IS_CN, "true");
    env::set_var(env_vars::MFA_TTL_SECS, "60");
    env::set_var(env_vars::OAUTH_CONSUMER_KEY, "key");
    env::set_var(env_vars::OAUTH_CONSUMER_SECRET, "secret");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.http_port, 9100);
    assert!(config.is_cn);
    assert_eq!(config.mfa_ttl, Duration::from_secs(60));
    assert_eq!(config.garmin_config().domain, "garmin.cn");
    assert!(config.garmin_config().consumer.is_some());
}

#[test]
#[serial]
fn test_half_configured_consumer_is_ignored() {
    clear_env();
    env::set_var(env_vars::OAUTH_CONSUMER_KEY, "key");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert!(config.oauth_consumer.is_none());
}

#[test]
#[serial]
fn test_invalid_values_are_errors() {
    clear_env();
    env::set_var(env_vars::PORT, "not-a-port");
    let result = ServerConfig::from_env();
    clear_env();
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_unrecognised_region_flag_falls_back_to_global() {
    for value in ["perhaps", "1", "yes"] {
        clear_env();
        env::set_var(env_vars::IS_CN, value);
        let config = ServerConfig::from_env().unwrap();
        clear_env();
        assert!(!config.is_cn, "{value} selected China");
        assert_eq!(config.garmin_config().domain, "garmin.com");
    }
}
