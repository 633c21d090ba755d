// ABOUTME: Configuration module for the gateway server
// ABOUTME: Environment-driven settings for network, region, MFA lifetime and HTTP client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment configuration
pub mod environment;

pub use environment::{HttpClientConfig, ServerConfig};
