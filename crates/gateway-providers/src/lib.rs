// ABOUTME: Provider layer for the Garmin gateway
// ABOUTME: Capability traits plus the Garmin Connect SSO, OAuth and data client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Gateway Providers
//!
//! The HTTP service only sees two traits: [`GarminConnector`] for login and
//! per-request sessions, and [`GarminDataSource`] for the data endpoints.
//! [`garmin::GarminConnectConnector`] is the real implementation; tests
//! substitute their own doubles.

/// Capability traits, login outcomes and the opaque MFA continuation
pub mod core;

/// Shared HTTP client with configured timeouts
pub mod http_client;

/// Authenticated request helpers shared by provider clients
pub mod utils;

/// Garmin Connect implementation
pub mod garmin;

pub use crate::core::{
    GarminConnector, GarminDataSource, LoginOutcome, MfaContinuation, SessionTokens,
};
pub use garmin::{GarminConfig, GarminConnectConnector};
