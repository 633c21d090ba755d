// ABOUTME: Main library entry point for the Garmin gateway service
// ABOUTME: Exposes health metrics, activities and the MFA login flow over a small JSON API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Garmin Gateway
//!
//! A stateless HTTP proxy in front of Garmin Connect. Callers log in once
//! (possibly through an MFA challenge), keep the returned opaque session
//! blob, and present it on every data request.
//!
//! ## Architecture
//!
//! - **routes**: request validation and thin axum handlers
//! - **services**: login state machine, metric orchestration, activity expansion
//! - **mfa**: process-wide store of pending MFA handshakes
//! - **resources**: shared state injected into handlers
//! - **config** / **logging**: environment-driven configuration and tracing setup
//!
//! Upstream access goes through the `gateway-providers` capability traits;
//! pure data transformations live in `gateway-core`.

/// Environment-driven server configuration
pub mod config;

/// Application constants
pub mod constants;

/// Error types re-exported from the core crate
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Pending MFA handshake store
pub mod mfa;

/// HTTP middleware
pub mod middleware;

/// Shared resources injected into handlers
pub mod resources;

/// HTTP routes
pub mod routes;

/// Server bootstrap
pub mod server;

/// Domain services
pub mod services;
