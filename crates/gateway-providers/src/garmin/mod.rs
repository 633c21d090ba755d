// ABOUTME: Garmin Connect provider: SSO login with MFA, OAuth token exchange and data endpoints
// ABOUTME: Implements the connector and data-source traits against the real upstream service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Garmin Connect
//!
//! Login runs in three stages:
//!
//! 1. **SSO**: the embedded sign-in widget is driven with a cookie-bearing
//!    client until it yields a service ticket, pausing at the MFA page when
//!    the account requires a second factor ([`sso`]).
//! 2. **`OAuth1`**: the ticket is exchanged for an `OAuth1` token using the
//!    public mobile-app consumer credentials ([`exchange`], [`oauth1`]).
//! 3. **`OAuth2`**: the `OAuth1` token is exchanged for a short-lived bearer
//!    token used by every data endpoint ([`exchange`]).
//!
//! Both tokens travel back to the caller as one opaque blob ([`tokens`]).

/// Region, hosts and consumer credential configuration
pub mod config;

/// Authenticated data client
pub mod client;

/// Connector implementing login, MFA resume and session opening
pub mod connector;

/// Ticket to `OAuth1` and `OAuth1` to `OAuth2` exchanges
pub mod exchange;

/// RFC 5849 HMAC-SHA1 request signing
pub mod oauth1;

/// SSO widget login flow
pub mod sso;

/// Token types and the session blob codec
pub mod tokens;

pub use client::GarminConnectClient;
pub use config::{GarminConfig, OAuthConsumer};
pub use connector::GarminConnectConnector;
