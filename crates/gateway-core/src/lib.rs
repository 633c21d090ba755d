// ABOUTME: Core types and pure data transformations for the Garmin gateway
// ABOUTME: Foundation crate with error handling, sanitizer, unit conversion and metric catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Gateway Core
//!
//! Foundation crate shared by the provider implementation and the HTTP
//! service. Everything here is synchronous and free of I/O.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode` and the provider-level `ProviderError`
//! - **constants**: denylisted fields, MFA lifetime, region domains
//! - **sanitize**: recursive cleaning of upstream JSON documents
//! - **units**: gram/meter/second converters and JSON field helpers
//! - **dates**: inclusive calendar date ranges
//! - **models**: metric-kind catalog

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Recursive cleaner for upstream JSON payloads
pub mod sanitize;

/// Unit conversions applied to optional numeric fields
pub mod units;

/// Inclusive calendar date ranges
pub mod dates;

/// Metric catalog and request models
pub mod models;

pub use dates::DateRange;
pub use errors::{AppError, AppResult, ErrorCode, ProviderError, ProviderResult};
pub use models::{MetricCategory, MetricKind};
pub use sanitize::{sanitize, sanitize_document};
