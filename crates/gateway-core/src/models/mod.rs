// ABOUTME: Core data models for the Garmin gateway
// ABOUTME: Re-exports the metric-kind catalog and its fetch categories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `MetricKind`: every health metric the gateway can return, by wire name
//! - `MetricCategory`: whether a kind is fetched once per request or once per date

mod metric;

pub use metric::{MetricCategory, MetricKind};
