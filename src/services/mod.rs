// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Login state machine, metric orchestration and activity expansion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers validate input and hand off to these services, which only
//! depend on the provider capability traits.

/// Activity and workout detail expansion
pub mod activities;

/// Final sanitize-and-filter pass over metric results
pub mod assembler;

/// Login and MFA resume state machine
pub mod auth;

/// Raw metric payload to output record mapping
pub mod metric_mapping;

/// Per-metric fault-isolated fetch orchestration
pub mod metrics;

pub use activities::{fetch_activities_and_workouts, ActivityReport};
pub use assembler::assemble_metrics;
pub use auth::{LoginResponse, LoginService};
pub use metrics::{fetch_metrics, resolve_kinds, FetchReport, MetricFailure};
