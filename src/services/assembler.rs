// ABOUTME: Final assembly of the health and wellness result mapping
// ABOUTME: Sanitizes the collected records once and drops kinds left empty
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gateway_core::sanitize::{is_truthy, sanitize};
use serde_json::{Map, Value};

/// Sanitize the whole result mapping, then remove kinds with empty values
///
/// Sanitizing runs once over the complete mapping rather than per field.
#[must_use]
pub fn assemble_metrics(data: Map<String, Value>) -> Map<String, Value> {
    match sanitize(Value::Object(data)) {
        Some(Value::Object(cleaned)) => cleaned
            .into_iter()
            .filter(|(_, value)| is_truthy(value))
            .collect(),
        _ => Map::new(),
    }
}
