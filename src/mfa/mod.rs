// ABOUTME: Pending multi-factor authentication handshakes
// ABOUTME: Time-bounded store mapping challenge tokens to provider continuations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Concurrent challenge-token store
pub mod store;

pub use store::MfaStateStore;
