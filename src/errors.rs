// ABOUTME: Error types used across the gateway server
// ABOUTME: Re-exports the shared AppError and ErrorCode from gateway-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use gateway_core::errors::{
    AppError, AppResult, ErrorCode, ErrorResponse, ProviderError, ProviderResult,
};
