// ABOUTME: Application constants for data cleaning, MFA lifetime and Garmin regions
// ABOUTME: Single place for tunables shared between the provider and the HTTP service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Field names removed by the sanitizer
pub mod sanitize {
    /// Internal Garmin bookkeeping keys dropped at any depth
    pub const DENYLISTED_KEYS: &[&str] = &[
        "ownerId",
        "userProfilePk",
        "permissionId",
        "userRoles",
        "equipmentTypeId",
    ];

    /// Keys containing this substring are dropped (workout step comparators)
    pub const DENYLISTED_KEY_FRAGMENT: &str = "endConditionCompare";
}

/// Pending MFA handshake lifetime
pub mod mfa {
    /// Age after which a pending challenge is eligible for removal
    pub const DEFAULT_TTL_SECS: u64 = 5 * 60;
}

/// Garmin Connect regional domains
pub mod regions {
    /// Global Garmin Connect
    pub const GLOBAL_DOMAIN: &str = "garmin.com";
    /// Garmin Connect China
    pub const CHINA_DOMAIN: &str = "garmin.cn";
}

/// Provider identifiers used in errors and logs
pub mod providers {
    /// Garmin Connect
    pub const GARMIN: &str = "garmin";
}

/// Service names for structured logging
pub mod service_names {
    /// Gateway server
    pub const GARMIN_GATEWAY: &str = "garmin-gateway";
}
