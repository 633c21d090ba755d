// ABOUTME: Concurrent store of pending MFA logins keyed by unguessable challenge tokens
// ABOUTME: Single-consumer take, opportunistic TTL sweep on each new login attempt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # MFA State Store
//!
//! When Garmin asks for a second factor, the provider's continuation is
//! parked here under a fresh challenge token and only the token goes back to
//! the caller. The entry is consumed exactly once by `take`.
//!
//! Expiry is opportunistic: `sweep_expired` runs when a new login starts and
//! removes entries older than the TTL. There is no background timer, so with
//! no login traffic expired entries stay resident until the next sweep.
//! `take` does not look at age; an expired entry that has not been swept
//! yet can still be resumed.

use dashmap::DashMap;
use gateway_providers::MfaContinuation;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

/// One pending MFA handshake
struct MfaSession {
    continuation: MfaContinuation,
    created_at: Instant,
}

/// Process-wide store of pending MFA handshakes
pub struct MfaStateStore {
    sessions: DashMap<String, MfaSession>,
    ttl: Duration,
}

impl std::fmt::Debug for MfaStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MfaStateStore")
            .field("pending", &self.sessions.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl MfaStateStore {
    /// Empty store whose entries become sweepable after `ttl`
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Park a continuation and return its new challenge token
    #[must_use]
    pub fn insert(&self, continuation: MfaContinuation) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(
            token.clone(),
            MfaSession {
                continuation,
                created_at: Instant::now(),
            },
        );
        debug!(pending = self.sessions.len(), "Stored pending MFA session");
        token
    }

    /// Remove and return the continuation for `token`
    ///
    /// Concurrent callers with the same token race on the removal; exactly
    /// one receives the continuation.
    #[must_use]
    pub fn take(&self, token: &str) -> Option<MfaContinuation> {
        self.sessions
            .remove(token)
            .map(|(_, session)| session.continuation)
    }

    /// Drop every entry older than the TTL; returns how many were removed
    pub fn sweep_expired(&self) -> usize {
        let before = self.sessions.len();
        let ttl = self.ttl;
        self.sessions
            .retain(|_, session| session.created_at.elapsed() <= ttl);
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            debug!(removed, "Swept expired MFA sessions");
        }
        removed
    }

    /// Number of entries currently held, expired or not
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no entries are held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Configured TTL
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique_hex() {
        let store = MfaStateStore::new(Duration::from_secs(300));
        let first = store.insert(MfaContinuation::new(1_u8));
        let second = store.insert(MfaContinuation::new(2_u8));
        assert_ne!(first, second);
        assert_eq!(first.len(), 32);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_take_consumes_once() {
        let store = MfaStateStore::new(Duration::from_secs(300));
        let token = store.insert(MfaContinuation::new("state"));
        assert!(store.take(&token).is_some());
        assert!(store.take(&token).is_none());
        assert!(store.take("unknown").is_none());
        assert!(store.is_empty());
    }
}
