// ABOUTME: Integration tests for the pending-MFA store lifecycle
// ABOUTME: Single-consumer take under concurrency and opportunistic TTL sweeping with paused time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::{FakeConnector, FakeSource};
use garmin_gateway::mfa::MfaStateStore;
use garmin_gateway::services::{LoginResponse, LoginService};
use gateway_providers::MfaContinuation;
use std::sync::Arc;
use std::time::Duration;

const TTL: Duration = Duration::from_secs(300);

#[tokio::test(start_paused = true)]
async fn test_sweep_removes_only_entries_older_than_ttl() {
    let store = MfaStateStore::new(TTL);
    let old = store.insert(MfaContinuation::new("old"));

    tokio::time::advance(Duration::from_secs(200)).await;
    let fresh = store.insert(MfaContinuation::new("fresh"));

    tokio::time::advance(Duration::from_secs(101)).await;
    assert_eq!(store.sweep_expired(), 1);

    assert!(store.take(&old).is_none());
    assert!(store.take(&fresh).is_some());
}

#[tokio::test(start_paused = true)]
async fn test_expired_entry_stays_until_a_sweep_runs() {
    let store = MfaStateStore::new(TTL);
    let token = store.insert(MfaContinuation::new("pending"));

    tokio::time::advance(Duration::from_secs(3600)).await;
    // No sweep has happened, so the entry is still resident
    assert_eq!(store.len(), 1);
    assert!(store.take(&token).is_some());
}

#[tokio::test(start_paused = true)]
async fn test_new_login_sweeps_expired_challenges() {
    let store = Arc::new(MfaStateStore::new(TTL));
    let service = LoginService::new(
        Arc::new(FakeConnector::new(FakeSource::new()).with_mfa()),
        Arc::clone(&store),
    );

    let first = service.login("u1", "a@example.com", "pw").await.unwrap();
    let LoginResponse::NeedsMfa { client_state } = first else {
        panic!("expected an MFA challenge");
    };

    tokio::time::advance(TTL + Duration::from_secs(1)).await;
    assert_eq!(store.len(), 1);

    service.login("u2", "b@example.com", "pw").await.unwrap();
    assert_eq!(store.len(), 1);

    let err = service
        .resume("u1", &client_state, common::VALID_MFA_CODE)
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 400);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_take_has_single_winner() {
    let store = Arc::new(MfaStateStore::new(TTL));
    let token = store.insert(MfaContinuation::new(7_u32));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let store = Arc::clone(&store);
            let token = token.clone();
            tokio::spawn(async move { store.take(&token).is_some() })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
    assert!(store.is_empty());
}
