// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for network::session
//!
//! The invariant under test: the connection is open iff the outstanding
//! consumer count is above zero at the moment the grace deadline expires.

use std::thread::sleep;
use std::time::Duration;

use chamba_messaging::network::*;

const GRACE_MS: u64 = 40;

fn manager() -> SessionManager<MockTransport> {
    let config = TransportConfig {
        server_url: "ws://localhost:9000".into(),
        teardown_grace_ms: GRACE_MS,
        ..Default::default()
    };
    SessionManager::new(MockTransport::new, config)
}

fn sleep_past_grace() {
    sleep(Duration::from_millis(GRACE_MS + 20));
}

#[test]
fn test_first_acquire_connects_and_authenticates() {
    let mut mgr = manager();
    assert!(mgr.current().is_none());

    let handle = mgr.acquire("token-1").unwrap();

    assert_eq!(mgr.current(), Some(handle));
    assert_eq!(mgr.consumer_count(), 1);
    assert!(mgr.is_connected());

    // The auth frame carries the first consumer's credential
    let sent = mgr.transport().unwrap().sent_frames().to_vec();
    assert_eq!(sent.len(), 1);
    match &sent[0].payload {
        FramePayload::Auth(auth) => assert_eq!(auth.token, "token-1"),
        other => panic!("expected auth frame, got {:?}", other),
    }
}

#[test]
fn test_second_acquire_shares_connection_and_ignores_credential() {
    let mut mgr = manager();
    let first = mgr.acquire("token-1").unwrap();
    let second = mgr.acquire("token-2").unwrap();

    assert_eq!(first, second);
    assert_eq!(mgr.consumer_count(), 2);

    // No re-authentication happened
    let transport = mgr.transport().unwrap();
    assert_eq!(transport.connect_count(), 1);
    assert_eq!(transport.sent_frames().len(), 1);
}

#[test]
fn test_acquire_reconnects_disconnected_session_with_new_credential() {
    let mut mgr = manager();
    mgr.acquire("token-old").unwrap();

    // Simulate the server dropping the connection
    mgr.transport_mut()
        .unwrap()
        .set_state(ConnectionState::Disconnected);

    mgr.acquire("token-new").unwrap();
    assert!(mgr.is_connected());
    assert_eq!(mgr.consumer_count(), 2);

    let transport = mgr.transport().unwrap();
    assert_eq!(transport.connect_count(), 2);
    let auth_tokens: Vec<_> = transport
        .sent_frames()
        .iter()
        .filter_map(|f| match &f.payload {
            FramePayload::Auth(auth) => Some(auth.token.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(auth_tokens, vec!["token-old", "token-new"]);
}

#[test]
fn test_connection_open_iff_consumers_outstanding_at_grace_expiry() {
    let mut mgr = manager();
    mgr.acquire("token").unwrap();
    mgr.acquire("token").unwrap();

    // One release: a consumer remains, the deadline never arms
    mgr.release();
    sleep_past_grace();
    assert!(!mgr.tick());
    assert!(mgr.is_connected());

    // Last release: deadline arms and expires
    mgr.release();
    assert_eq!(mgr.consumer_count(), 0);
    assert!(mgr.is_connected());
    sleep_past_grace();
    assert!(mgr.tick());
    assert!(!mgr.is_connected());
    assert!(mgr.current().is_none());
}

#[test]
fn test_release_acquire_within_grace_reuses_connection() {
    // Fast component remount: release immediately followed by acquire must
    // not close and reopen the connection
    let mut mgr = manager();
    let first = mgr.acquire("token").unwrap();
    mgr.release();

    let second = mgr.acquire("token").unwrap();
    assert_eq!(first, second);

    sleep_past_grace();
    assert!(!mgr.tick());
    assert!(mgr.is_connected());
    assert_eq!(mgr.transport().unwrap().connect_count(), 1);
}

#[test]
fn test_acquire_after_teardown_opens_fresh_connection() {
    let mut mgr = manager();
    let first = mgr.acquire("token").unwrap();
    mgr.release();
    sleep_past_grace();
    assert!(mgr.tick());

    let second = mgr.acquire("token").unwrap();
    assert_ne!(first, second);
    assert!(mgr.is_connected());
    assert_eq!(mgr.consumer_count(), 1);
}

#[test]
fn test_release_without_session_is_safe() {
    let mut mgr = manager();
    mgr.release();
    mgr.release();
    assert_eq!(mgr.consumer_count(), 0);
    assert!(!mgr.tick());
}

#[test]
fn test_release_floors_at_zero() {
    let mut mgr = manager();
    mgr.acquire("token").unwrap();
    mgr.release();
    mgr.release();
    mgr.release();
    assert_eq!(mgr.consumer_count(), 0);

    // A later acquire still works and counts from one
    mgr.acquire("token").unwrap();
    assert_eq!(mgr.consumer_count(), 1);
}

#[test]
fn test_current_does_not_affect_refcount() {
    let mut mgr = manager();
    mgr.acquire("token").unwrap();

    let _ = mgr.current();
    let _ = mgr.current();
    assert_eq!(mgr.consumer_count(), 1);
}

#[test]
fn test_send_without_session_fails_as_value() {
    let mut mgr = manager();
    let result = mgr.send(FramePayload::JoinRoom { conversation_id: 1 });
    assert!(matches!(result, Err(NetworkError::NotConnected)));
}

#[test]
fn test_poll_event_without_session_is_empty() {
    let mut mgr = manager();
    assert!(mgr.poll_event().unwrap().is_none());
}

#[test]
fn test_poll_event_drains_queued_frames() {
    let mut mgr = manager();
    mgr.acquire("token").unwrap();

    mgr.transport_mut()
        .unwrap()
        .queue_receive(create_frame(FramePayload::LeaveRoom { conversation_id: 3 }));

    let payload = mgr.poll_event().unwrap().unwrap();
    assert_eq!(payload, FramePayload::LeaveRoom { conversation_id: 3 });
    assert!(mgr.poll_event().unwrap().is_none());
}

#[test]
fn test_connect_failure_surfaces_from_acquire() {
    let config = TransportConfig {
        server_url: "ws://localhost:9000".into(),
        teardown_grace_ms: GRACE_MS,
        ..Default::default()
    };
    let mut mgr: SessionManager<MockTransport> = SessionManager::new(
        || {
            let mut transport = MockTransport::new();
            transport.inject_error(NetworkError::ConnectionFailed("refused".into()));
            transport
        },
        config,
    );

    let result = mgr.acquire("token");
    assert!(matches!(result, Err(NetworkError::ConnectionFailed(_))));
    assert!(mgr.current().is_none());
}
