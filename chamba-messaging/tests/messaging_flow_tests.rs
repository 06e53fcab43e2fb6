// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end flows through the Messenger facade, against the mock REST
//! backend and mock transport.

mod common;

use std::sync::{Arc, Mutex};

use chamba_messaging::api::{Credentials, Messenger, MessagingConfig, MessagingEvent};
use chamba_messaging::network::{create_frame, FramePayload, MockTransport, ReadStatePayload};
use chamba_messaging::rest::{ApiError, ApplicantRef, MockApi, VacancyRef};
use common::fixtures;

const SELF_USER: i64 = 7;
const OTHER_USER: i64 = 8;

fn messenger_with(api: MockApi) -> Messenger<MockApi, MockTransport> {
    let config = MessagingConfig::new("https://api.chamba.test", "ws://localhost:9000");
    Messenger::new(
        api,
        MockTransport::new,
        config,
        Credentials::new(SELF_USER, "bearer-token"),
    )
}

fn seeded_api() -> MockApi {
    let api = MockApi::new(SELF_USER, "Yo");
    api.seed_conversation(
        fixtures::direct_summary(9, "Luis"),
        vec![
            fixtures::participant(SELF_USER, None),
            fixtures::participant(OTHER_USER, None),
        ],
    );
    api.seed_conversation(
        fixtures::direct_summary(42, "Ana"),
        vec![
            fixtures::participant(SELF_USER, None),
            fixtures::participant(OTHER_USER, None),
        ],
    );
    api.seed_messages(42, vec![fixtures::message(500, 42, OTHER_USER, "buenas")]);
    api
}

fn push_message(m: &mut Messenger<MockApi, MockTransport>, id: i64, conversation: i64, sender: i64) {
    m.session_mut()
        .transport_mut()
        .expect("connected transport")
        .queue_receive(create_frame(FramePayload::MessageCreated(
            fixtures::message(id, conversation, sender, "Hola"),
        )));
}

fn detail_ids(m: &Messenger<MockApi, MockTransport>) -> Vec<i64> {
    m.detail().messages().iter().map(|msg| msg.id).collect()
}

fn list_ids(m: &Messenger<MockApi, MockTransport>) -> Vec<i64> {
    m.list().items().iter().map(|c| c.id).collect()
}

// === Scenario: send and confirmation ===

#[tokio::test]
async fn test_send_confirms_appends_once_and_moves_conversation_to_front() {
    let mut m = messenger_with(seeded_api());
    m.connect().unwrap();
    m.refresh_list(1).await.unwrap();
    m.open_conversation(42).await.unwrap();

    let sent = m.send(42, "Hola").await.unwrap().expect("confirmed");

    assert_eq!(sent.id, 501);
    assert_eq!(sent.sender_user_id, SELF_USER);
    assert_eq!(detail_ids(&m), vec![500, 501]);

    let row = m.list().get(42).unwrap();
    assert_eq!(row.preview.as_deref(), Some("Hola"));
    assert_eq!(row.unread_count, 0);
    assert_eq!(list_ids(&m)[0], 42);

    // Draft cleared, composer idle again
    assert_eq!(m.draft(), "");
    assert!(!m.is_sending());
}

#[tokio::test]
async fn test_push_of_own_confirmed_message_is_deduplicated() {
    let mut m = messenger_with(seeded_api());
    m.connect().unwrap();
    m.refresh_list(1).await.unwrap();
    m.open_conversation(42).await.unwrap();

    let sent = m.send(42, "Hola").await.unwrap().unwrap();

    // The room push for our own message arrives after the confirmation
    push_message(&mut m, sent.id, 42, SELF_USER);
    m.pump().await;

    assert_eq!(detail_ids(&m), vec![500, 501]);
}

#[tokio::test]
async fn test_failed_send_retains_draft_and_appends_nothing() {
    let mut m = messenger_with(seeded_api());
    m.connect().unwrap();
    m.refresh_list(1).await.unwrap();
    m.open_conversation(42).await.unwrap();

    m.set_draft("Hola");
    m.api().fail_next(ApiError::Validation("no elegible".into()));

    let err = m.send_draft(42).await.unwrap_err();
    assert!(err.is_recoverable());

    assert_eq!(m.draft(), "Hola");
    assert!(!m.is_sending());
    assert_eq!(detail_ids(&m), vec![500]);
}

#[tokio::test]
async fn test_empty_draft_never_reaches_the_server() {
    let mut m = messenger_with(seeded_api());
    m.connect().unwrap();
    m.open_conversation(42).await.unwrap();

    let result = m.send(42, "   ").await;
    assert!(result.is_err());

    // Only the history message is there; nothing was persisted
    assert_eq!(detail_ids(&m), vec![500]);
}

// === Scenario: push while another conversation is open ===

#[tokio::test]
async fn test_push_for_background_conversation_increments_unread_only() {
    let mut m = messenger_with(seeded_api());
    m.connect().unwrap();
    m.refresh_list(1).await.unwrap();
    m.open_conversation(9).await.unwrap();
    let detail_before = detail_ids(&m);

    push_message(&mut m, 502, 42, OTHER_USER);
    m.pump().await;

    let row = m.list().get(42).unwrap();
    assert_eq!(row.unread_count, 1);
    assert_eq!(list_ids(&m)[0], 42);

    // The open conversation is untouched
    assert_eq!(m.detail().open_id(), Some(9));
    assert_eq!(detail_ids(&m), detail_before);
}

#[tokio::test]
async fn test_push_for_open_conversation_appends_and_acknowledges() {
    let mut m = messenger_with(seeded_api());
    m.connect().unwrap();
    m.refresh_list(1).await.unwrap();
    m.open_conversation(42).await.unwrap();

    push_message(&mut m, 501, 42, OTHER_USER);
    m.pump().await;

    assert_eq!(detail_ids(&m), vec![500, 501]);
    // Reading along: no unread accumulates and the ack reached the server
    assert_eq!(m.list().get(42).unwrap().unread_count, 0);
    assert!(m.api().read_calls().contains(&(42, Some(501))));
}

// === Scenario: read receipts ===

#[tokio::test]
async fn test_open_acknowledges_latest_message() {
    let mut m = messenger_with(seeded_api());
    m.connect().unwrap();
    m.open_conversation(42).await.unwrap();

    assert_eq!(m.api().read_calls(), vec![(42, Some(500))]);
}

#[tokio::test]
async fn test_counterpart_watermark_marks_self_messages_seen_up_to_it() {
    let api = MockApi::new(SELF_USER, "Yo");
    api.seed_conversation(
        fixtures::direct_summary(42, "Ana"),
        vec![
            fixtures::participant(SELF_USER, None),
            fixtures::participant(OTHER_USER, None),
        ],
    );
    api.seed_messages(
        42,
        vec![
            fixtures::message(500, 42, SELF_USER, "a"),
            fixtures::message(501, 42, SELF_USER, "b"),
            fixtures::message(502, 42, OTHER_USER, "c"),
        ],
    );

    let mut m = messenger_with(api);
    m.connect().unwrap();
    m.open_conversation(42).await.unwrap();
    assert_eq!(m.watermark(), 0);

    // The counterpart acknowledges up to 502
    m.session_mut()
        .transport_mut()
        .unwrap()
        .queue_receive(create_frame(FramePayload::ReadStateChanged(
            ReadStatePayload {
                conversation_id: 42,
                user_id: OTHER_USER,
                last_read_message_id: 502,
            },
        )));
    m.pump().await;

    assert_eq!(m.watermark(), 502);
    let messages: Vec<_> = m.detail().messages().to_vec();
    assert!(m.is_seen(&messages[0]));
    assert!(m.is_seen(&messages[1]));
    // Authored by the counterpart: never marked seen from here
    assert!(!m.is_seen(&messages[2]));

    // A message sent after the acknowledgment is not seen yet
    let sent = m.send(42, "d").await.unwrap().unwrap();
    assert_eq!(sent.id, 503);
    assert!(!m.is_seen(&sent));
}

// === Scenario: idempotent creation ===

#[tokio::test]
async fn test_vacancy_conversation_creation_is_idempotent() {
    let mut m = messenger_with(MockApi::new(SELF_USER, "Yo"));

    let first = m.create_vacancy_conversation(10, 5).await.unwrap();
    let second = m.create_vacancy_conversation(10, 5).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(list_ids(&m), vec![first.id]);

    // A different pair creates a different conversation
    let third = m.create_vacancy_conversation(10, 6).await.unwrap();
    assert_ne!(first.id, third.id);
}

#[tokio::test]
async fn test_direct_conversation_creation_is_idempotent() {
    let mut m = messenger_with(MockApi::new(SELF_USER, "Yo"));

    let first = m.create_direct_conversation(OTHER_USER).await.unwrap();
    let second = m.create_direct_conversation(OTHER_USER).await.unwrap();

    assert_eq!(first.id, second.id);
}

// === Scenario: session reuse across remounts ===

#[tokio::test]
async fn test_disconnect_connect_within_grace_reuses_handle() {
    let mut m = messenger_with(seeded_api());

    let first = m.connect().unwrap();
    m.disconnect();
    let second = m.connect().unwrap();

    assert_eq!(first, second);
    assert_eq!(
        m.session().transport().unwrap().connect_count(),
        1,
        "the connection must not close and reopen across a fast remount"
    );
}

// === Error recovery ===

#[tokio::test]
async fn test_failed_refresh_preserves_previous_list() {
    let mut m = messenger_with(seeded_api());
    m.refresh_list(1).await.unwrap();
    assert_eq!(list_ids(&m), vec![9, 42]);

    m.api().fail_next(ApiError::Http(500));
    assert!(m.refresh_list(1).await.is_err());

    assert_eq!(list_ids(&m), vec![9, 42]);
}

#[tokio::test]
async fn test_failed_open_preserves_previous_detail() {
    let mut m = messenger_with(seeded_api());
    m.connect().unwrap();
    m.open_conversation(42).await.unwrap();

    let err = m.open_conversation(99).await.unwrap_err();
    assert!(err.is_recoverable());

    assert_eq!(m.detail().open_id(), Some(42));
    assert_eq!(detail_ids(&m), vec![500]);
}

#[tokio::test]
async fn test_unauthorized_is_flagged_for_reauthentication() {
    let mut m = messenger_with(seeded_api());

    m.api().fail_next(ApiError::Unauthorized);
    let err = m.refresh_list(1).await.unwrap_err();

    assert!(err.is_auth_failure());
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn test_transport_error_becomes_error_event() {
    let mut m = messenger_with(seeded_api());
    m.connect().unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    m.on_event(move |event| sink.lock().unwrap().push(event));

    m.session_mut()
        .transport_mut()
        .unwrap()
        .inject_error(chamba_messaging::network::NetworkError::ConnectionClosed);
    m.pump().await;

    let events = seen.lock().unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, MessagingEvent::Error { .. })));
}

// === Events ===

#[tokio::test]
async fn test_push_dispatches_message_received_event() {
    let mut m = messenger_with(seeded_api());
    m.connect().unwrap();
    m.refresh_list(1).await.unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    m.on_event(move |event| sink.lock().unwrap().push(event));

    push_message(&mut m, 502, 42, OTHER_USER);
    m.pump().await;

    let events = seen.lock().unwrap();
    assert!(events.iter().any(|e| matches!(
        e,
        MessagingEvent::MessageReceived {
            conversation_id: 42,
            message_id: 502
        }
    )));
}

// === New-conversation picker collaborators ===

#[tokio::test]
async fn test_picker_lookups_pass_through() {
    let api = MockApi::new(SELF_USER, "Yo");
    api.seed_vacancies(vec![VacancyRef {
        id: 10,
        title: "Backend Dev".into(),
    }]);
    api.seed_applicants(
        10,
        vec![ApplicantRef {
            candidate_id: 5,
            name: "Carla".into(),
            avatar_url: None,
        }],
    );

    let m = messenger_with(api);

    let vacancies = m.active_vacancies().await.unwrap();
    assert_eq!(vacancies.len(), 1);
    assert_eq!(vacancies[0].title, "Backend Dev");

    let applicants = m.vacancy_applicants(10).await.unwrap();
    assert_eq!(applicants.len(), 1);
    assert_eq!(applicants[0].candidate_id, 5);
}
