// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Messenger Orchestrator
//!
//! Main entry point for the messaging core. Owns the shared session, the
//! stores, and the REST client; routes push frames; applies the stale-result
//! guards the stores expose.

use std::sync::Arc;

use futures::join;

use crate::chat::types::{ConversationId, ConversationSummary, Message, MessageId};
use crate::chat::{
    counterpart_watermark, is_seen, AckTracker, ComposeError, Composer, ConversationDetailStore,
    ConversationListStore,
};
use crate::network::{
    ConnectionState, FramePayload, RoomBinder, SessionHandle, SessionManager, Transport,
};
use crate::rest::{ConversationsApi, CreateConversationRequest, ListQuery};

use super::config::{Credentials, MessagingConfig};
use super::error::MessagingResult;
use super::events::{CallbackHandler, EventDispatcher, EventHandler, MessagingEvent};

/// Main messaging orchestrator.
///
/// Coordinates the shared realtime session, the conversation stores, and
/// the REST backend. The embedding view layer calls the async operations
/// from its event loop and drives [`pump`](Messenger::pump) to deliver push
/// events.
///
/// # Example
///
/// ```ignore
/// use chamba_messaging::api::{Credentials, Messenger, MessagingConfig};
/// use chamba_messaging::network::WebSocketTransport;
/// use chamba_messaging::rest::HttpApi;
///
/// let config = MessagingConfig::new("https://api.chamba.work", "wss://rt.chamba.work");
/// let api = HttpApi::new(&config.base_url, token.clone())?;
/// let credentials = Credentials::new(user_id, token);
/// let mut messenger =
///     Messenger::new(api, WebSocketTransport::new, config, credentials);
///
/// messenger.connect()?;
/// messenger.refresh_list(1).await?;
/// messenger.open_conversation(42).await?;
/// messenger.send(42, "Hola").await?;
/// ```
pub struct Messenger<A: ConversationsApi, T: Transport> {
    api: A,
    session: SessionManager<T>,
    rooms: RoomBinder,
    list: ConversationListStore,
    detail: ConversationDetailStore,
    composer: Composer,
    acks: AckTracker,
    events: EventDispatcher,
    credentials: Credentials,
    config: MessagingConfig,
    last_connection_state: ConnectionState,
}

impl<A: ConversationsApi, T: Transport> Messenger<A, T> {
    /// Creates a messenger over the given REST client and transport factory.
    pub fn new<F>(api: A, transport_factory: F, config: MessagingConfig, credentials: Credentials) -> Self
    where
        F: FnMut() -> T + Send + 'static,
    {
        let session = SessionManager::new(transport_factory, config.realtime.clone());
        let list = ConversationListStore::new(config.layout);

        Messenger {
            api,
            session,
            rooms: RoomBinder::new(),
            list,
            detail: ConversationDetailStore::new(),
            composer: Composer::new(),
            acks: AckTracker::new(),
            events: EventDispatcher::new(),
            credentials,
            config,
            last_connection_state: ConnectionState::Disconnected,
        }
    }

    // === Connection ===

    /// Acquires the shared session for this view, connecting if necessary.
    pub fn connect(&mut self) -> MessagingResult<SessionHandle> {
        let handle = self.session.acquire(&self.credentials.token)?;
        self.sync_connection_state();
        Ok(handle)
    }

    /// Releases this view's hold on the shared session.
    ///
    /// The connection closes only after the teardown grace window elapses
    /// with no re-acquire, so a remounting view keeps its connection.
    pub fn disconnect(&mut self) {
        self.session.release();
    }

    /// True if the realtime channel is connected.
    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    // === Conversation list ===

    /// Fetches one page of the conversation list, replacing store contents.
    ///
    /// A failed fetch leaves previously loaded rows untouched; a fetch
    /// superseded by a later refresh is discarded.
    pub async fn refresh_list(&mut self, page: u32) -> MessagingResult<&[ConversationSummary]> {
        let generation = self.list.begin_refresh();
        let query = ListQuery {
            page,
            page_size: self.config.page_size,
            ..Default::default()
        };

        let fetched = self.api.list_conversations(&query).await?;
        self.list.commit_refresh(generation, fetched.items);
        Ok(self.list.items())
    }

    /// Like [`refresh_list`](Messenger::refresh_list) with an explicit
    /// query, for the search box and kind filter.
    pub async fn refresh_filtered(
        &mut self,
        query: ListQuery,
    ) -> MessagingResult<&[ConversationSummary]> {
        let generation = self.list.begin_refresh();
        let fetched = self.api.list_conversations(&query).await?;
        self.list.commit_refresh(generation, fetched.items);
        Ok(self.list.items())
    }

    /// The conversation list store, for rendering.
    pub fn list(&self) -> &ConversationListStore {
        &self.list
    }

    // === Conversation detail ===

    /// Opens a conversation: fetches detail and first history page
    /// concurrently, joins its room, and acknowledges the latest message.
    ///
    /// The previous room is left before anything else so no pushes for a
    /// no-longer-displayed conversation arrive while the fetch is in
    /// flight. On failure, previously loaded detail state is preserved and
    /// the error is recoverable (inline error state, not a crash).
    pub async fn open_conversation(&mut self, conversation_id: ConversationId) -> MessagingResult<()> {
        self.rooms.switch(&mut self.session, None);

        let generation = self.detail.begin_open();
        let (detail, history) = join!(
            self.api.conversation(conversation_id),
            self.api
                .messages(conversation_id, 1, self.config.history_page_size),
        );
        let detail = detail?;
        let history = history?;

        if !self
            .detail
            .commit_open(generation, conversation_id, history.items, detail.participants)
        {
            // A later open superseded this one; it drives the view now.
            return Ok(());
        }

        self.rooms.join(&mut self.session, conversation_id);
        self.list.select(conversation_id);

        let latest = self.detail.latest_message_id();
        self.acknowledge(conversation_id, latest).await;

        Ok(())
    }

    /// Closes the open conversation and leaves its room.
    pub fn close_conversation(&mut self) {
        self.rooms.switch(&mut self.session, None);
        self.detail.close();
    }

    /// The conversation detail store, for rendering.
    pub fn detail(&self) -> &ConversationDetailStore {
        &self.detail
    }

    // === Read receipts ===

    /// Acknowledges reading up to `message_id` (or the latest known when
    /// `None`) and clears the unread counter.
    ///
    /// Superseded acknowledgments — a newer one was issued for the same
    /// conversation while this one was in flight — commit no local side
    /// effects, so fast navigation cannot clear counters for the wrong
    /// message.
    pub async fn mark_read(
        &mut self,
        conversation_id: ConversationId,
        message_id: Option<MessageId>,
    ) -> MessagingResult<()> {
        let ticket = self.acks.begin(conversation_id);
        self.api.mark_read(conversation_id, message_id).await?;

        if self.acks.is_current(&ticket) {
            self.list.clear_unread(conversation_id);
            if self.detail.open_id() == Some(conversation_id) {
                let resolved = message_id.or_else(|| self.detail.latest_message_id());
                if let Some(resolved) = resolved {
                    self.detail
                        .apply_read_state(self.credentials.user_id, resolved);
                }
            }
        }
        Ok(())
    }

    /// Highest message id the counterpart has acknowledged in the open
    /// conversation.
    pub fn watermark(&self) -> MessageId {
        counterpart_watermark(self.detail.participants(), self.credentials.user_id)
    }

    /// True iff the message is self-authored and acknowledged by the
    /// counterpart.
    pub fn is_seen(&self, message: &Message) -> bool {
        is_seen(message, self.watermark(), self.credentials.user_id)
    }

    // === Composer ===

    /// Current draft text.
    pub fn draft(&self) -> &str {
        self.composer.draft()
    }

    /// Replaces the draft text. Ignored while a send is in flight.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.composer.set_draft(text);
    }

    /// True while a send round-trip is in flight.
    pub fn is_sending(&self) -> bool {
        self.composer.is_sending()
    }

    /// Sets the draft and submits it. See [`send_draft`](Messenger::send_draft).
    pub async fn send(
        &mut self,
        conversation_id: ConversationId,
        body: &str,
    ) -> MessagingResult<Option<Message>> {
        self.composer.set_draft(body);
        self.send_draft(conversation_id).await
    }

    /// Submits the current draft.
    ///
    /// Empty/whitespace drafts are rejected without contacting the server.
    /// A submit while a send is in flight returns `Ok(None)` — repeated
    /// Enter presses do not produce duplicate sends. On success the
    /// confirmed message lands in the detail store, the list row moves to
    /// the front, and the draft clears. On failure the draft is retained
    /// for retry.
    pub async fn send_draft(
        &mut self,
        conversation_id: ConversationId,
    ) -> MessagingResult<Option<Message>> {
        let body = match self.composer.prepare() {
            Ok(body) => body,
            Err(ComposeError::SendInProgress) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match self.api.send_message(conversation_id, &body).await {
            Ok(message) => {
                self.composer.complete_success();
                self.detail.append(&message);
                self.list
                    .apply_incoming(&message, self.credentials.user_id, self.detail.open_id());
                self.events.dispatch(MessagingEvent::MessageSent {
                    conversation_id,
                    message_id: message.id,
                });
                Ok(Some(message))
            }
            Err(e) => {
                self.composer.complete_failure();
                Err(e.into())
            }
        }
    }

    // === Conversation creation ===

    /// Creates (or returns the existing) conversation for a vacancy and
    /// candidate. Idempotent per (vacancy, candidate) pair; eligibility is
    /// enforced server-side and surfaces as a recoverable validation error.
    pub async fn create_vacancy_conversation(
        &mut self,
        vacancy_id: i64,
        candidate_id: i64,
    ) -> MessagingResult<ConversationSummary> {
        self.create_conversation(CreateConversationRequest::Vacancy {
            vacancy_id,
            candidate_id,
        })
        .await
    }

    /// Creates (or returns the existing) direct conversation with a user.
    pub async fn create_direct_conversation(
        &mut self,
        target_user_id: i64,
    ) -> MessagingResult<ConversationSummary> {
        self.create_conversation(CreateConversationRequest::Direct { target_user_id })
            .await
    }

    async fn create_conversation(
        &mut self,
        request: CreateConversationRequest,
    ) -> MessagingResult<ConversationSummary> {
        let summary = self.api.create_conversation(&request).await?;
        self.list.insert_front(summary.clone());
        Ok(summary)
    }

    // === New-conversation picker collaborators ===

    /// The caller's active vacancies.
    pub async fn active_vacancies(&self) -> MessagingResult<Vec<crate::rest::VacancyRef>> {
        Ok(self.api.active_vacancies().await?)
    }

    /// Applicants on one vacancy.
    pub async fn vacancy_applicants(
        &self,
        vacancy_id: i64,
    ) -> MessagingResult<Vec<crate::rest::ApplicantRef>> {
        Ok(self.api.vacancy_applicants(vacancy_id).await?)
    }

    // === Events & push pump ===

    /// Adds an event handler.
    pub fn add_event_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.events.add_handler(handler);
    }

    /// Adds a closure-based event handler.
    pub fn on_event<F>(&mut self, callback: F)
    where
        F: Fn(MessagingEvent) + Send + Sync + 'static,
    {
        self.events.add_handler(Arc::new(CallbackHandler::new(callback)));
    }

    /// Drives the realtime channel: enforces the session teardown grace
    /// window, drains pushed frames into the stores, and dispatches events.
    ///
    /// Returns the number of frames handled. Transport failures become
    /// [`MessagingEvent::Error`] dispatches, never panics.
    pub async fn pump(&mut self) -> usize {
        self.session.tick();

        let mut handled = 0;
        loop {
            match self.session.poll_event() {
                Ok(Some(payload)) => {
                    self.route(payload).await;
                    handled += 1;
                }
                Ok(None) => break,
                Err(e) => {
                    log::warn!("realtime channel error: {}", e);
                    self.events.dispatch(MessagingEvent::Error {
                        message: e.to_string(),
                    });
                    break;
                }
            }
        }

        self.sync_connection_state();
        handled
    }

    async fn route(&mut self, payload: FramePayload) {
        match payload {
            FramePayload::MessageCreated(message) => self.route_message(message).await,
            FramePayload::ReadStateChanged(read_state) => {
                if self.detail.open_id() == Some(read_state.conversation_id) {
                    self.detail
                        .apply_read_state(read_state.user_id, read_state.last_read_message_id);
                }
                self.events.dispatch(MessagingEvent::ReadStateChanged {
                    conversation_id: read_state.conversation_id,
                    user_id: read_state.user_id,
                    last_read_message_id: read_state.last_read_message_id,
                });
            }
            FramePayload::Error { message } => {
                self.events.dispatch(MessagingEvent::Error { message });
            }
            // Client-originated frames are never pushed; ignore defensively
            FramePayload::Auth(_) | FramePayload::JoinRoom { .. } | FramePayload::LeaveRoom { .. } => {}
        }
    }

    async fn route_message(&mut self, message: Message) {
        let open = self.detail.open_id();
        let is_open = open == Some(message.conversation_id);
        let appended = is_open && self.detail.append(&message);

        self.list
            .apply_incoming(&message, self.credentials.user_id, open);

        let from_self = message.is_from(self.credentials.user_id);
        if appended && !from_self {
            // Reading along: keep the server-side watermark current
            self.acknowledge(message.conversation_id, Some(message.id))
                .await;
        }

        if from_self {
            self.events.dispatch(MessagingEvent::ConversationUpdated {
                conversation_id: message.conversation_id,
            });
        } else {
            self.events.dispatch(MessagingEvent::MessageReceived {
                conversation_id: message.conversation_id,
                message_id: message.id,
            });
        }
    }

    /// Fire-and-forget acknowledgment: failures are logged and surfaced as
    /// error events, they never fail the triggering operation.
    async fn acknowledge(&mut self, conversation_id: ConversationId, message_id: Option<MessageId>) {
        if let Err(e) = self.mark_read(conversation_id, message_id).await {
            log::warn!(
                "read acknowledgment failed for conversation {}: {}",
                conversation_id,
                e
            );
            self.events.dispatch(MessagingEvent::Error {
                message: e.to_string(),
            });
        }
    }

    fn sync_connection_state(&mut self) {
        let state = self.session.connection_state();
        if state != self.last_connection_state {
            self.last_connection_state = state.clone();
            self.events
                .dispatch(MessagingEvent::ConnectionStateChanged { state });
        }
    }

    // === Test access ===

    /// The shared session manager.
    pub fn session(&self) -> &SessionManager<T> {
        &self.session
    }

    /// Mutable access to the shared session manager, e.g. for additional
    /// consumers or test transports.
    pub fn session_mut(&mut self) -> &mut SessionManager<T> {
        &mut self.session
    }

    /// The REST client.
    pub fn api(&self) -> &A {
        &self.api
    }
}
