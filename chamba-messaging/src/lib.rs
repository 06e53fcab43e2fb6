// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chamba Messaging Core
//!
//! Framework-agnostic real-time messaging library for the Chamba
//! recruitment-marketplace client. One shared realtime connection,
//! conversation list/detail stores reconciled from REST and push, read
//! receipts, and a strict no-duplicate send pipeline. View bindings
//! subscribe to store state and events; all I/O goes through here.

pub mod api;
pub mod chat;
pub mod network;
pub mod rest;

pub use api::{
    Credentials, EventHandler, Messenger, MessagingConfig, MessagingError, MessagingEvent,
    MessagingResult,
};
pub use chat::{
    ComposeError, Composer, ComposerState, ConversationDetailStore, ConversationId,
    ConversationListStore, ConversationScope, ConversationSummary, Counterpart, LayoutMode,
    Message, MessageId, Participant, ParticipantRole, UserId,
};
pub use network::{
    ConnectionState, Frame, FramePayload, MockTransport, NetworkError, RoomBinder, SessionHandle,
    SessionManager, Transport, TransportConfig,
};
#[cfg(any(feature = "realtime-native-tls", feature = "realtime-rustls"))]
pub use network::WebSocketTransport;
pub use rest::{
    ApiError, ApiResult, ConversationsApi, CreateConversationRequest, HttpApi, ListQuery, MockApi,
    Page,
};
