// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wire Frame Types
//!
//! JSON frames exchanged on the realtime channel. Client-originated frames
//! scope the session (auth, room join/leave); server-originated frames push
//! conversation events into joined rooms.

use serde::{Deserialize, Serialize};

use crate::chat::types::{ConversationId, Message, MessageId, UserId};

/// Wire protocol version.
pub const PROTOCOL_VERSION: u8 = 1;

/// Envelope wrapping every frame on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Protocol version for compatibility checking.
    pub version: u8,
    /// The actual frame content.
    #[serde(flatten)]
    pub payload: FramePayload,
}

/// Frame payloads, both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "evento", content = "datos")]
pub enum FramePayload {
    /// Client -> server: authenticate the connection. Sent once, immediately
    /// after the socket opens, with whatever credential was current then.
    #[serde(rename = "auth")]
    Auth(AuthPayload),

    /// Client -> server: start receiving pushes for a conversation.
    #[serde(rename = "unirse")]
    JoinRoom {
        #[serde(rename = "conversacion_id")]
        conversation_id: ConversationId,
    },

    /// Client -> server: stop receiving pushes for a conversation.
    #[serde(rename = "salir")]
    LeaveRoom {
        #[serde(rename = "conversacion_id")]
        conversation_id: ConversationId,
    },

    /// Server -> client: a message was persisted in a joined room.
    #[serde(rename = "mensaje_creado")]
    MessageCreated(Message),

    /// Server -> client: a participant acknowledged reading up to a message.
    #[serde(rename = "leido")]
    ReadStateChanged(ReadStatePayload),

    /// Server -> client: a scoped error (bad credential, unknown room).
    #[serde(rename = "error")]
    Error {
        #[serde(rename = "mensaje")]
        message: String,
    },
}

/// Bearer credential for connection authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
}

/// Read acknowledgment pushed to every member of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadStatePayload {
    #[serde(rename = "conversacion_id")]
    pub conversation_id: ConversationId,
    #[serde(rename = "usuario_id")]
    pub user_id: UserId,
    #[serde(rename = "ultimo_leido_mensaje_id")]
    pub last_read_message_id: MessageId,
}
