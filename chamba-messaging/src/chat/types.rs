// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Messaging Data Model
//!
//! Conversations, messages, and participants as the backend serves them.
//! Field renames follow the backend wire names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Conversation identifier assigned by the backend.
pub type ConversationId = i64;

/// Message identifier, monotonically increasing within a conversation.
///
/// Message ids are the authoritative total order; the client never reorders
/// messages by timestamp or arrival order.
pub type MessageId = i64;

/// User identifier shared with the rest of the marketplace.
pub type UserId = i64;

/// What a conversation is scoped to.
///
/// Vacancy-scoped conversations exist at most once per (vacancy, candidate)
/// pair; direct conversations are plain user-to-user threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tipo")]
pub enum ConversationScope {
    /// Direct user-to-user conversation.
    #[serde(rename = "directa")]
    Direct,
    /// Conversation attached to a specific job vacancy.
    #[serde(rename = "vacante")]
    Vacancy {
        /// The vacancy this conversation is scoped to.
        #[serde(rename = "vacante_id")]
        vacancy_id: i64,
        /// Vacancy title, shown in the conversation header.
        #[serde(rename = "vacante_titulo")]
        vacancy_title: String,
    },
}

impl ConversationScope {
    /// Returns the vacancy id for vacancy-scoped conversations.
    pub fn vacancy_id(&self) -> Option<i64> {
        match self {
            ConversationScope::Direct => None,
            ConversationScope::Vacancy { vacancy_id, .. } => Some(*vacancy_id),
        }
    }
}

/// Role a user plays inside a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipantRole {
    #[serde(rename = "empresa")]
    Company,
    #[serde(rename = "candidato")]
    Candidate,
    #[serde(rename = "admin")]
    Admin,
}

/// Display block for the other party, resolved server-side for the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterpart {
    /// Display name (company name or candidate full name, role-dependent).
    #[serde(rename = "nombre")]
    pub name: String,
    /// Avatar URL, if the counterpart has one.
    #[serde(rename = "avatar_url")]
    pub avatar_url: Option<String>,
    /// Role the counterpart plays in this conversation.
    #[serde(rename = "rol")]
    pub role: ParticipantRole,
}

/// One row of the conversation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    #[serde(flatten)]
    pub scope: ConversationScope,
    /// The other party, as the backend resolved it for the viewing user.
    #[serde(rename = "contraparte")]
    pub counterpart: Counterpart,
    /// Body text of the most recent message, if any.
    #[serde(rename = "ultimo_mensaje")]
    pub preview: Option<String>,
    /// Timestamp of the most recent message.
    #[serde(rename = "ultimo_mensaje_fecha")]
    pub last_activity: Option<DateTime<Utc>>,
    /// Messages received since the viewer's last acknowledgment.
    #[serde(rename = "no_leidos")]
    pub unread_count: u32,
}

impl ConversationSummary {
    /// Title shown in list rows and the conversation header.
    ///
    /// Vacancy-scoped conversations show the vacancy title; direct
    /// conversations show the counterpart name.
    pub fn display_title(&self) -> &str {
        match &self.scope {
            ConversationScope::Vacancy { vacancy_title, .. } => vacancy_title,
            ConversationScope::Direct => &self.counterpart.name,
        }
    }
}

/// A persisted message.
///
/// Immutable once the backend has assigned an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    #[serde(rename = "conversacion_id")]
    pub conversation_id: ConversationId,
    #[serde(rename = "remitente_usuario_id")]
    pub sender_user_id: UserId,
    #[serde(rename = "remitente_nombre")]
    pub sender_name: String,
    #[serde(rename = "cuerpo")]
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Returns true if the message was authored by the given user.
    pub fn is_from(&self, user_id: UserId) -> bool {
        self.sender_user_id == user_id
    }
}

/// A conversation member with their read watermark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(rename = "usuario_id")]
    pub user_id: UserId,
    #[serde(rename = "rol")]
    pub role: ParticipantRole,
    #[serde(rename = "nombre")]
    pub display_name: String,
    #[serde(rename = "avatar_url")]
    pub avatar_url: Option<String>,
    /// Highest message id this participant has acknowledged reading.
    ///
    /// Non-decreasing over time; `None` means nothing acknowledged yet.
    #[serde(rename = "ultimo_leido_mensaje_id")]
    pub last_read_message_id: Option<MessageId>,
}
