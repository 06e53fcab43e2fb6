// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! REST Payload Types
//!
//! Request/response shapes for the conversations endpoints and the read-only
//! picker collaborators.

use serde::{Deserialize, Serialize};

use crate::chat::types::{ConversationSummary, MessageId, Participant, UserId};

/// Pagination envelope shared by the list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

impl<T> Page<T> {
    /// True when a later page exists.
    pub fn has_more(&self) -> bool {
        let seen = u64::from(self.page) * u64::from(self.page_size);
        seen < self.total
    }
}

/// Query for the conversation list endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    /// Free-text filter over counterpart name and vacancy title.
    pub q: Option<String>,
    /// Restrict to one conversation kind (wire values `directa`/`vacante`).
    pub kind: Option<ConversationKindFilter>,
}

impl ListQuery {
    /// First page with the given size.
    pub fn first_page(page_size: u32) -> Self {
        ListQuery {
            page: 1,
            page_size,
            ..Default::default()
        }
    }
}

/// Conversation kind filter for the list endpoint's `tipo` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationKindFilter {
    Direct,
    Vacancy,
}

impl ConversationKindFilter {
    /// Wire value for the `tipo` query parameter.
    pub fn as_wire(&self) -> &'static str {
        match self {
            ConversationKindFilter::Direct => "directa",
            ConversationKindFilter::Vacancy => "vacante",
        }
    }
}

/// Detail response: the summary plus the participant roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationDetail {
    #[serde(flatten)]
    pub summary: ConversationSummary,
    #[serde(rename = "participantes")]
    pub participants: Vec<Participant>,
}

/// Body for `POST /conversaciones`.
///
/// The `tipo` tag selects the creation mode; eligibility (e.g. a candidate
/// must have an application on the vacancy) is enforced server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tipo")]
pub enum CreateConversationRequest {
    #[serde(rename = "vacante")]
    Vacancy {
        #[serde(rename = "vacante_id")]
        vacancy_id: i64,
        #[serde(rename = "candidato_id")]
        candidate_id: UserId,
    },
    #[serde(rename = "directa")]
    Direct {
        #[serde(rename = "usuario_objetivo_id")]
        target_user_id: UserId,
    },
}

/// Body for `POST /conversaciones/{id}/mensajes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    #[serde(rename = "cuerpo")]
    pub body: String,
}

/// Body for `POST /conversaciones/{id}/leer`.
///
/// A null `mensaje_id` acknowledges up to the latest message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkReadRequest {
    #[serde(rename = "mensaje_id")]
    pub message_id: Option<MessageId>,
}

/// One of the caller's active vacancies, for the new-conversation picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyRef {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
}

/// An applicant on a vacancy, for the new-conversation picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRef {
    #[serde(rename = "candidato_id")]
    pub candidate_id: UserId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "avatar_url")]
    pub avatar_url: Option<String>,
}

/// Identity a creation request is idempotent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreationKey {
    Vacancy { vacancy_id: i64, candidate_id: UserId },
    Direct { target_user_id: UserId },
}

impl CreateConversationRequest {
    /// Idempotence key: one conversation per (vacancy, candidate) pair, one
    /// per target user for direct conversations.
    pub fn key(&self) -> CreationKey {
        match *self {
            CreateConversationRequest::Vacancy {
                vacancy_id,
                candidate_id,
            } => CreationKey::Vacancy {
                vacancy_id,
                candidate_id,
            },
            CreateConversationRequest::Direct { target_user_id } => {
                CreationKey::Direct { target_user_id }
            }
        }
    }
}
