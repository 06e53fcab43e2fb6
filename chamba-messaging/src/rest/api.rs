// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Conversations API Trait
//!
//! Async abstraction over the REST backend so bindings inject the real HTTP
//! client and tests inject [`MockApi`](super::mock::MockApi).

use async_trait::async_trait;

use super::error::ApiResult;
use super::types::{
    ApplicantRef, ConversationDetail, CreateConversationRequest, ListQuery, Page, VacancyRef,
};
use crate::chat::types::{ConversationId, ConversationSummary, Message, MessageId};

/// REST surface consumed by the messaging core.
#[async_trait]
pub trait ConversationsApi: Send + Sync {
    /// `GET /conversaciones` — paginated list for the current user, most
    /// recently active first.
    async fn list_conversations(&self, query: &ListQuery) -> ApiResult<Page<ConversationSummary>>;

    /// `GET /conversaciones/{id}` — summary plus participant roster.
    async fn conversation(&self, id: ConversationId) -> ApiResult<ConversationDetail>;

    /// `GET /conversaciones/{id}/mensajes` — message history, oldest-first
    /// within the page.
    async fn messages(
        &self,
        id: ConversationId,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Page<Message>>;

    /// `POST /conversaciones` — create or return the existing conversation.
    /// Idempotent per creation key.
    async fn create_conversation(
        &self,
        request: &CreateConversationRequest,
    ) -> ApiResult<ConversationSummary>;

    /// `POST /conversaciones/{id}/mensajes` — persist a message; the
    /// response carries the server-assigned id and timestamp.
    async fn send_message(&self, id: ConversationId, body: &str) -> ApiResult<Message>;

    /// `POST /conversaciones/{id}/leer` — acknowledge reading up to
    /// `message_id`, or up to the latest when `None`.
    async fn mark_read(&self, id: ConversationId, message_id: Option<MessageId>) -> ApiResult<()>;

    /// `GET /vacantes/activas` — the caller's active vacancies, for the
    /// new-conversation picker.
    async fn active_vacancies(&self) -> ApiResult<Vec<VacancyRef>>;

    /// `GET /vacantes/{id}/postulaciones` — applicants on a vacancy, for
    /// the new-conversation picker.
    async fn vacancy_applicants(&self, vacancy_id: i64) -> ApiResult<Vec<ApplicantRef>>;
}
