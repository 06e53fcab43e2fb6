// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP Client
//!
//! reqwest-backed implementation of [`ConversationsApi`] with bearer-token
//! authentication and status-code mapping into the error taxonomy.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::api::ConversationsApi;
use super::error::{ApiError, ApiResult};
use super::types::{
    ApplicantRef, ConversationDetail, CreateConversationRequest, ListQuery, MarkReadRequest, Page,
    SendMessageRequest, VacancyRef,
};
use crate::chat::types::{ConversationId, ConversationSummary, Message, MessageId};

/// REST client for the Chamba backend.
pub struct HttpApi {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpApi {
    /// Creates a client against `base_url` authenticated with `token`.
    ///
    /// The base URL is used as-is; a trailing slash is stripped so joined
    /// paths stay canonical.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("chamba-messaging/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(HttpApi {
            client,
            base_url,
            token: token.into(),
        })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.token)
    }

    async fn decode<T: DeserializeOwned>(response: Response, context: &str) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), context));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn expect_success(response: Response, context: &str) -> ApiResult<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::from_status(status.as_u16(), context))
        }
    }
}

#[async_trait]
impl ConversationsApi for HttpApi {
    async fn list_conversations(&self, query: &ListQuery) -> ApiResult<Page<ConversationSummary>> {
        let mut request = self
            .authorized(self.client.get(self.url("conversaciones")))
            .query(&[("page", query.page), ("page_size", query.page_size)]);
        if let Some(q) = &query.q {
            request = request.query(&[("q", q.as_str())]);
        }
        if let Some(kind) = query.kind {
            request = request.query(&[("tipo", kind.as_wire())]);
        }

        let response = request.send().await?;
        Self::decode(response, "conversation list").await
    }

    async fn conversation(&self, id: ConversationId) -> ApiResult<ConversationDetail> {
        let response = self
            .authorized(self.client.get(self.url(&format!("conversaciones/{}", id))))
            .send()
            .await?;
        Self::decode(response, "conversation detail").await
    }

    async fn messages(
        &self,
        id: ConversationId,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Page<Message>> {
        let response = self
            .authorized(
                self.client
                    .get(self.url(&format!("conversaciones/{}/mensajes", id))),
            )
            .query(&[("page", page), ("page_size", page_size)])
            .send()
            .await?;
        Self::decode(response, "message history").await
    }

    async fn create_conversation(
        &self,
        request: &CreateConversationRequest,
    ) -> ApiResult<ConversationSummary> {
        let response = self
            .authorized(self.client.post(self.url("conversaciones")))
            .json(request)
            .send()
            .await?;
        Self::decode(response, "conversation creation").await
    }

    async fn send_message(&self, id: ConversationId, body: &str) -> ApiResult<Message> {
        let response = self
            .authorized(
                self.client
                    .post(self.url(&format!("conversaciones/{}/mensajes", id))),
            )
            .json(&SendMessageRequest {
                body: body.to_string(),
            })
            .send()
            .await?;
        Self::decode(response, "message send").await
    }

    async fn mark_read(&self, id: ConversationId, message_id: Option<MessageId>) -> ApiResult<()> {
        let response = self
            .authorized(
                self.client
                    .post(self.url(&format!("conversaciones/{}/leer", id))),
            )
            .json(&MarkReadRequest { message_id })
            .send()
            .await?;
        Self::expect_success(response, "read acknowledgment").await
    }

    async fn active_vacancies(&self) -> ApiResult<Vec<VacancyRef>> {
        let response = self
            .authorized(self.client.get(self.url("vacantes/activas")))
            .send()
            .await?;
        Self::decode(response, "active vacancies").await
    }

    async fn vacancy_applicants(&self, vacancy_id: i64) -> ApiResult<Vec<ApplicantRef>> {
        let response = self
            .authorized(
                self.client
                    .get(self.url(&format!("vacantes/{}/postulaciones", vacancy_id))),
            )
            .send()
            .await?;
        Self::decode(response, "vacancy applicants").await
    }
}
