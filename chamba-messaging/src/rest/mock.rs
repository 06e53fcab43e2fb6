// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mock API
//!
//! In-memory backend fake for tests. Holds conversations, messages, and
//! participant watermarks; assigns monotonically increasing message ids;
//! creation is idempotent per creation key, matching the real backend.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::api::ConversationsApi;
use super::error::{ApiError, ApiResult};
use super::types::{
    ApplicantRef, ConversationDetail, CreateConversationRequest, CreationKey, ListQuery, Page,
    VacancyRef,
};
use crate::chat::types::{
    ConversationId, ConversationScope, ConversationSummary, Counterpart, Message, MessageId,
    Participant, ParticipantRole, UserId,
};

#[derive(Default)]
struct MockState {
    conversations: Vec<ConversationSummary>,
    participants: HashMap<ConversationId, Vec<Participant>>,
    messages: HashMap<ConversationId, Vec<Message>>,
    created: HashMap<CreationKey, ConversationId>,
    vacancies: Vec<VacancyRef>,
    applicants: HashMap<i64, Vec<ApplicantRef>>,
    read_calls: Vec<(ConversationId, Option<MessageId>)>,
    fail_next: Option<ApiError>,
    next_conversation_id: ConversationId,
    next_message_id: MessageId,
}

/// Mock REST backend for testing.
pub struct MockApi {
    /// The async trait takes `&self`; the lock only serializes test state.
    state: Mutex<MockState>,
    /// Sender attributed to messages persisted through `send_message`.
    self_user_id: UserId,
    self_user_name: String,
}

impl MockApi {
    /// Creates an empty mock backend; sends are attributed to `self_user`.
    pub fn new(self_user: UserId, self_user_name: impl Into<String>) -> Self {
        MockApi {
            state: Mutex::new(MockState {
                next_conversation_id: 1,
                next_message_id: 1,
                ..Default::default()
            }),
            self_user_id: self_user,
            self_user_name: self_user_name.into(),
        }
    }

    /// Seeds a conversation with its participant roster.
    pub fn seed_conversation(
        &self,
        summary: ConversationSummary,
        participants: Vec<Participant>,
    ) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.next_conversation_id = state.next_conversation_id.max(summary.id + 1);
        state.participants.insert(summary.id, participants);
        state.messages.entry(summary.id).or_default();
        state.conversations.push(summary);
    }

    /// Seeds history for a conversation, keeping ids monotonic.
    pub fn seed_messages(&self, conversation_id: ConversationId, messages: Vec<Message>) {
        let mut state = self.state.lock().expect("mock state poisoned");
        if let Some(max_id) = messages.iter().map(|m| m.id).max() {
            state.next_message_id = state.next_message_id.max(max_id + 1);
        }
        state
            .messages
            .entry(conversation_id)
            .or_default()
            .extend(messages);
    }

    /// Seeds the picker collaborators.
    pub fn seed_vacancies(&self, vacancies: Vec<VacancyRef>) {
        self.state.lock().expect("mock state poisoned").vacancies = vacancies;
    }

    /// Seeds applicants for one vacancy.
    pub fn seed_applicants(&self, vacancy_id: i64, applicants: Vec<ApplicantRef>) {
        self.state
            .lock()
            .expect("mock state poisoned")
            .applicants
            .insert(vacancy_id, applicants);
    }

    /// Makes the next API call fail with the given error.
    pub fn fail_next(&self, error: ApiError) {
        self.state.lock().expect("mock state poisoned").fail_next = Some(error);
    }

    /// Sets a participant's acknowledged watermark directly, as if their
    /// client had sent a read acknowledgment.
    pub fn set_participant_watermark(
        &self,
        conversation_id: ConversationId,
        user_id: UserId,
        message_id: MessageId,
    ) {
        let mut state = self.state.lock().expect("mock state poisoned");
        if let Some(roster) = state.participants.get_mut(&conversation_id) {
            if let Some(participant) = roster.iter_mut().find(|p| p.user_id == user_id) {
                participant.last_read_message_id = Some(message_id);
            }
        }
    }

    /// Every `mark_read` call received, in order.
    pub fn read_calls(&self) -> Vec<(ConversationId, Option<MessageId>)> {
        self.state
            .lock()
            .expect("mock state poisoned")
            .read_calls
            .clone()
    }

    fn take_failure(state: &mut MockState) -> ApiResult<()> {
        match state.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn summary_for_new(id: ConversationId, request: &CreateConversationRequest) -> ConversationSummary {
        let scope = match *request {
            CreateConversationRequest::Vacancy { vacancy_id, .. } => ConversationScope::Vacancy {
                vacancy_id,
                vacancy_title: format!("Vacante {}", vacancy_id),
            },
            CreateConversationRequest::Direct { .. } => ConversationScope::Direct,
        };
        ConversationSummary {
            id,
            scope,
            counterpart: Counterpart {
                name: "Contraparte".into(),
                avatar_url: None,
                role: ParticipantRole::Candidate,
            },
            preview: None,
            last_activity: None,
            unread_count: 0,
        }
    }
}

#[async_trait]
impl ConversationsApi for MockApi {
    async fn list_conversations(&self, query: &ListQuery) -> ApiResult<Page<ConversationSummary>> {
        let mut state = self.state.lock().expect("mock state poisoned");
        Self::take_failure(&mut state)?;

        let page = query.page.max(1);
        let start = ((page - 1) * query.page_size) as usize;
        let items: Vec<_> = state
            .conversations
            .iter()
            .skip(start)
            .take(query.page_size as usize)
            .cloned()
            .collect();

        Ok(Page {
            items,
            page,
            page_size: query.page_size,
            total: state.conversations.len() as u64,
        })
    }

    async fn conversation(&self, id: ConversationId) -> ApiResult<ConversationDetail> {
        let mut state = self.state.lock().expect("mock state poisoned");
        Self::take_failure(&mut state)?;

        let summary = state
            .conversations
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("conversation {}", id)))?;
        let participants = state.participants.get(&id).cloned().unwrap_or_default();

        Ok(ConversationDetail {
            summary,
            participants,
        })
    }

    async fn messages(
        &self,
        id: ConversationId,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Page<Message>> {
        let mut state = self.state.lock().expect("mock state poisoned");
        Self::take_failure(&mut state)?;

        let all = state
            .messages
            .get(&id)
            .ok_or_else(|| ApiError::NotFound(format!("conversation {}", id)))?;

        let page = page.max(1);
        let start = ((page - 1) * page_size) as usize;
        let items: Vec<_> = all.iter().skip(start).take(page_size as usize).cloned().collect();

        Ok(Page {
            items,
            page,
            page_size,
            total: all.len() as u64,
        })
    }

    async fn create_conversation(
        &self,
        request: &CreateConversationRequest,
    ) -> ApiResult<ConversationSummary> {
        let mut state = self.state.lock().expect("mock state poisoned");
        Self::take_failure(&mut state)?;

        let key = request.key();
        if let Some(existing) = state.created.get(&key) {
            let id = *existing;
            return state
                .conversations
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or_else(|| ApiError::NotFound(format!("conversation {}", id)));
        }

        let id = state.next_conversation_id;
        state.next_conversation_id += 1;
        let summary = Self::summary_for_new(id, request);

        state.created.insert(key, id);
        state.conversations.insert(0, summary.clone());
        state.messages.entry(id).or_default();
        state.participants.entry(id).or_default();

        Ok(summary)
    }

    async fn send_message(&self, id: ConversationId, body: &str) -> ApiResult<Message> {
        let mut state = self.state.lock().expect("mock state poisoned");
        Self::take_failure(&mut state)?;

        if !state.messages.contains_key(&id) {
            return Err(ApiError::NotFound(format!("conversation {}", id)));
        }

        let message = Message {
            id: state.next_message_id,
            conversation_id: id,
            sender_user_id: self.self_user_id,
            sender_name: self.self_user_name.clone(),
            body: body.to_string(),
            created_at: Utc::now(),
        };
        state.next_message_id += 1;

        state
            .messages
            .get_mut(&id)
            .expect("checked above")
            .push(message.clone());

        if let Some(summary) = state.conversations.iter_mut().find(|c| c.id == id) {
            summary.preview = Some(message.body.clone());
            summary.last_activity = Some(message.created_at);
        }

        Ok(message)
    }

    async fn mark_read(&self, id: ConversationId, message_id: Option<MessageId>) -> ApiResult<()> {
        let mut state = self.state.lock().expect("mock state poisoned");
        Self::take_failure(&mut state)?;

        if !state.messages.contains_key(&id) {
            return Err(ApiError::NotFound(format!("conversation {}", id)));
        }

        state.read_calls.push((id, message_id));

        // Resolve "up to latest" and raise the caller's watermark
        let resolved = message_id.or_else(|| {
            state
                .messages
                .get(&id)
                .and_then(|msgs| msgs.last().map(|m| m.id))
        });
        if let Some(resolved) = resolved {
            if let Some(roster) = state.participants.get_mut(&id) {
                if let Some(me) = roster.iter_mut().find(|p| p.user_id == self.self_user_id) {
                    let current = me.last_read_message_id.unwrap_or(0);
                    me.last_read_message_id = Some(current.max(resolved));
                }
            }
        }

        Ok(())
    }

    async fn active_vacancies(&self) -> ApiResult<Vec<VacancyRef>> {
        let mut state = self.state.lock().expect("mock state poisoned");
        Self::take_failure(&mut state)?;
        Ok(state.vacancies.clone())
    }

    async fn vacancy_applicants(&self, vacancy_id: i64) -> ApiResult<Vec<ApplicantRef>> {
        let mut state = self.state.lock().expect("mock state poisoned");
        Self::take_failure(&mut state)?;
        Ok(state.applicants.get(&vacancy_id).cloned().unwrap_or_default())
    }
}
