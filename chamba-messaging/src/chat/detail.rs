// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Conversation Detail Store
//!
//! Message history and participant roster for the one open conversation.
//! Messages are kept ascending by id; id order is authoritative and never
//! re-derived from timestamps or arrival order.

use super::types::{ConversationId, Message, MessageId, Participant, UserId};

#[derive(Debug)]
struct OpenConversation {
    id: ConversationId,
    messages: Vec<Message>,
    participants: Vec<Participant>,
}

/// Store backing the open-conversation view.
#[derive(Debug, Default)]
pub struct ConversationDetailStore {
    open: Option<OpenConversation>,
    generation: u64,
}

impl ConversationDetailStore {
    /// Creates a store with nothing open.
    pub fn new() -> Self {
        ConversationDetailStore::default()
    }

    /// The open conversation id, if any.
    pub fn open_id(&self) -> Option<ConversationId> {
        self.open.as_ref().map(|o| o.id)
    }

    /// Messages of the open conversation, ascending by id.
    pub fn messages(&self) -> &[Message] {
        self.open.as_ref().map_or(&[], |o| o.messages.as_slice())
    }

    /// Participant roster of the open conversation.
    pub fn participants(&self) -> &[Participant] {
        self.open
            .as_ref()
            .map_or(&[], |o| o.participants.as_slice())
    }

    /// Highest message id currently held, if any.
    pub fn latest_message_id(&self) -> Option<MessageId> {
        self.open
            .as_ref()
            .and_then(|o| o.messages.last().map(|m| m.id))
    }

    /// Starts opening a conversation, returning the generation tag.
    ///
    /// The previously open state stays visible until the fetch commits, so
    /// a failed open preserves what the user was looking at.
    pub fn begin_open(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Commits a fetched detail state.
    ///
    /// Returns false (and changes nothing) when `generation` was superseded
    /// by a later `begin_open` — the stale response is discarded silently.
    /// Messages are sorted ascending by id and deduplicated on commit; the
    /// server sends them oldest-first already, so this is a no-op in the
    /// common case.
    pub fn commit_open(
        &mut self,
        generation: u64,
        id: ConversationId,
        mut messages: Vec<Message>,
        participants: Vec<Participant>,
    ) -> bool {
        if generation != self.generation {
            log::debug!("discarding stale detail fetch for conversation {}", id);
            return false;
        }

        messages.sort_by_key(|m| m.id);
        messages.dedup_by_key(|m| m.id);

        self.open = Some(OpenConversation {
            id,
            messages,
            participants,
        });
        true
    }

    /// Closes the open conversation.
    pub fn close(&mut self) {
        self.open = None;
    }

    /// Appends a message that arrived by push or send confirmation.
    ///
    /// Inserted at its id position. Returns false when the message belongs
    /// to another conversation, nothing is open, or the id is already
    /// present — the push/confirmation race delivers the same id twice and
    /// the first arrival wins.
    pub fn append(&mut self, message: &Message) -> bool {
        let Some(open) = self.open.as_mut() else {
            return false;
        };
        if open.id != message.conversation_id {
            return false;
        }

        match open.messages.binary_search_by_key(&message.id, |m| m.id) {
            Ok(_) => false,
            Err(position) => {
                open.messages.insert(position, message.clone());
                true
            }
        }
    }

    /// Raises a participant's acknowledged watermark.
    ///
    /// Watermarks are non-decreasing; a regression is ignored. Returns true
    /// when the watermark actually moved.
    pub fn apply_read_state(&mut self, user_id: UserId, last_read: MessageId) -> bool {
        let Some(open) = self.open.as_mut() else {
            return false;
        };
        let Some(participant) = open.participants.iter_mut().find(|p| p.user_id == user_id)
        else {
            return false;
        };

        if participant.last_read_message_id.unwrap_or(0) >= last_read {
            return false;
        }
        participant.last_read_message_id = Some(last_read);
        true
    }
}
