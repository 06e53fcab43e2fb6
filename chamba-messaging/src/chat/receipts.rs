// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-Receipt Reconciliation
//!
//! Derives "seen" indicators for self-authored messages from participant
//! watermarks, and tracks acknowledgment supersession so a slow mark-read
//! response never commits side effects for a conversation the user already
//! navigated away from.

use std::collections::HashMap;

use super::types::{ConversationId, Message, MessageId, Participant, UserId};

/// Highest message id acknowledged by any participant other than self.
///
/// Returns 0 when no counterpart has acknowledged anything. Collapsing all
/// counterparts into one watermark assumes effectively two-party
/// conversations, which is all this client ever creates.
pub fn counterpart_watermark(participants: &[Participant], self_user: UserId) -> MessageId {
    participants
        .iter()
        .filter(|p| p.user_id != self_user)
        .filter_map(|p| p.last_read_message_id)
        .max()
        .unwrap_or(0)
}

/// True iff the message is self-authored and the counterpart has
/// acknowledged at least its id.
///
/// Messages authored by others are never marked seen from this client's
/// perspective; that status belongs to the other party's client.
pub fn is_seen(message: &Message, watermark: MessageId, self_user: UserId) -> bool {
    message.is_from(self_user) && message.id <= watermark
}

/// Ticket tying one mark-read round-trip to its issue point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckTicket {
    conversation_id: ConversationId,
    seq: u64,
}

impl AckTicket {
    /// The conversation this acknowledgment targets.
    pub fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }
}

/// Per-conversation acknowledgment sequencing.
///
/// Under fast navigation several mark-read calls can be in flight; only the
/// latest per conversation may commit local side effects (clearing unread,
/// raising the self watermark).
#[derive(Debug, Default)]
pub struct AckTracker {
    sequences: HashMap<ConversationId, u64>,
}

impl AckTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        AckTracker::default()
    }

    /// Registers a new acknowledgment attempt, superseding earlier ones for
    /// the same conversation.
    pub fn begin(&mut self, conversation_id: ConversationId) -> AckTicket {
        let seq = self.sequences.entry(conversation_id).or_insert(0);
        *seq += 1;
        AckTicket {
            conversation_id,
            seq: *seq,
        }
    }

    /// True when no later attempt was issued for the ticket's conversation.
    pub fn is_current(&self, ticket: &AckTicket) -> bool {
        self.sequences
            .get(&ticket.conversation_id)
            .is_some_and(|seq| *seq == ticket.seq)
    }
}
