// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Test Fixtures
//!
//! Builders for the data model, with fixed timestamps so assertions stay
//! deterministic.

use chrono::{DateTime, Utc};

use chamba_messaging::chat::{
    ConversationScope, ConversationSummary, Counterpart, Message, MessageId, Participant,
    ParticipantRole, UserId,
};

/// Deterministic timestamp, seconds since the epoch.
pub fn ts(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).expect("valid timestamp")
}

/// A message in a conversation, timestamped by its id for readability.
pub fn message(id: MessageId, conversation_id: i64, sender: UserId, body: &str) -> Message {
    Message {
        id,
        conversation_id,
        sender_user_id: sender,
        sender_name: format!("Usuario {}", sender),
        body: body.to_string(),
        created_at: ts(1_700_000_000 + id),
    }
}

/// A participant with an optional acknowledged watermark.
pub fn participant(user_id: UserId, last_read: Option<MessageId>) -> Participant {
    Participant {
        user_id,
        role: ParticipantRole::Candidate,
        display_name: format!("Usuario {}", user_id),
        avatar_url: None,
        last_read_message_id: last_read,
    }
}

/// A direct conversation row.
pub fn direct_summary(id: i64, counterpart_name: &str) -> ConversationSummary {
    ConversationSummary {
        id,
        scope: ConversationScope::Direct,
        counterpart: Counterpart {
            name: counterpart_name.to_string(),
            avatar_url: None,
            role: ParticipantRole::Candidate,
        },
        preview: None,
        last_activity: None,
        unread_count: 0,
    }
}

/// A vacancy-scoped conversation row.
pub fn vacancy_summary(id: i64, vacancy_id: i64, title: &str) -> ConversationSummary {
    ConversationSummary {
        id,
        scope: ConversationScope::Vacancy {
            vacancy_id,
            vacancy_title: title.to_string(),
        },
        counterpart: Counterpart {
            name: "Empresa Demo".to_string(),
            avatar_url: None,
            role: ParticipantRole::Company,
        },
        preview: None,
        last_activity: None,
        unread_count: 0,
    }
}
