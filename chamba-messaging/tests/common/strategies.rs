// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proptest Strategies

use proptest::prelude::*;

use chamba_messaging::chat::Message;

use super::fixtures;

/// Messages for one conversation with distinct ids drawn from 1..=200.
pub fn distinct_messages(conversation_id: i64) -> impl Strategy<Value = Vec<Message>> {
    proptest::collection::hash_set(1i64..=200, 1..20).prop_map(move |ids| {
        ids.into_iter()
            .map(|id| {
                let sender = if id % 2 == 0 { 7 } else { 8 };
                fixtures::message(id, conversation_id, sender, "hola")
            })
            .collect()
    })
}

/// A sequence of (user, watermark) read acknowledgments.
pub fn read_acknowledgments() -> impl Strategy<Value = Vec<(i64, i64)>> {
    proptest::collection::vec((7i64..=9, 1i64..=200), 0..30)
}
