// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Conversation List Store
//!
//! Ordered set of conversations visible to the current user, most recently
//! active first, with preview text and unread counters. Framework-agnostic:
//! plain data plus mutation methods; the view layer subscribes and
//! dispatches, I/O happens in the facade.

use super::types::{ConversationId, ConversationSummary, Message, UserId};

/// How selection falls back when the selected conversation disappears from
/// a refreshed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Side-by-side list and detail; selection falls back to the first row.
    #[default]
    Wide,
    /// Single-pane; selection falls back to none.
    Narrow,
}

/// Store backing the conversation list view.
#[derive(Debug, Default)]
pub struct ConversationListStore {
    items: Vec<ConversationSummary>,
    selected: Option<ConversationId>,
    layout: LayoutMode,
    generation: u64,
}

impl ConversationListStore {
    /// Creates an empty store for the given layout.
    pub fn new(layout: LayoutMode) -> Self {
        ConversationListStore {
            layout,
            ..Default::default()
        }
    }

    /// Rows in display order (last activity descending).
    pub fn items(&self) -> &[ConversationSummary] {
        &self.items
    }

    /// The selected conversation, if any.
    pub fn selected(&self) -> Option<ConversationId> {
        self.selected
    }

    /// Selects a conversation present in the list; clears selection for
    /// unknown ids.
    pub fn select(&mut self, id: ConversationId) {
        self.selected = self.items.iter().find(|c| c.id == id).map(|c| c.id);
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Sum of unread counters across all rows.
    pub fn total_unread(&self) -> u64 {
        self.items.iter().map(|c| u64::from(c.unread_count)).sum()
    }

    /// Starts a refresh, returning the generation tag to commit with.
    ///
    /// Each call supersedes earlier in-flight refreshes; their commits will
    /// be discarded.
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Replaces the store contents with a fetched page.
    ///
    /// Returns false (and changes nothing) when `generation` is stale. On
    /// success, a selection pointing at a conversation no longer present
    /// falls back per the layout mode.
    pub fn commit_refresh(&mut self, generation: u64, items: Vec<ConversationSummary>) -> bool {
        if generation != self.generation {
            log::debug!("discarding stale conversation list refresh");
            return false;
        }

        self.items = items;

        let still_present = self
            .selected
            .is_some_and(|id| self.items.iter().any(|c| c.id == id));
        if !still_present {
            self.selected = match self.layout {
                LayoutMode::Wide => self.items.first().map(|c| c.id),
                LayoutMode::Narrow => None,
            };
        }

        true
    }

    /// Applies a message that arrived by push or send confirmation.
    ///
    /// Updates the preview and last-activity of the owning conversation and
    /// moves it to the front; the relative order of every other row is
    /// preserved. The unread counter increments only for messages from
    /// other users on conversations that are not currently open. Messages
    /// for conversations absent from the list leave it untouched; a refresh
    /// introduces new rows.
    pub fn apply_incoming(
        &mut self,
        message: &Message,
        self_user: UserId,
        open_conversation: Option<ConversationId>,
    ) {
        let Some(position) = self
            .items
            .iter()
            .position(|c| c.id == message.conversation_id)
        else {
            return;
        };

        let mut row = self.items.remove(position);
        row.preview = Some(message.body.clone());
        row.last_activity = Some(message.created_at);

        let is_open = open_conversation == Some(message.conversation_id);
        if !message.is_from(self_user) && !is_open {
            row.unread_count += 1;
        }

        self.items.insert(0, row);
    }

    /// Zeroes the unread counter after the detail view confirmed the user
    /// read up to the latest message.
    pub fn clear_unread(&mut self, conversation_id: ConversationId) {
        if let Some(row) = self.items.iter_mut().find(|c| c.id == conversation_id) {
            row.unread_count = 0;
        }
    }

    /// Looks up one row.
    pub fn get(&self, conversation_id: ConversationId) -> Option<&ConversationSummary> {
        self.items.iter().find(|c| c.id == conversation_id)
    }

    /// Inserts a newly created conversation at the front, selecting it.
    ///
    /// Used after an explicit create call; idempotent when the conversation
    /// already has a row.
    pub fn insert_front(&mut self, summary: ConversationSummary) {
        if !self.items.iter().any(|c| c.id == summary.id) {
            self.items.insert(0, summary.clone());
        }
        self.selected = Some(summary.id);
    }
}
