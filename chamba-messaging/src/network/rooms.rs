// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Room Binder
//!
//! Tells the server which conversation the active view is watching, so push
//! events are scoped and read-state updates can be targeted. Pure
//! passthrough to the shared session; the only state held is the active
//! room id, used to enforce leave-before-join ordering when switching.

use super::session::SessionManager;
use super::transport::Transport;
use crate::chat::types::ConversationId;
use crate::network::message::FramePayload;

/// Binds the active view to a conversation room.
#[derive(Debug, Default)]
pub struct RoomBinder {
    active: Option<ConversationId>,
}

impl RoomBinder {
    /// Creates a binder with no active room.
    pub fn new() -> Self {
        RoomBinder::default()
    }

    /// The currently joined room, if any.
    pub fn active(&self) -> Option<ConversationId> {
        self.active
    }

    /// Emits a join signal for the conversation.
    ///
    /// No-op when the id is not positive or no connection is live. Joining
    /// the already-active room is also a no-op; joining a different room
    /// leaves the previous one first.
    pub fn join<T: Transport>(
        &mut self,
        session: &mut SessionManager<T>,
        conversation_id: ConversationId,
    ) {
        if conversation_id <= 0 || !session.is_connected() {
            return;
        }
        if self.active == Some(conversation_id) {
            return;
        }
        if let Some(previous) = self.active {
            self.leave(session, previous);
        }

        if session
            .send(FramePayload::JoinRoom { conversation_id })
            .is_ok()
        {
            self.active = Some(conversation_id);
        } else {
            log::warn!("failed to join room {}", conversation_id);
        }
    }

    /// Emits a leave signal for the conversation.
    ///
    /// Must happen before joining the next room when the active view
    /// changes, so pushes for a conversation no longer displayed stop.
    pub fn leave<T: Transport>(
        &mut self,
        session: &mut SessionManager<T>,
        conversation_id: ConversationId,
    ) {
        if conversation_id <= 0 {
            return;
        }
        if self.active == Some(conversation_id) {
            self.active = None;
        }
        if !session.is_connected() {
            return;
        }
        if session
            .send(FramePayload::LeaveRoom { conversation_id })
            .is_err()
        {
            log::warn!("failed to leave room {}", conversation_id);
        }
    }

    /// Switches the active room, ordered leave-before-join.
    pub fn switch<T: Transport>(
        &mut self,
        session: &mut SessionManager<T>,
        next: Option<ConversationId>,
    ) {
        if self.active == next {
            return;
        }
        if let Some(previous) = self.active {
            self.leave(session, previous);
        }
        if let Some(id) = next {
            self.join(session, id);
        }
    }
}
