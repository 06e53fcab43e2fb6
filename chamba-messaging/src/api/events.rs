// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Event System
//!
//! Callbacks for messaging events. The view layer registers handlers and
//! re-renders from store state when they fire.

use std::sync::Arc;

use crate::chat::types::{ConversationId, MessageId, UserId};
use crate::network::ConnectionState;

/// Events emitted by the messaging core.
#[derive(Debug, Clone)]
pub enum MessagingEvent {
    /// A message from another user arrived by push.
    MessageReceived {
        conversation_id: ConversationId,
        message_id: MessageId,
    },

    /// A message sent from here was confirmed by the server.
    MessageSent {
        conversation_id: ConversationId,
        message_id: MessageId,
    },

    /// A conversation's list row changed (preview, order, unread count).
    ConversationUpdated {
        conversation_id: ConversationId,
    },

    /// A participant acknowledged reading up to a message.
    ReadStateChanged {
        conversation_id: ConversationId,
        user_id: UserId,
        last_read_message_id: MessageId,
    },

    /// Realtime connection state changed.
    ConnectionStateChanged {
        state: ConnectionState,
    },

    /// Error surfaced from an async operation (push pump, background ack).
    Error {
        message: String,
    },
}

/// Event handler trait.
///
/// Implement this trait to receive messaging events.
pub trait EventHandler: Send + Sync {
    /// Called when an event occurs.
    fn on_event(&self, event: MessagingEvent);
}

/// Simple callback-based event handler.
///
/// Wraps a closure for easy event handling.
pub struct CallbackHandler<F>
where
    F: Fn(MessagingEvent) + Send + Sync,
{
    callback: F,
}

impl<F> CallbackHandler<F>
where
    F: Fn(MessagingEvent) + Send + Sync,
{
    /// Creates a new callback handler.
    pub fn new(callback: F) -> Self {
        CallbackHandler { callback }
    }
}

impl<F> EventHandler for CallbackHandler<F>
where
    F: Fn(MessagingEvent) + Send + Sync,
{
    fn on_event(&self, event: MessagingEvent) {
        (self.callback)(event);
    }
}

/// Event dispatcher for managing multiple handlers.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    /// Creates a new event dispatcher.
    pub fn new() -> Self {
        EventDispatcher {
            handlers: Vec::new(),
        }
    }

    /// Adds an event handler.
    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Removes all handlers.
    pub fn clear_handlers(&mut self) {
        self.handlers.clear();
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatches an event to all handlers.
    pub fn dispatch(&self, event: MessagingEvent) {
        for handler in &self.handlers {
            handler.on_event(event.clone());
        }
    }
}
