// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! API Configuration
//!
//! Configuration types for the messaging facade.

use crate::chat::types::UserId;
use crate::chat::LayoutMode;
use crate::network::TransportConfig;

/// Who the messaging core acts as.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// The authenticated user; used to attribute sends and derive "seen".
    pub user_id: UserId,
    /// Bearer token for REST calls and the realtime auth frame.
    pub token: String,
}

impl Credentials {
    /// Creates credentials for a user/token pair.
    pub fn new(user_id: UserId, token: impl Into<String>) -> Self {
        Credentials {
            user_id,
            token: token.into(),
        }
    }
}

/// Configuration for a [`Messenger`](super::messenger::Messenger) instance.
#[derive(Debug, Clone)]
pub struct MessagingConfig {
    /// REST base URL.
    pub base_url: String,

    /// Realtime channel configuration.
    pub realtime: TransportConfig,

    /// Page size for conversation list fetches.
    pub page_size: u32,

    /// Page size for message history fetches.
    pub history_page_size: u32,

    /// Selection fallback behavior for the list view.
    pub layout: LayoutMode,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        MessagingConfig {
            base_url: String::new(),
            realtime: TransportConfig::default(),
            page_size: 20,
            history_page_size: 50,
            layout: LayoutMode::Wide,
        }
    }
}

impl MessagingConfig {
    /// Creates a config for the given REST and realtime endpoints.
    pub fn new(base_url: impl Into<String>, realtime_url: impl Into<String>) -> Self {
        MessagingConfig {
            base_url: base_url.into(),
            realtime: TransportConfig::with_server_url(realtime_url),
            ..Default::default()
        }
    }

    /// Sets the list page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the history page size.
    pub fn with_history_page_size(mut self, page_size: u32) -> Self {
        self.history_page_size = page_size;
        self
    }

    /// Uses narrow-layout selection fallback.
    pub fn narrow_layout(mut self) -> Self {
        self.layout = LayoutMode::Narrow;
        self
    }
}
