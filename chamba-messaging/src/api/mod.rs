// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Messaging API Layer
//!
//! High-level API for the Chamba messaging core.
//!
//! # Overview
//!
//! The API layer provides the orchestrator the view bindings talk to:
//! - Shared session lifecycle (acquire/release with teardown grace)
//! - Conversation list and detail synchronization
//! - Read-receipt reconciliation
//! - Composer/send pipeline
//! - Event handling
//!
//! # Example
//!
//! ```ignore
//! use chamba_messaging::api::{Credentials, Messenger, MessagingConfig};
//! use chamba_messaging::network::WebSocketTransport;
//! use chamba_messaging::rest::HttpApi;
//!
//! let config = MessagingConfig::new("https://api.chamba.work", "wss://rt.chamba.work");
//! let api = HttpApi::new(&config.base_url, token.clone())?;
//! let mut messenger = Messenger::new(
//!     api,
//!     WebSocketTransport::new,
//!     config,
//!     Credentials::new(user_id, token),
//! );
//!
//! messenger.connect()?;
//! messenger.refresh_list(1).await?;
//! ```
//!
//! # Module Structure
//!
//! - [`error`] - Unified error type
//! - [`config`] - Configuration types
//! - [`events`] - Event system for callbacks
//! - [`messenger`] - Main orchestrator

#[cfg(feature = "testing")]
pub mod config;
#[cfg(not(feature = "testing"))]
mod config;

#[cfg(feature = "testing")]
pub mod error;
#[cfg(not(feature = "testing"))]
mod error;

#[cfg(feature = "testing")]
pub mod events;
#[cfg(not(feature = "testing"))]
mod events;

#[cfg(feature = "testing")]
pub mod messenger;
#[cfg(not(feature = "testing"))]
mod messenger;

pub use config::{Credentials, MessagingConfig};
pub use error::{MessagingError, MessagingResult};
pub use events::{CallbackHandler, EventDispatcher, EventHandler, MessagingEvent};
pub use messenger::Messenger;
