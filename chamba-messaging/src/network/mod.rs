// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Realtime Transport Layer
//!
//! The push side of the messaging core: one shared WebSocket connection,
//! reference-counted across logical consumers, scoped to conversation rooms.
//!
//! # Architecture
//!
//! - **Transport trait**: platform-agnostic interface for the push channel
//! - **Frame types**: JSON wire protocol (auth, join/leave, pushed events)
//! - **Protocol layer**: frame construction and encoding
//! - **Session manager**: reference-counted shared connection with a
//!   teardown grace window
//! - **Room binder**: conversation-scoped push subscription
//!
//! # Example
//!
//! ```ignore
//! use chamba_messaging::network::{MockTransport, SessionManager, TransportConfig};
//!
//! let config = TransportConfig::with_server_url("wss://rt.chamba.work");
//! let mut session = SessionManager::new(MockTransport::new, config);
//!
//! let handle = session.acquire("bearer-token")?;
//! // ... consumers come and go; the connection survives remounts ...
//! session.release();
//! ```

#[cfg(feature = "testing")]
pub mod error;
#[cfg(not(feature = "testing"))]
mod error;

#[cfg(feature = "testing")]
pub mod message;
#[cfg(not(feature = "testing"))]
mod message;

#[cfg(feature = "testing")]
pub mod mock;
#[cfg(not(feature = "testing"))]
mod mock;

#[cfg(feature = "testing")]
pub mod protocol;
#[cfg(not(feature = "testing"))]
mod protocol;

#[cfg(feature = "testing")]
pub mod rooms;
#[cfg(not(feature = "testing"))]
mod rooms;

#[cfg(feature = "testing")]
pub mod session;
#[cfg(not(feature = "testing"))]
mod session;

#[cfg(feature = "testing")]
pub mod transport;
#[cfg(not(feature = "testing"))]
mod transport;

#[cfg(any(feature = "realtime-native-tls", feature = "realtime-rustls"))]
mod websocket;

// Error types
pub use error::NetworkError;

// Frame types
pub use message::{AuthPayload, Frame, FramePayload, ReadStatePayload, PROTOCOL_VERSION};

// Protocol utilities
pub use protocol::{create_frame, decode_frame, encode_frame, MAX_FRAME_SIZE};

// Transport abstraction
pub use transport::{ConnectionState, Transport, TransportConfig, TransportResult};

// Mock transport for testing
pub use mock::MockTransport;

// WebSocket transport for production
#[cfg(any(feature = "realtime-native-tls", feature = "realtime-rustls"))]
pub use websocket::WebSocketTransport;

// Shared session
pub use session::{SessionHandle, SessionManager};

// Room scoping
pub use rooms::RoomBinder;
