// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Transport Trait
//!
//! Platform-agnostic abstraction for the realtime push channel.

use super::error::NetworkError;
use super::message::Frame;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, NetworkError>;

/// Connection state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Not connected to any server.
    #[default]
    Disconnected,
    /// Connection in progress.
    Connecting,
    /// Connected and ready.
    Connected,
}

/// Configuration for transport connections.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Server URL/address (`ws://` or `wss://`).
    pub server_url: String,
    /// Connection timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Read/write timeout in milliseconds.
    pub io_timeout_ms: u64,
    /// Grace window after the last consumer releases the session before the
    /// connection is actually torn down (milliseconds).
    pub teardown_grace_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            server_url: String::new(),
            connect_timeout_ms: 10_000,
            io_timeout_ms: 30_000,
            teardown_grace_ms: 150,
        }
    }
}

impl TransportConfig {
    /// Creates a config for the given server URL.
    pub fn with_server_url(server_url: impl Into<String>) -> Self {
        TransportConfig {
            server_url: server_url.into(),
            ..Default::default()
        }
    }
}

/// Transport trait for the realtime channel.
///
/// Abstracts the underlying mechanism (WebSocket in production) so bindings
/// can supply platform-specific implementations and tests can use
/// [`MockTransport`](super::mock::MockTransport).
///
/// # Synchronous Interface
///
/// The trait uses synchronous, non-blocking-on-receive methods for simplicity
/// in the core library. Platform implementations may internally use async
/// runtimes but expose a polling interface here; the event pump drives it.
pub trait Transport: Send {
    /// Connects to the realtime server.
    fn connect(&mut self, config: &TransportConfig) -> TransportResult<()>;

    /// Disconnects from the server.
    ///
    /// Safe to call even if not connected.
    fn disconnect(&mut self) -> TransportResult<()>;

    /// Returns the current connection state.
    fn state(&self) -> ConnectionState;

    /// Sends a frame to the server.
    ///
    /// Returns an error if not connected.
    fn send(&mut self, frame: &Frame) -> TransportResult<()>;

    /// Receives the next pushed frame, if one is available.
    ///
    /// Returns `Ok(None)` when no frame is pending; never blocks the caller
    /// past the configured I/O timeout.
    fn receive(&mut self) -> TransportResult<Option<Frame>>;

    /// Checks if there are pending frames to receive (non-blocking).
    fn has_pending(&self) -> bool;
}
