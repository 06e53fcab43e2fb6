// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network Error Types

use thiserror::Error;

/// Errors from the realtime transport layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetworkError {
    /// Failed to establish a connection.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The connection was closed by the peer.
    #[error("Connection closed")]
    ConnectionClosed,

    /// An operation timed out.
    #[error("Connection timeout")]
    Timeout,

    /// An operation required a live connection and there was none.
    #[error("Transport not connected")]
    NotConnected,

    /// Reconnection attempts exhausted.
    #[error("Max retries exceeded")]
    MaxRetriesExceeded,

    /// The credential was rejected at connect time.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Sending a frame failed.
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// Receiving a frame failed.
    #[error("Receive failed: {0}")]
    ReceiveFailed(String),

    /// A frame could not be encoded or decoded.
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),
}
