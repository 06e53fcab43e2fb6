// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Protocol Layer
//!
//! Frame construction and JSON text encoding for the realtime channel.

use super::error::NetworkError;
use super::message::{Frame, FramePayload, PROTOCOL_VERSION};

/// Maximum accepted frame size in bytes.
///
/// Message bodies are capped server-side well below this; anything larger is
/// a protocol violation.
pub const MAX_FRAME_SIZE: usize = 64 * 1024;

/// Wraps a payload in a versioned envelope.
pub fn create_frame(payload: FramePayload) -> Frame {
    Frame {
        version: PROTOCOL_VERSION,
        payload,
    }
}

/// Encodes a frame as a JSON text frame.
pub fn encode_frame(frame: &Frame) -> Result<String, NetworkError> {
    serde_json::to_string(frame).map_err(|e| NetworkError::InvalidFrame(e.to_string()))
}

/// Decodes a JSON text frame.
///
/// Frames with an unknown version are rejected rather than half-parsed.
pub fn decode_frame(text: &str) -> Result<Frame, NetworkError> {
    if text.len() > MAX_FRAME_SIZE {
        return Err(NetworkError::InvalidFrame(format!(
            "frame of {} bytes exceeds maximum {}",
            text.len(),
            MAX_FRAME_SIZE
        )));
    }

    let frame: Frame =
        serde_json::from_str(text).map_err(|e| NetworkError::InvalidFrame(e.to_string()))?;

    if frame.version != PROTOCOL_VERSION {
        return Err(NetworkError::InvalidFrame(format!(
            "unsupported protocol version {}",
            frame.version
        )));
    }

    Ok(frame)
}
