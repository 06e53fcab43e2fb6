// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mock Transport
//!
//! In-memory transport for tests. Records sent frames, replays queued
//! incoming frames, and supports error injection.

use std::collections::VecDeque;

use super::error::NetworkError;
use super::message::Frame;
use super::transport::{ConnectionState, Transport, TransportConfig, TransportResult};

/// Mock transport for testing.
#[derive(Default)]
pub struct MockTransport {
    state: ConnectionState,
    sent: Vec<Frame>,
    incoming: VecDeque<Frame>,
    inject: Option<NetworkError>,
    connect_count: u32,
}

impl MockTransport {
    /// Creates a new disconnected mock transport.
    pub fn new() -> Self {
        MockTransport::default()
    }

    /// Queues a frame to be returned by the next `receive` calls.
    pub fn queue_receive(&mut self, frame: Frame) {
        self.incoming.push_back(frame);
    }

    /// Returns every frame sent through this transport, in order.
    pub fn sent_frames(&self) -> &[Frame] {
        &self.sent
    }

    /// Clears the sent-frame log.
    pub fn clear_sent(&mut self) {
        self.sent.clear();
    }

    /// Makes the next transport operation fail with the given error.
    pub fn inject_error(&mut self, error: NetworkError) {
        self.inject = Some(error);
    }

    /// Forces the connection state, e.g. to simulate a dropped connection.
    pub fn set_state(&mut self, state: ConnectionState) {
        self.state = state;
    }

    /// Number of successful `connect` calls over the transport's lifetime.
    pub fn connect_count(&self) -> u32 {
        self.connect_count
    }

    fn take_injected(&mut self) -> TransportResult<()> {
        match self.inject.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Transport for MockTransport {
    fn connect(&mut self, _config: &TransportConfig) -> TransportResult<()> {
        self.take_injected()?;
        self.state = ConnectionState::Connected;
        self.connect_count += 1;
        Ok(())
    }

    fn disconnect(&mut self) -> TransportResult<()> {
        self.state = ConnectionState::Disconnected;
        Ok(())
    }

    fn state(&self) -> ConnectionState {
        self.state.clone()
    }

    fn send(&mut self, frame: &Frame) -> TransportResult<()> {
        self.take_injected()?;
        if self.state != ConnectionState::Connected {
            return Err(NetworkError::NotConnected);
        }
        self.sent.push(frame.clone());
        Ok(())
    }

    fn receive(&mut self) -> TransportResult<Option<Frame>> {
        self.take_injected()?;
        if self.state != ConnectionState::Connected {
            return Err(NetworkError::NotConnected);
        }
        Ok(self.incoming.pop_front())
    }

    fn has_pending(&self) -> bool {
        !self.incoming.is_empty()
    }
}
