// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared Session Manager
//!
//! One physical realtime connection shared by many logical consumers with
//! independent lifecycles. Consumers acquire and release the session; the
//! connection outlives component remounts and is torn down only after the
//! last release plus a short grace window.

use std::time::{Duration, Instant};

use super::error::NetworkError;
use super::message::{AuthPayload, FramePayload};
use super::protocol::create_frame;
use super::transport::{ConnectionState, Transport, TransportConfig, TransportResult};

/// Token identifying the live connection.
///
/// Equal ids mean the same physical connection: a consumer that acquires
/// within the teardown grace window observes the id it had before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionHandle {
    id: u64,
}

impl SessionHandle {
    /// Opaque identity of the underlying connection.
    pub fn id(&self) -> u64 {
        self.id
    }
}

struct Session<T> {
    transport: T,
    handle: SessionHandle,
    consumers: usize,
    teardown_at: Option<Instant>,
}

/// Reference-counted owner of the shared realtime connection.
///
/// The manager is an explicit service object, constructed with a transport
/// factory and injected into whoever needs the connection; there is no
/// hidden global. All mutation of the shared connection goes through
/// `acquire`/`release`/`send`/`poll_event`.
///
/// Time is caller-driven: `release` only arms a teardown deadline, and
/// [`tick`](SessionManager::tick) enforces it. The event pump calls `tick`
/// on every pass, so an expired deadline closes the connection promptly
/// without background timers.
pub struct SessionManager<T: Transport> {
    factory: Box<dyn FnMut() -> T + Send>,
    config: TransportConfig,
    session: Option<Session<T>>,
    next_handle_id: u64,
}

impl<T: Transport> SessionManager<T> {
    /// Creates a manager that builds transports with the given factory.
    pub fn new<F>(factory: F, config: TransportConfig) -> Self
    where
        F: FnMut() -> T + Send + 'static,
    {
        SessionManager {
            factory: Box::new(factory),
            config,
            session: None,
            next_handle_id: 1,
        }
    }

    /// Acquires the shared session, connecting if necessary.
    ///
    /// The first consumer opens the connection and authenticates it with
    /// `credential`. Later consumers share the existing connection; their
    /// credential is ignored unless the session has meanwhile disconnected,
    /// in which case the session reconnects and re-authenticates with the
    /// new credential. Any pending teardown is cancelled.
    pub fn acquire(&mut self, credential: &str) -> TransportResult<SessionHandle> {
        if let Some(session) = self.session.as_mut() {
            session.teardown_at = None;

            if session.transport.state() != ConnectionState::Connected {
                log::debug!("shared session disconnected, reconnecting");
                session.transport.connect(&self.config)?;
                Self::authenticate(&mut session.transport, credential)?;
            }

            session.consumers += 1;
            return Ok(session.handle);
        }

        let mut transport = (self.factory)();
        transport.connect(&self.config)?;
        Self::authenticate(&mut transport, credential)?;

        let handle = SessionHandle {
            id: self.next_handle_id,
        };
        self.next_handle_id += 1;

        self.session = Some(Session {
            transport,
            handle,
            consumers: 1,
            teardown_at: None,
        });

        Ok(handle)
    }

    /// Releases one consumer.
    ///
    /// Floored at zero. When the count reaches zero the teardown deadline is
    /// armed; if no `acquire` happens before [`tick`](SessionManager::tick)
    /// observes the deadline, the connection closes. Rapid release/acquire
    /// cycles (component remounts) therefore reuse the connection.
    pub fn release(&mut self) {
        let grace = Duration::from_millis(self.config.teardown_grace_ms);
        if let Some(session) = self.session.as_mut() {
            session.consumers = session.consumers.saturating_sub(1);
            if session.consumers == 0 && session.teardown_at.is_none() {
                session.teardown_at = Some(Instant::now() + grace);
            }
        }
    }

    /// Enforces an expired teardown deadline.
    ///
    /// Returns true if the connection was closed by this call.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> bool {
        let expired = self
            .session
            .as_ref()
            .and_then(|s| s.teardown_at)
            .is_some_and(|deadline| now >= deadline);

        if expired {
            if let Some(mut session) = self.session.take() {
                log::debug!("shared session idle past grace window, closing");
                let _ = session.transport.disconnect();
            }
        }

        expired
    }

    /// Returns the live handle without affecting the reference count.
    ///
    /// For consumers that attach listeners but do not own the lifecycle.
    pub fn current(&self) -> Option<SessionHandle> {
        self.session.as_ref().map(|s| s.handle)
    }

    /// Number of outstanding consumers.
    pub fn consumer_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.consumers)
    }

    /// Returns true if a session exists and its transport is connected.
    pub fn is_connected(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.transport.state() == ConnectionState::Connected)
    }

    /// Current connection state, `Disconnected` when no session exists.
    pub fn connection_state(&self) -> ConnectionState {
        self.session
            .as_ref()
            .map_or(ConnectionState::Disconnected, |s| s.transport.state())
    }

    /// Sends a frame through the live session.
    pub fn send(&mut self, payload: FramePayload) -> TransportResult<()> {
        let session = self.session.as_mut().ok_or(NetworkError::NotConnected)?;
        session.transport.send(&create_frame(payload))
    }

    /// Polls the live session for one pushed frame.
    ///
    /// Returns `Ok(None)` when nothing is pending, no session exists, or
    /// the session is disconnected (the state change is what callers
    /// observe then). Transport failures come back as values for the caller
    /// to surface as events rather than panics.
    pub fn poll_event(&mut self) -> TransportResult<Option<FramePayload>> {
        match self.session.as_mut() {
            Some(session) if session.transport.state() == ConnectionState::Connected => {
                Ok(session.transport.receive()?.map(|frame| frame.payload))
            }
            _ => Ok(None),
        }
    }

    /// Borrows the live transport, e.g. to attach listeners in tests.
    pub fn transport(&self) -> Option<&T> {
        self.session.as_ref().map(|s| &s.transport)
    }

    /// Mutably borrows the live transport.
    pub fn transport_mut(&mut self) -> Option<&mut T> {
        self.session.as_mut().map(|s| &mut s.transport)
    }

    fn authenticate(transport: &mut T, credential: &str) -> TransportResult<()> {
        transport.send(&create_frame(FramePayload::Auth(AuthPayload {
            token: credential.to_string(),
        })))
    }
}

// INLINE_TEST_REQUIRED: Tests private teardown_at deadline handling without
// real sleeps via tick_at.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::mock::MockTransport;

    fn manager(grace_ms: u64) -> SessionManager<MockTransport> {
        let config = TransportConfig {
            server_url: "ws://localhost:9000".into(),
            teardown_grace_ms: grace_ms,
            ..Default::default()
        };
        SessionManager::new(MockTransport::new, config)
    }

    #[test]
    fn test_teardown_deadline_not_armed_while_consumers_remain() {
        let mut mgr = manager(150);
        mgr.acquire("token-a").unwrap();
        mgr.acquire("token-b").unwrap();
        mgr.release();

        assert!(mgr.session.as_ref().unwrap().teardown_at.is_none());
        assert_eq!(mgr.consumer_count(), 1);
    }

    #[test]
    fn test_tick_before_deadline_keeps_connection() {
        let mut mgr = manager(150);
        mgr.acquire("token").unwrap();
        mgr.release();

        let armed = mgr.session.as_ref().unwrap().teardown_at.unwrap();
        assert!(!mgr.tick_at(armed - Duration::from_millis(10)));
        assert!(mgr.is_connected());
    }

    #[test]
    fn test_tick_at_deadline_closes_connection() {
        let mut mgr = manager(150);
        mgr.acquire("token").unwrap();
        mgr.release();

        let armed = mgr.session.as_ref().unwrap().teardown_at.unwrap();
        assert!(mgr.tick_at(armed));
        assert!(mgr.session.is_none());
        assert!(!mgr.is_connected());
    }

    #[test]
    fn test_reacquire_cancels_armed_deadline() {
        let mut mgr = manager(150);
        let first = mgr.acquire("token").unwrap();
        mgr.release();
        let armed = mgr.session.as_ref().unwrap().teardown_at.unwrap();

        let second = mgr.acquire("token").unwrap();
        assert_eq!(first, second);
        assert!(mgr.session.as_ref().unwrap().teardown_at.is_none());

        // A tick past the old deadline must not close the reacquired session
        assert!(!mgr.tick_at(armed + Duration::from_millis(10)));
        assert!(mgr.is_connected());
    }
}
