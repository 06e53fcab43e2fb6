// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Composer
//!
//! State machine for the message input. There is no optimistic local echo:
//! the draft stays in the input until the server confirms the message, so a
//! failed send never loses text and a confirmed message is never
//! renumbered.

use thiserror::Error;

/// Validation errors raised before anything touches the network.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ComposeError {
    /// The draft is empty or whitespace-only.
    #[error("message body is empty")]
    EmptyBody,

    /// A send is already in flight; repeated submits are ignored.
    #[error("a send is already in progress")]
    SendInProgress,
}

/// Composer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposerState {
    #[default]
    Idle,
    Sending,
}

/// The message input and its send state.
#[derive(Debug, Default)]
pub struct Composer {
    draft: String,
    state: ComposerState,
}

impl Composer {
    /// Creates an idle composer with an empty draft.
    pub fn new() -> Self {
        Composer::default()
    }

    /// Current draft text.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replaces the draft. Ignored while a send is in flight, so the text
    /// being confirmed cannot change under the round-trip.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if self.state == ComposerState::Idle {
            self.draft = text.into();
        }
    }

    /// Current state.
    pub fn state(&self) -> ComposerState {
        self.state
    }

    /// True while a send round-trip is in flight.
    pub fn is_sending(&self) -> bool {
        self.state == ComposerState::Sending
    }

    /// Validates the draft and transitions to `Sending`.
    ///
    /// Returns the trimmed body to submit. The draft itself is retained
    /// until [`complete_success`](Composer::complete_success) so a failure
    /// leaves the input populated for retry.
    pub fn prepare(&mut self) -> Result<String, ComposeError> {
        if self.state == ComposerState::Sending {
            return Err(ComposeError::SendInProgress);
        }

        let body = self.draft.trim();
        if body.is_empty() {
            return Err(ComposeError::EmptyBody);
        }

        self.state = ComposerState::Sending;
        Ok(body.to_string())
    }

    /// The send round-trip confirmed the message: clear the input.
    pub fn complete_success(&mut self) {
        self.state = ComposerState::Idle;
        self.draft.clear();
    }

    /// The send round-trip failed: keep the input for retry.
    pub fn complete_failure(&mut self) {
        self.state = ComposerState::Idle;
    }
}
