// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! API Error Types
//!
//! Unified error type for the messaging facade.

use thiserror::Error;

use crate::chat::ComposeError;
use crate::network::NetworkError;
use crate::rest::ApiError;

/// Unified error type for messaging operations.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// REST backend failure.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Realtime transport failure.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// Composer validation failure.
    #[error("compose error: {0}")]
    Compose(#[from] ComposeError),

    /// Operation not valid in the current state.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl MessagingError {
    /// True when the credential is stale and the embedding application
    /// should redirect to re-authentication.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            MessagingError::Api(ApiError::Unauthorized)
                | MessagingError::Network(NetworkError::AuthenticationFailed(_))
        )
    }

    /// True for failures the view recovers from in place: inline error
    /// state for loads, retained draft for sends.
    pub fn is_recoverable(&self) -> bool {
        !self.is_auth_failure()
    }
}

/// Result type for messaging operations.
pub type MessagingResult<T> = Result<T, MessagingError>;
