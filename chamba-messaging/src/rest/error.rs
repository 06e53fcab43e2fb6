// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! REST Error Types

use thiserror::Error;

/// Errors from the REST backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, TCP, TLS, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Credential missing, expired, or rejected. Implies the session is
    /// stale; the embedding application redirects to re-authentication.
    #[error("unauthorized")]
    Unauthorized,

    /// The resource does not exist or the caller has no access to it. The
    /// backend does not distinguish the two cases.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend rejected the request payload (empty body, ineligible
    /// conversation target, missing selection).
    #[error("validation error: {0}")]
    Validation(String),

    /// Any other non-success HTTP status.
    #[error("HTTP error: {0}")]
    Http(u16),

    /// The response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Maps a non-success status code to the error taxonomy.
    pub fn from_status(status: u16, context: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            403 | 404 => ApiError::NotFound(context.to_string()),
            400 | 422 => ApiError::Validation(context.to_string()),
            other => ApiError::Http(other),
        }
    }

    /// True for failures the UI recovers from in place (inline error state,
    /// retry affordance) as opposed to a stale session.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ApiError::Unauthorized)
    }
}

/// Result type for REST operations.
pub type ApiResult<T> = Result<T, ApiError>;
