// SPDX-FileCopyrightText: 2026 Chamba Contributors <dev@chamba.work>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! REST Backend Access
//!
//! The pull side of the messaging core: paginated conversation list, detail
//! and history fetches, message send, read acknowledgments, and the
//! read-only picker collaborators. Everything goes through the
//! [`ConversationsApi`] trait so tests run against [`MockApi`].

#[cfg(feature = "testing")]
pub mod api;
#[cfg(not(feature = "testing"))]
mod api;

#[cfg(feature = "testing")]
pub mod error;
#[cfg(not(feature = "testing"))]
mod error;

#[cfg(feature = "testing")]
pub mod http;
#[cfg(not(feature = "testing"))]
mod http;

#[cfg(feature = "testing")]
pub mod mock;
#[cfg(not(feature = "testing"))]
mod mock;

#[cfg(feature = "testing")]
pub mod types;
#[cfg(not(feature = "testing"))]
mod types;

pub use api::ConversationsApi;
pub use error::{ApiError, ApiResult};
pub use http::HttpApi;
pub use mock::MockApi;
pub use types::{
    ApplicantRef, ConversationDetail, ConversationKindFilter, CreateConversationRequest,
    CreationKey, ListQuery, MarkReadRequest, Page, SendMessageRequest, VacancyRef,
};
