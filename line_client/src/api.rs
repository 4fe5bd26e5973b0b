//! The backend API seam.
//!
//! A [`MessageApi`] implementation talks to the server over whatever
//! transport the application uses; the engine only sees canonical records
//! coming back. Records returned from these calls always carry confirmed
//! ids.

use line_network::prelude::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error surfaced by a [`MessageApi`] implementation
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server processed the request and said no
    #[error("Request rejected: {0}")]
    Rejected(String),
    /// The target object doesn't exist server-side
    #[error("Not found")]
    NotFound,
    /// The server denied the viewer this operation
    #[error("Permission denied")]
    Denied,
    /// The request never completed
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Canonical reaction state returned by a toggle call.
///
/// `my_reaction` is the server's view of the toggling user's reaction; the
/// local feed re-derives its own pointer from `reactions`, so the two only
/// disagree if the server's aggregate is internally inconsistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionOutcome {
    pub reactions: state::ReactionSet,
    pub my_reaction: Option<Emoji>,
}

/// The server operations a [`FeedSession`](crate::FeedSession) needs.
///
/// Implementations are expected to attach the viewer's credentials
/// themselves; the engine has already checked local permissions by the time
/// any of these is called.
#[async_trait]
pub trait MessageApi: Send + Sync {
    async fn fetch_messages(&self, wall: WallId) -> Result<Vec<state::Message>, ApiError>;

    async fn fetch_comments(&self, message: MessageId) -> Result<Vec<state::Comment>, ApiError>;

    async fn create_message(
        &self,
        wall: WallId,
        draft: &state::MessageDraft,
    ) -> Result<state::Message, ApiError>;

    async fn create_comment(
        &self,
        message: MessageId,
        draft: &state::CommentDraft,
    ) -> Result<state::Comment, ApiError>;

    async fn edit_message(
        &self,
        message: MessageId,
        content: &str,
    ) -> Result<state::Message, ApiError>;

    async fn edit_comment(
        &self,
        comment: CommentId,
        content: &str,
    ) -> Result<state::Comment, ApiError>;

    async fn delete_message(&self, message: MessageId) -> Result<(), ApiError>;

    async fn delete_comment(&self, comment: CommentId) -> Result<(), ApiError>;

    async fn toggle_reaction(
        &self,
        target: ReactTarget,
        emoji: Emoji,
    ) -> Result<ReactionOutcome, ApiError>;

    /// The legacy one-way like. Returns the canonical counter value.
    async fn like_message(&self, message: MessageId) -> Result<u32, ApiError>;

    async fn set_pinned(&self, message: MessageId, pinned: bool) -> Result<(), ApiError>;

    async fn report_message(&self, message: MessageId, reason: &str) -> Result<(), ApiError>;
}
