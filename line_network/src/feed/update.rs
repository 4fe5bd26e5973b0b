//! Contains types used by [`Feed`](crate::feed::Feed) to notify callers of state changes

use crate::feed::state;
use crate::prelude::*;

use serde::{Deserialize, Serialize};

/// A message appeared in the feed, either optimistically or from a
/// realtime event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageAdded {
    pub message: state::Message,
}

/// A pending message was acknowledged by the server and re-keyed to its
/// canonical id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageConfirmed {
    pub pending: PendingId,
    pub message: state::Message,
}

/// A message's content or tags changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageUpdated {
    pub message: state::Message,
}

/// A message left the feed. The snapshot is a copy; the object is already
/// gone from the feed state when this is emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRemoved {
    pub message: state::Message,
}

/// A message was pinned or unpinned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePinChanged {
    pub message: state::Message,
}

/// A message's like counter changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageLikeChanged {
    pub message: state::Message,
}

/// A message's reaction state was replaced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageReactionsChanged {
    pub message: state::Message,
}

/// A comment appeared in a message's thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAdded {
    pub comment: state::Comment,
    /// Whether this is a direct reply to the message; only those adjust the
    /// message's reply counter
    pub root_level: bool,
}

/// A pending comment was acknowledged by the server and re-keyed to its
/// canonical id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentConfirmed {
    pub pending: PendingId,
    pub comment: state::Comment,
}

/// A comment's content changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentUpdated {
    pub comment: state::Comment,
}

/// A comment and its nested replies left the thread. The snapshot is a copy
/// of the removed comment itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRemoved {
    pub comment: state::Comment,
    pub root_level: bool,
}

/// A comment's reaction state was replaced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentReactionsChanged {
    pub comment: state::Comment,
}

/// A message's comment thread finished loading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadLoaded {
    pub message: MessageId,
    pub comments: usize,
}

/// The message list was replaced with a freshly fetched page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedLoaded {
    pub wall: WallId,
    pub messages: usize,
}

/// An optimistic message post was rolled back; the draft should go back
/// into the compose box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePostFailed {
    pub wall: WallId,
    pub draft: state::MessageDraft,
}

/// An optimistic comment post was rolled back; the draft should go back
/// into the reply box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentPostFailed {
    pub message: MessageKey,
    pub draft: state::CommentDraft,
}

/// Emitted by the `Feed` to signal that a change has happened which needs to
/// be rendered or otherwise processed. These are distinct from the
/// [`WallEvent`]s which are input to the feed; one event may cause the feed
/// to emit any number of state changes, including none when the event turns
/// out to be a no-op.
///
/// Note that the parameters are all copies of the state objects, as the
/// originals may have already been removed from the feed state when the
/// change is emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeedStateChange {
    MessageAdded(MessageAdded),
    MessageConfirmed(MessageConfirmed),
    MessageUpdated(MessageUpdated),
    MessageRemoved(MessageRemoved),
    MessagePinChanged(MessagePinChanged),
    MessageLikeChanged(MessageLikeChanged),
    MessageReactionsChanged(MessageReactionsChanged),
    CommentAdded(CommentAdded),
    CommentConfirmed(CommentConfirmed),
    CommentUpdated(CommentUpdated),
    CommentRemoved(CommentRemoved),
    CommentReactionsChanged(CommentReactionsChanged),
    ThreadLoaded(ThreadLoaded),
    FeedLoaded(FeedLoaded),
    MessagePostFailed(MessagePostFailed),
    CommentPostFailed(CommentPostFailed),
}

impl From<MessageAdded> for FeedStateChange {
    fn from(detail: MessageAdded) -> Self {
        Self::MessageAdded(detail)
    }
}

impl From<MessageConfirmed> for FeedStateChange {
    fn from(detail: MessageConfirmed) -> Self {
        Self::MessageConfirmed(detail)
    }
}

impl From<MessageUpdated> for FeedStateChange {
    fn from(detail: MessageUpdated) -> Self {
        Self::MessageUpdated(detail)
    }
}

impl From<MessageRemoved> for FeedStateChange {
    fn from(detail: MessageRemoved) -> Self {
        Self::MessageRemoved(detail)
    }
}

impl From<MessagePinChanged> for FeedStateChange {
    fn from(detail: MessagePinChanged) -> Self {
        Self::MessagePinChanged(detail)
    }
}

impl From<MessageLikeChanged> for FeedStateChange {
    fn from(detail: MessageLikeChanged) -> Self {
        Self::MessageLikeChanged(detail)
    }
}

impl From<MessageReactionsChanged> for FeedStateChange {
    fn from(detail: MessageReactionsChanged) -> Self {
        Self::MessageReactionsChanged(detail)
    }
}

impl From<CommentAdded> for FeedStateChange {
    fn from(detail: CommentAdded) -> Self {
        Self::CommentAdded(detail)
    }
}

impl From<CommentConfirmed> for FeedStateChange {
    fn from(detail: CommentConfirmed) -> Self {
        Self::CommentConfirmed(detail)
    }
}

impl From<CommentUpdated> for FeedStateChange {
    fn from(detail: CommentUpdated) -> Self {
        Self::CommentUpdated(detail)
    }
}

impl From<CommentRemoved> for FeedStateChange {
    fn from(detail: CommentRemoved) -> Self {
        Self::CommentRemoved(detail)
    }
}

impl From<CommentReactionsChanged> for FeedStateChange {
    fn from(detail: CommentReactionsChanged) -> Self {
        Self::CommentReactionsChanged(detail)
    }
}

impl From<ThreadLoaded> for FeedStateChange {
    fn from(detail: ThreadLoaded) -> Self {
        Self::ThreadLoaded(detail)
    }
}

impl From<FeedLoaded> for FeedStateChange {
    fn from(detail: FeedLoaded) -> Self {
        Self::FeedLoaded(detail)
    }
}

impl From<MessagePostFailed> for FeedStateChange {
    fn from(detail: MessagePostFailed) -> Self {
        Self::MessagePostFailed(detail)
    }
}

impl From<CommentPostFailed> for FeedStateChange {
    fn from(detail: CommentPostFailed) -> Self {
        Self::CommentPostFailed(detail)
    }
}

/// Trait to be implemented by an object which wants to be notified of feed
/// state updates
///
/// An instance of this is passed to `Feed::apply` to receive all updates
/// caused by that operation.
///
/// This primarily exists to avoid the feed state library depending on tokio
/// or another async runtime for channel types.
pub trait FeedUpdateReceiver {
    /// Notify the receiver of a feed state change
    fn notify_update(&self, update: FeedStateChange);
}

use std::convert::Into;

/// Helper to make sending updates easier
pub(crate) trait FeedUpdateHelper {
    fn notify(&self, update: impl Into<FeedStateChange>);
}

impl<T: FeedUpdateReceiver + ?Sized> FeedUpdateHelper for T {
    fn notify(&self, update: impl Into<FeedStateChange>) {
        self.notify_update(update.into());
    }
}
