//! Defines the payload types for wall events.
//!
//! Record-bearing payloads carry the full canonical object plus an author
//! snapshot, so receivers can merge without a follow-up fetch. Records on
//! the wire always carry confirmed ids.

use crate::feed::state;
use crate::prelude::*;

use serde::{Deserialize, Serialize};

/// A new message was posted to the wall
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    pub message: state::Message,
    pub author: state::User,
}

/// A message's content was edited
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageUpdated {
    pub message: state::Message,
    pub author: state::User,
}

/// A message was removed, along with its comment thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDeleted {}

/// A moderator pinned or unpinned a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePinned {
    pub pinned: bool,
}

/// The legacy like counter on a message changed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeUpdated {
    pub count: u32,
}

/// A root-level comment was added to a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub comment: state::Comment,
    pub author: state::User,
}

/// A nested reply was added under an existing comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedReplyAdded {
    pub comment: state::Comment,
    pub author: state::User,
}

/// A comment's content was edited
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentUpdated {
    pub comment: state::Comment,
    pub author: state::User,
}

/// A comment was removed, along with any replies beneath it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDeleted {
    pub message: MessageId,
}

/// The reaction aggregate on a message was replaced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageReactionUpdated {
    pub reactions: state::ReactionSet,
}

/// The reaction aggregate on a comment was replaced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentReactionUpdated {
    pub message: MessageId,
    pub reactions: state::ReactionSet,
}

/// The event payload types. Variant names serialize in snake_case to match
/// the realtime wire protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventDetails {
    NewMessage(NewMessage),
    MessageUpdated(MessageUpdated),
    MessageDeleted(MessageDeleted),
    MessagePinned(MessagePinned),
    LikeUpdated(LikeUpdated),
    NewComment(NewComment),
    NestedReplyAdded(NestedReplyAdded),
    CommentUpdated(CommentUpdated),
    CommentDeleted(CommentDeleted),
    MessageReactionUpdated(MessageReactionUpdated),
    CommentReactionUpdated(CommentReactionUpdated),
}

impl From<NewMessage> for EventDetails {
    fn from(details: NewMessage) -> Self {
        Self::NewMessage(details)
    }
}

impl From<MessageUpdated> for EventDetails {
    fn from(details: MessageUpdated) -> Self {
        Self::MessageUpdated(details)
    }
}

impl From<MessageDeleted> for EventDetails {
    fn from(details: MessageDeleted) -> Self {
        Self::MessageDeleted(details)
    }
}

impl From<MessagePinned> for EventDetails {
    fn from(details: MessagePinned) -> Self {
        Self::MessagePinned(details)
    }
}

impl From<LikeUpdated> for EventDetails {
    fn from(details: LikeUpdated) -> Self {
        Self::LikeUpdated(details)
    }
}

impl From<NewComment> for EventDetails {
    fn from(details: NewComment) -> Self {
        Self::NewComment(details)
    }
}

impl From<NestedReplyAdded> for EventDetails {
    fn from(details: NestedReplyAdded) -> Self {
        Self::NestedReplyAdded(details)
    }
}

impl From<CommentUpdated> for EventDetails {
    fn from(details: CommentUpdated) -> Self {
        Self::CommentUpdated(details)
    }
}

impl From<CommentDeleted> for EventDetails {
    fn from(details: CommentDeleted) -> Self {
        Self::CommentDeleted(details)
    }
}

impl From<MessageReactionUpdated> for EventDetails {
    fn from(details: MessageReactionUpdated) -> Self {
        Self::MessageReactionUpdated(details)
    }
}

impl From<CommentReactionUpdated> for EventDetails {
    fn from(details: CommentReactionUpdated) -> Self {
        Self::CommentReactionUpdated(details)
    }
}
