//! Defines the various object and event ID types

use line_macros::object_ids;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct Uuid7(Uuid);

impl Deref for Uuid7 {
    type Target = Uuid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Uuid7 {
    pub fn new_now() -> Self {
        Self(Uuid::now_v7())
    }
}

#[derive(Debug, Error)]
#[error("Mismatched object ID type for event")]
pub struct WrongIdTypeError;

object_ids!(ObjectId (ObjectIdGenerator) {
    Server: (u16,);
    Event: snowflake;
    Wall: snowflake;
    Message: snowflake;
    Comment: snowflake;
    User: snowflake;
    Tag: snowflake;
    Chat: snowflake;
});

impl ObjectIdGenerator {
    pub fn next_event(&self) -> EventId {
        self.next()
    }
    pub fn next_wall(&self) -> WallId {
        self.next()
    }
    pub fn next_message(&self) -> MessageId {
        self.next()
    }
    pub fn next_comment(&self) -> CommentId {
        self.next()
    }
    pub fn next_user(&self) -> UserId {
        self.next()
    }
    pub fn next_tag(&self) -> TagId {
        self.next()
    }
    pub fn next_chat(&self) -> ChatId {
        self.next()
    }
}

/// Client-local identity for an optimistic placeholder.
///
/// Deliberately a separate type from the server-assigned ids above, so the
/// two namespaces can never collide and a placeholder can never be mistaken
/// for a confirmed object.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct PendingId(Uuid7);

impl PendingId {
    pub fn new() -> Self {
        Self(Uuid7::new_now())
    }
}

impl Default for PendingId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifies a message in the local feed, which may or may not have been
/// confirmed by the server yet
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    Confirmed(MessageId),
    Pending(PendingId),
}

impl MessageKey {
    pub fn confirmed(&self) -> Option<MessageId> {
        match self {
            Self::Confirmed(id) => Some(*id),
            Self::Pending(_) => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

impl From<MessageId> for MessageKey {
    fn from(id: MessageId) -> Self {
        Self::Confirmed(id)
    }
}

impl From<PendingId> for MessageKey {
    fn from(id: PendingId) -> Self {
        Self::Pending(id)
    }
}

/// Identifies a comment in a local comment tree, which may or may not have
/// been confirmed by the server yet
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum CommentKey {
    Confirmed(CommentId),
    Pending(PendingId),
}

impl CommentKey {
    pub fn confirmed(&self) -> Option<CommentId> {
        match self {
            Self::Confirmed(id) => Some(*id),
            Self::Pending(_) => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

impl From<CommentId> for CommentKey {
    fn from(id: CommentId) -> Self {
        Self::Confirmed(id)
    }
}

impl From<PendingId> for CommentKey {
    fn from(id: PendingId) -> Self {
        Self::Pending(id)
    }
}

/// What a comment is attached to. Root-level replies point at the wall
/// message itself; nested replies point at another comment.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum ParentRef {
    Message(MessageId),
    Comment(CommentId),
}

/// The object a reaction toggle applies to.
///
/// Comment targets carry the message whose thread holds the comment; local
/// comment state is reachable only through its thread.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum ReactTarget {
    Message(MessageId),
    Comment {
        message: MessageId,
        comment: CommentId,
    },
}
