//! Defines errors returned by the other modules

use crate::prelude::*;
use thiserror::Error;

/// Types of error that can occur while looking up feed objects
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Wrong ID type")]
    WrongType,
    #[error("No such user id {0:?}")]
    NoSuchUser(UserId),
    #[error("No such message {0:?}")]
    NoSuchMessage(MessageKey),
    #[error("No comment thread loaded for message {0:?}")]
    NoSuchThread(MessageId),
    #[error("No such comment {0:?}")]
    NoSuchComment(CommentKey),
    #[error("No such pending entry {0:?}")]
    NoSuchPending(PendingId),
}

/// Convenience definition of a Result type used to look up feed objects.
pub type LookupResult<T> = std::result::Result<T, LookupError>;

impl From<WrongIdTypeError> for LookupError {
    fn from(_: WrongIdTypeError) -> Self {
        Self::WrongType
    }
}
