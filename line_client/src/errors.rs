//! Defines the error taxonomy surfaced by session operations

use crate::api::ApiError;
use line_network::prelude::*;

use thiserror::Error;

/// A request that failed local validation, before anything was applied
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Nothing to post")]
    EmptyDraft,
    #[error("Replies can be nested at most {0} deep")]
    TooDeep(usize),
    #[error("Reply parent {0:?} is not part of the loaded thread")]
    UnknownParent(CommentId),
}

/// Why a session operation failed.
///
/// Whatever went wrong underneath, callers see exactly one of these; the
/// rollback (where one applies) has already happened by the time the error
/// is returned.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No viewer is signed in
    #[error("Sign in to do that")]
    AuthRequired,

    /// The viewer is signed in but lacks the right role or authorship
    #[error("Not permitted: {0}")]
    NotPermitted(&'static str),

    /// The request was malformed before any state was touched
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// The collaborator call failed; local state has been rolled back
    #[error("Server request failed: {0}")]
    Network(#[from] ApiError),

    /// The target vanished from local state underneath the operation,
    /// usually because a realtime delete merged mid-flight
    #[error("Local state changed underneath the operation: {0}")]
    ConflictAtMerge(#[from] LookupError),
}
