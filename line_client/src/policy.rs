//! Local permission gates for session operations.
//!
//! These run before any optimistic state is touched, so a denied operation
//! never needs a rollback. The server remains authoritative and can still
//! reject a call that passes here.

use crate::errors::EngineError;
use line_network::prelude::*;

/// Convenience definition of the `Result` type for permission checks.
pub type PermissionResult = Result<(), EngineError>;

/// The identity and role a session operates under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    viewer: Option<UserId>,
    is_moderator: bool,
}

impl SessionPolicy {
    pub fn new(viewer: Option<UserId>, is_moderator: bool) -> Self {
        Self {
            viewer,
            is_moderator,
        }
    }

    /// A signed-out viewer; every mutation gate fails
    pub fn anonymous() -> Self {
        Self::new(None, false)
    }

    pub fn viewer(&self) -> Option<UserId> {
        self.viewer
    }

    pub fn is_moderator(&self) -> bool {
        self.is_moderator
    }

    /// Every mutation requires a signed-in viewer
    pub fn require_viewer(&self) -> Result<UserId, EngineError> {
        self.viewer.ok_or(EngineError::AuthRequired)
    }

    /// Edits and deletions require authorship
    pub fn require_author(&self, author: UserId) -> PermissionResult {
        if self.require_viewer()? == author {
            Ok(())
        } else {
            Err(EngineError::NotPermitted("only the author can do that"))
        }
    }

    /// Pinning requires the moderator role
    pub fn require_moderator(&self) -> PermissionResult {
        self.require_viewer()?;
        if self.is_moderator {
            Ok(())
        } else {
            Err(EngineError::NotPermitted("moderator role required"))
        }
    }
}
