use super::*;
use crate::prelude::*;

use serde::{Deserialize, Serialize};

/// Unsent content for a new wall message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDraft {
    pub content: String,
    pub attachments: Vec<Attachment>,
    pub tags: Vec<TagName>,
}

impl MessageDraft {
    /// A draft is postable when it has text or at least one attachment
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty() || !self.attachments.is_empty()
    }
}

/// Unsent content for a new comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentDraft {
    pub content: String,
    pub attachments: Vec<Attachment>,
    /// `None` for a root-level reply to the message itself
    pub parent: Option<CommentId>,
}

impl CommentDraft {
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty() || !self.attachments.is_empty()
    }
}
