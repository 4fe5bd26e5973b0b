use super::*;
use crate::prelude::*;

use serde::{Deserialize, Serialize};

/// A wall post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageKey,
    pub wall: WallId,
    pub author: UserId,
    pub content: String,
    pub ts: i64,
    pub attachments: Vec<Attachment>,
    pub tags: Vec<TagName>,
    pub reactions: ReactionSet,
    /// The viewer's own reaction, kept in step with `reactions`
    pub my_reaction: Option<Emoji>,
    /// Legacy single-like counter, distinct from emoji reactions
    pub like_count: u32,
    /// Number of root-level comments. Nested replies don't count here.
    pub reply_count: u32,
    pub pinned: bool,
    pub edited: bool,
    pub edited_at: Option<i64>,
}
