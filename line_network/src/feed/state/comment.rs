use super::*;
use crate::prelude::*;

use serde::{Deserialize, Serialize};

/// A comment on a wall message.
///
/// Root-level comments have `parent` pointing at the message itself; nested
/// replies point at another comment. `message` always names the wall post
/// whose thread this comment belongs to, whatever the nesting depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentKey,
    pub message: MessageId,
    pub parent: ParentRef,
    pub author: UserId,
    pub content: String,
    pub ts: i64,
    pub attachments: Vec<Attachment>,
    pub reactions: ReactionSet,
    /// The viewer's own reaction, kept in step with `reactions`
    pub my_reaction: Option<Emoji>,
    pub edited: bool,
    pub edited_at: Option<i64>,
}
