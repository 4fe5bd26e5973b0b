use crate::prelude::*;

/// A wrapper around a [`state::Message`]
pub struct Message<'a> {
    feed: &'a Feed,
    data: &'a state::Message,
}

impl<'a> Message<'a> {
    /// Return this object's key
    pub fn id(&self) -> MessageKey {
        self.data.id
    }

    /// Whether this is an optimistic placeholder awaiting confirmation
    pub fn is_pending(&self) -> bool {
        self.data.id.is_pending()
    }

    /// The wall this message was posted to
    pub fn wall(&self) -> WallId {
        self.data.wall
    }

    /// The message's author, if their snapshot is in the feed
    pub fn author(&self) -> LookupResult<&state::User> {
        self.feed.user(self.data.author)
    }

    /// The message content
    pub fn content(&self) -> &str {
        &self.data.content
    }

    /// The message's timestamp
    pub fn ts(&self) -> i64 {
        self.data.ts
    }

    pub fn attachments(&self) -> &[state::Attachment] {
        &self.data.attachments
    }

    pub fn tags(&self) -> &[TagName] {
        &self.data.tags
    }

    pub fn reactions(&self) -> &state::ReactionSet {
        &self.data.reactions
    }

    /// The viewer's reaction to this message, if any
    pub fn my_reaction(&self) -> Option<&Emoji> {
        self.data.my_reaction.as_ref()
    }

    pub fn like_count(&self) -> u32 {
        self.data.like_count
    }

    /// Number of direct root-level replies; nested replies aren't counted
    pub fn reply_count(&self) -> u32 {
        self.data.reply_count
    }

    pub fn is_pinned(&self) -> bool {
        self.data.pinned
    }

    pub fn is_edited(&self) -> bool {
        self.data.edited
    }

    pub fn edited_at(&self) -> Option<i64> {
        self.data.edited_at
    }

    /// The cached comment thread, if it has been loaded or started
    pub fn comments(&self) -> Option<&'a CommentTree> {
        self.data
            .id
            .confirmed()
            .and_then(|id| self.feed.raw_comments(id))
    }
}

impl<'a> super::ObjectWrapper<'a> for Message<'a> {
    type Underlying = state::Message;

    fn wrap(feed: &'a Feed, data: &'a state::Message) -> Self {
        Self { feed, data }
    }

    fn raw(&self) -> &'a Self::Underlying {
        self.data
    }
}
