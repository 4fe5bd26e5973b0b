use crate::prelude::*;

/// A wrapper around a [`state::Comment`]
pub struct Comment<'a> {
    feed: &'a Feed,
    data: &'a state::Comment,
}

impl Comment<'_> {
    /// Return this object's key
    pub fn id(&self) -> CommentKey {
        self.data.id
    }

    /// Whether this is an optimistic placeholder awaiting confirmation
    pub fn is_pending(&self) -> bool {
        self.data.id.is_pending()
    }

    /// The message whose thread this comment belongs to
    pub fn message(&self) -> LookupResult<wrapper::Message<'_>> {
        self.feed.message(MessageKey::Confirmed(self.data.message))
    }

    /// What this comment was posted under
    pub fn parent(&self) -> ParentRef {
        self.data.parent
    }

    /// The comment's author, if their snapshot is in the feed
    pub fn author(&self) -> LookupResult<&state::User> {
        self.feed.user(self.data.author)
    }

    /// The comment content
    pub fn content(&self) -> &str {
        &self.data.content
    }

    /// The comment's timestamp
    pub fn ts(&self) -> i64 {
        self.data.ts
    }

    pub fn attachments(&self) -> &[state::Attachment] {
        &self.data.attachments
    }

    pub fn reactions(&self) -> &state::ReactionSet {
        &self.data.reactions
    }

    /// The viewer's reaction to this comment, if any
    pub fn my_reaction(&self) -> Option<&Emoji> {
        self.data.my_reaction.as_ref()
    }

    pub fn is_edited(&self) -> bool {
        self.data.edited
    }

    pub fn edited_at(&self) -> Option<i64> {
        self.data.edited_at
    }
}

impl<'a> super::ObjectWrapper<'a> for Comment<'a> {
    type Underlying = state::Comment;

    fn wrap(feed: &'a Feed, data: &'a state::Comment) -> Self {
        Self { feed, data }
    }

    fn raw(&self) -> &'a Self::Underlying {
        self.data
    }
}
