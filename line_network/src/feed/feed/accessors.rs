use super::{Feed, LookupError, LookupResult};
use crate::feed::comment_tree::CommentTree;
use crate::feed::config;
use crate::prelude::*;

use crate::feed::wrapper::*;

use LookupError::*;

impl Feed {
    /// The wall this feed belongs to.
    pub fn wall(&self) -> &state::Wall {
        &self.wall
    }

    /// The authenticated local user, if any.
    pub fn viewer(&self) -> Option<UserId> {
        self.viewer
    }

    pub fn config(&self) -> &config::FeedConfig {
        &self.config
    }

    /// Look up a message by key.
    pub fn message(&self, key: MessageKey) -> LookupResult<wrapper::Message> {
        self.messages.get(&key).ok_or(NoSuchMessage(key)).wrap(self)
    }

    /// Return an iterator over all messages, in display order.
    pub fn messages(&self) -> impl std::iter::Iterator<Item = wrapper::Message> + '_ {
        self.raw_messages().wrap(self)
    }

    /// Return an iterator over the raw `state::Message` objects, in display
    /// order.
    pub fn raw_messages(&self) -> impl std::iter::Iterator<Item = &state::Message> {
        self.message_order
            .iter()
            .filter_map(move |key| self.messages.get(key))
    }

    /// Look up an author snapshot by ID.
    pub fn user(&self, id: UserId) -> LookupResult<&state::User> {
        self.users.get(&id).ok_or(NoSuchUser(id))
    }

    /// The cached comment thread for a message, if one has been attached.
    pub fn raw_comments(&self, message: MessageId) -> Option<&CommentTree> {
        self.comment_trees.get(&message)
    }

    /// The cached comment thread for a message.
    pub fn comments(&self, message: MessageId) -> LookupResult<&CommentTree> {
        self.comment_trees
            .get(&message)
            .ok_or(NoSuchThread(message))
    }

    /// Look up a comment anywhere in a message's thread.
    pub fn comment(&self, message: MessageId, key: CommentKey) -> LookupResult<wrapper::Comment> {
        self.comments(message)?
            .find(&key)
            .map(|node| &node.comment)
            .ok_or(NoSuchComment(key))
            .wrap(self)
    }
}
