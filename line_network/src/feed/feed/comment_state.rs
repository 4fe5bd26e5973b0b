use super::*;

use crate::feed::comment_tree::{CommentNode, DetachedComment};

/// Where [`Feed::insert_comment`] put the comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentInserted {
    /// Direct reply to the message; the reply counter was incremented
    Root,
    /// Nested reply; counters untouched
    Nested,
    /// The key was already in the tree; nothing changed
    AlreadyPresent,
}

impl Feed {
    /// Replace a message's cached comment thread with one built from a flat
    /// server response. Returns the number of comments that made it into
    /// the tree.
    pub fn attach_comments(
        &mut self,
        message: MessageId,
        flat: Vec<state::Comment>,
        updates: &dyn FeedUpdateReceiver,
    ) -> LookupResult<usize> {
        let key = MessageKey::Confirmed(message);
        if !self.messages.contains_key(&key) {
            return Err(LookupError::NoSuchMessage(key));
        }

        let flat: Vec<_> = flat
            .into_iter()
            .map(|mut comment| {
                comment.my_reaction = self.my_reaction_in(&comment.reactions);
                comment
            })
            .collect();

        let tree = CommentTree::build(message, flat);
        let comments = tree.len();
        self.comment_trees.insert(message, tree);

        updates.notify(update::ThreadLoaded { message, comments });
        Ok(comments)
    }

    /// Insert one comment into its message's thread, creating the thread if
    /// this is the first comment to arrive before a full load.
    ///
    /// This is the single place that bumps a message's reply counter, and
    /// it does so only for root-level inserts. A comment whose key is
    /// already present leaves the feed untouched.
    pub fn insert_comment(
        &mut self,
        comment: state::Comment,
        updates: &dyn FeedUpdateReceiver,
    ) -> LookupResult<CommentInserted> {
        let message = comment.message;
        let message_key = MessageKey::Confirmed(message);
        if !self.messages.contains_key(&message_key) {
            return Err(LookupError::NoSuchMessage(message_key));
        }

        let tree = self.comment_trees.entry(message).or_default();
        if tree.find(&comment.id).is_some() {
            return Ok(CommentInserted::AlreadyPresent);
        }

        let root_level = tree.insert(CommentNode::new(comment.clone()))?;

        if root_level {
            if let Some(m) = self.messages.get_mut(&message_key) {
                m.reply_count += 1;
            }
        }

        updates.notify(update::CommentAdded {
            comment,
            root_level,
        });

        Ok(if root_level {
            CommentInserted::Root
        } else {
            CommentInserted::Nested
        })
    }

    /// Replace a pending placeholder comment with the server's canonical
    /// record, preserving its position among its siblings.
    pub fn confirm_comment(
        &mut self,
        message: MessageId,
        pending: PendingId,
        canonical: state::Comment,
        updates: &dyn FeedUpdateReceiver,
    ) -> LookupResult<()> {
        let my_reaction = self.my_reaction_in(&canonical.reactions);

        let tree = self
            .comment_trees
            .get_mut(&message)
            .ok_or(LookupError::NoSuchThread(message))?;

        let key = CommentKey::Pending(pending);
        let confirmed = tree
            .update_node(&key, move |node| {
                node.comment = state::Comment {
                    my_reaction,
                    ..canonical
                };
                node.comment.clone()
            })
            .ok_or(LookupError::NoSuchPending(pending))?;

        updates.notify(update::CommentConfirmed {
            pending,
            comment: confirmed,
        });
        Ok(())
    }

    /// Remove a comment and its subtree, decrementing the message's reply
    /// counter by exactly one when the removed node was root-level. A
    /// missing thread or key is a no-op returning `None`.
    pub fn remove_comment(
        &mut self,
        message: MessageId,
        key: CommentKey,
        updates: &dyn FeedUpdateReceiver,
    ) -> Option<DetachedComment> {
        let tree = self.comment_trees.get_mut(&message)?;
        let detached = tree.detach(&key)?;

        if detached.root_level {
            if let Some(m) = self.messages.get_mut(&MessageKey::Confirmed(message)) {
                m.reply_count = m.reply_count.saturating_sub(1);
            }
        }

        updates.notify(update::CommentRemoved {
            comment: detached.node.comment.clone(),
            root_level: detached.root_level,
        });
        Some(detached)
    }

    /// Apply a transform to a comment. Notifies only when the transform
    /// actually changed something.
    pub fn update_comment(
        &mut self,
        message: MessageId,
        key: CommentKey,
        f: impl FnOnce(&mut state::Comment),
        updates: &dyn FeedUpdateReceiver,
    ) -> LookupResult<()> {
        let tree = self
            .comment_trees
            .get_mut(&message)
            .ok_or(LookupError::NoSuchThread(message))?;

        let changed = tree
            .update_node(&key, move |node| {
                let before = node.comment.clone();
                f(&mut node.comment);
                if node.comment != before {
                    Some(node.comment.clone())
                } else {
                    None
                }
            })
            .ok_or(LookupError::NoSuchComment(key))?;

        if let Some(comment) = changed {
            updates.notify(update::CommentUpdated { comment });
        }
        Ok(())
    }

    /// Shared handling for the two comment-creation events; they differ
    /// only in wire name, not in how they merge.
    fn apply_incoming_comment(
        &mut self,
        target: CommentId,
        incoming: &state::Comment,
        author: &state::User,
        updates: &dyn FeedUpdateReceiver,
    ) {
        // The viewer's own comment is already in the tree as a placeholder;
        // the canonical record arrives through the confirm path instead.
        if Some(author.id) == self.viewer {
            tracing::trace!(comment = ?target, "Suppressing echo of own comment");
            return;
        }

        self.upsert_user(author);

        let mut comment = incoming.clone();
        comment.id = CommentKey::Confirmed(target);
        comment.my_reaction = self.my_reaction_in(&comment.reactions);

        if let Err(e) = self.insert_comment(comment, updates) {
            tracing::debug!(comment = ?target, error = %e, "Ignoring comment for unknown target");
        }
    }

    pub(super) fn new_comment(
        &mut self,
        target: CommentId,
        details: &details::NewComment,
        updates: &dyn FeedUpdateReceiver,
    ) {
        self.apply_incoming_comment(target, &details.comment, &details.author, updates);
    }

    pub(super) fn nested_reply_added(
        &mut self,
        target: CommentId,
        details: &details::NestedReplyAdded,
        updates: &dyn FeedUpdateReceiver,
    ) {
        self.apply_incoming_comment(target, &details.comment, &details.author, updates);
    }

    pub(super) fn comment_updated(
        &mut self,
        target: CommentId,
        details: &details::CommentUpdated,
        updates: &dyn FeedUpdateReceiver,
    ) {
        self.upsert_user(&details.author);

        let mut canonical = details.comment.clone();
        canonical.id = CommentKey::Confirmed(target);
        canonical.my_reaction = self.my_reaction_in(&canonical.reactions);

        let message = canonical.message;
        let key = canonical.id;
        let result = self.update_comment(message, key, move |c| *c = canonical, updates);
        if result.is_err() {
            tracing::debug!(comment = ?target, "Ignoring update for unknown comment");
        }
    }

    pub(super) fn comment_deleted(
        &mut self,
        target: CommentId,
        details: &details::CommentDeleted,
        updates: &dyn FeedUpdateReceiver,
    ) {
        if self
            .remove_comment(details.message, CommentKey::Confirmed(target), updates)
            .is_none()
        {
            tracing::debug!(comment = ?target, "Ignoring delete for unknown comment");
        }
    }
}
