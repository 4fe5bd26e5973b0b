use super::*;

impl Feed {
    /// Replace a message's reaction state wholesale with an authoritative
    /// map, re-deriving the viewer's own-reaction pointer from it. The
    /// stored state is never diffed against the incoming one; equal state
    /// is simply a quiet no-op.
    pub fn set_message_reactions(
        &mut self,
        key: MessageKey,
        reactions: state::ReactionSet,
        updates: &dyn FeedUpdateReceiver,
    ) -> LookupResult<()> {
        let my_reaction = self.my_reaction_in(&reactions);

        let message = self
            .messages
            .get_mut(&key)
            .ok_or(LookupError::NoSuchMessage(key))?;

        if message.reactions == reactions && message.my_reaction == my_reaction {
            return Ok(());
        }

        message.reactions = reactions;
        message.my_reaction = my_reaction;

        updates.notify(update::MessageReactionsChanged {
            message: message.clone(),
        });
        Ok(())
    }

    /// Comment analogue of [`set_message_reactions`](Self::set_message_reactions)
    pub fn set_comment_reactions(
        &mut self,
        message: MessageId,
        key: CommentKey,
        reactions: state::ReactionSet,
        updates: &dyn FeedUpdateReceiver,
    ) -> LookupResult<()> {
        let my_reaction = self.my_reaction_in(&reactions);

        let tree = self
            .comment_trees
            .get_mut(&message)
            .ok_or(LookupError::NoSuchThread(message))?;

        let changed = tree
            .update_node(&key, move |node| {
                if node.comment.reactions == reactions && node.comment.my_reaction == my_reaction {
                    return None;
                }
                node.comment.reactions = reactions;
                node.comment.my_reaction = my_reaction;
                Some(node.comment.clone())
            })
            .ok_or(LookupError::NoSuchComment(key))?;

        if let Some(comment) = changed {
            updates.notify(update::CommentReactionsChanged { comment });
        }
        Ok(())
    }

    pub(super) fn message_reaction_updated(
        &mut self,
        target: MessageId,
        details: &details::MessageReactionUpdated,
        updates: &dyn FeedUpdateReceiver,
    ) {
        let key = MessageKey::Confirmed(target);
        let result = self.set_message_reactions(key, details.reactions.clone(), updates);
        if result.is_err() {
            tracing::debug!(message = ?target, "Ignoring reactions for unknown message");
        }
    }

    pub(super) fn comment_reaction_updated(
        &mut self,
        target: CommentId,
        details: &details::CommentReactionUpdated,
        updates: &dyn FeedUpdateReceiver,
    ) {
        let key = CommentKey::Confirmed(target);
        let result =
            self.set_comment_reactions(details.message, key, details.reactions.clone(), updates);
        if result.is_err() {
            tracing::debug!(comment = ?target, "Ignoring reactions for unknown comment");
        }
    }
}
