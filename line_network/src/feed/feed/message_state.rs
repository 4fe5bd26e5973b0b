use super::*;

impl Feed {
    /// Replace the message list with a freshly fetched page, preserving the
    /// server's ordering. Cached comment threads survive only for messages
    /// still present afterwards.
    pub fn attach_messages(
        &mut self,
        messages: Vec<state::Message>,
        updates: &dyn FeedUpdateReceiver,
    ) -> usize {
        self.messages.clear();
        self.message_order.clear();

        for mut message in messages {
            message.my_reaction = self.my_reaction_in(&message.reactions);
            self.message_order.push(message.id);
            self.messages.insert(message.id, message);
        }

        self.comment_trees
            .retain(|id, _| self.messages.contains_key(&MessageKey::Confirmed(*id)));

        let count = self.messages.len();
        updates.notify(update::FeedLoaded {
            wall: self.wall.id,
            messages: count,
        });
        count
    }

    /// Insert a message at the front of the display order.
    ///
    /// Used both for optimistic placeholders and for foreign-authored
    /// realtime events; a message whose key is already present is left
    /// untouched. Returns whether anything was inserted.
    pub fn insert_message(
        &mut self,
        message: state::Message,
        updates: &dyn FeedUpdateReceiver,
    ) -> bool {
        if self.messages.contains_key(&message.id) {
            return false;
        }

        self.message_order.insert(0, message.id);
        self.messages.insert(message.id, message.clone());

        updates.notify(update::MessageAdded { message });
        true
    }

    /// Replace a pending placeholder with the server's canonical record,
    /// preserving its position in the display order.
    pub fn confirm_message(
        &mut self,
        pending: PendingId,
        mut canonical: state::Message,
        updates: &dyn FeedUpdateReceiver,
    ) -> LookupResult<()> {
        let old_key = MessageKey::Pending(pending);
        self.messages
            .remove(&old_key)
            .ok_or(LookupError::NoSuchPending(pending))?;

        canonical.my_reaction = self.my_reaction_in(&canonical.reactions);

        if let Some(slot) = self.message_order.iter_mut().find(|k| **k == old_key) {
            *slot = canonical.id;
        }
        self.messages.insert(canonical.id, canonical.clone());

        updates.notify(update::MessageConfirmed {
            pending,
            message: canonical,
        });
        Ok(())
    }

    /// Remove a message and its cached comment thread. A missing key is a
    /// no-op returning `None`.
    pub fn remove_message(
        &mut self,
        key: MessageKey,
        updates: &dyn FeedUpdateReceiver,
    ) -> Option<state::Message> {
        let removed = self.messages.remove(&key)?;
        self.message_order.retain(|k| *k != key);
        if let Some(id) = key.confirmed() {
            self.comment_trees.remove(&id);
        }

        updates.notify(update::MessageRemoved {
            message: removed.clone(),
        });
        Some(removed)
    }

    /// Apply a transform to a message. Notifies only when the transform
    /// actually changed something, which keeps repeated application of the
    /// same canonical state quiet.
    pub fn update_message(
        &mut self,
        key: MessageKey,
        f: impl FnOnce(&mut state::Message),
        updates: &dyn FeedUpdateReceiver,
    ) -> LookupResult<()> {
        let message = self
            .messages
            .get_mut(&key)
            .ok_or(LookupError::NoSuchMessage(key))?;

        let before = message.clone();
        f(message);

        if *message != before {
            updates.notify(update::MessageUpdated {
                message: message.clone(),
            });
        }
        Ok(())
    }

    /// Set the pinned flag, notifying on actual change
    pub fn set_pinned(
        &mut self,
        key: MessageKey,
        pinned: bool,
        updates: &dyn FeedUpdateReceiver,
    ) -> LookupResult<()> {
        let message = self
            .messages
            .get_mut(&key)
            .ok_or(LookupError::NoSuchMessage(key))?;

        if message.pinned != pinned {
            message.pinned = pinned;
            updates.notify(update::MessagePinChanged {
                message: message.clone(),
            });
        }
        Ok(())
    }

    /// Set the like counter, notifying on actual change
    pub fn set_like_count(
        &mut self,
        key: MessageKey,
        count: u32,
        updates: &dyn FeedUpdateReceiver,
    ) -> LookupResult<()> {
        let message = self
            .messages
            .get_mut(&key)
            .ok_or(LookupError::NoSuchMessage(key))?;

        if message.like_count != count {
            message.like_count = count;
            updates.notify(update::MessageLikeChanged {
                message: message.clone(),
            });
        }
        Ok(())
    }

    pub(super) fn new_message(
        &mut self,
        target: MessageId,
        details: &details::NewMessage,
        updates: &dyn FeedUpdateReceiver,
    ) {
        // The viewer's own post is already in the feed as a placeholder;
        // the canonical record arrives through the confirm path instead.
        if Some(details.author.id) == self.viewer {
            tracing::trace!(message = ?target, "Suppressing echo of own message");
            return;
        }

        self.upsert_user(&details.author);

        let mut message = details.message.clone();
        message.id = MessageKey::Confirmed(target);
        message.my_reaction = self.my_reaction_in(&message.reactions);

        self.insert_message(message, updates);
    }

    pub(super) fn message_updated(
        &mut self,
        target: MessageId,
        details: &details::MessageUpdated,
        updates: &dyn FeedUpdateReceiver,
    ) {
        self.upsert_user(&details.author);

        let mut canonical = details.message.clone();
        canonical.id = MessageKey::Confirmed(target);
        canonical.my_reaction = self.my_reaction_in(&canonical.reactions);

        let result = self.update_message(canonical.id, |m| *m = canonical, updates);
        if result.is_err() {
            tracing::debug!(message = ?target, "Ignoring update for unknown message");
        }
    }

    pub(super) fn message_deleted(
        &mut self,
        target: MessageId,
        _details: &details::MessageDeleted,
        updates: &dyn FeedUpdateReceiver,
    ) {
        if self
            .remove_message(MessageKey::Confirmed(target), updates)
            .is_none()
        {
            tracing::debug!(message = ?target, "Ignoring delete for unknown message");
        }
    }

    pub(super) fn message_pinned(
        &mut self,
        target: MessageId,
        details: &details::MessagePinned,
        updates: &dyn FeedUpdateReceiver,
    ) {
        let result = self.set_pinned(MessageKey::Confirmed(target), details.pinned, updates);
        if result.is_err() {
            tracing::debug!(message = ?target, "Ignoring pin change for unknown message");
        }
    }

    pub(super) fn like_updated(
        &mut self,
        target: MessageId,
        details: &details::LikeUpdated,
        updates: &dyn FeedUpdateReceiver,
    ) {
        let result = self.set_like_count(MessageKey::Confirmed(target), details.count, updates);
        if result.is_err() {
            tracing::debug!(message = ?target, "Ignoring like count for unknown message");
        }
    }
}
