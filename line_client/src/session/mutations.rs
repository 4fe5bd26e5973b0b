//! Three-phase optimistic mutations.
//!
//! Every operation here follows the same shape: permission gates first,
//! then the local apply along with whatever snapshot the rollback needs,
//! then the collaborator call, then either the canonical replacement or
//! the snapshot restore. Local applies and rollbacks run under the write
//! lock; the collaborator call never does.

use super::*;

use line_network::feed::wrapper::ObjectWrapper;

/// Exactly the fields an edit rewrites, snapshotted before the local apply
struct EditSnapshot {
    content: String,
    edited: bool,
    edited_at: Option<i64>,
}

impl FeedSession {
    /// Post a new message to the wall
    #[tracing::instrument(skip(self, draft))]
    pub async fn create_message(&self, draft: state::MessageDraft) -> Result<(), EngineError> {
        let author = self.policy.require_viewer()?;
        if !draft.has_content() {
            return Err(ValidationError::EmptyDraft.into());
        }

        let wall = self.feed.read().wall().id;
        let pending = PendingId::new();

        self.update_feed(|feed, updates| {
            feed.insert_message(
                state::Message {
                    id: pending.into(),
                    wall,
                    author,
                    content: draft.content.clone(),
                    ts: utils::now(),
                    attachments: draft.attachments.clone(),
                    tags: draft.tags.clone(),
                    reactions: state::ReactionSet::new(),
                    my_reaction: None,
                    like_count: 0,
                    reply_count: 0,
                    pinned: false,
                    edited: false,
                    edited_at: None,
                },
                updates,
            );
        });

        match self.api.create_message(wall, &draft).await {
            Ok(canonical) => {
                self.update_feed(|feed, updates| {
                    feed.confirm_message(pending, canonical, updates)
                })?;
                Ok(())
            }
            Err(e) => {
                self.update_feed(|feed, updates| {
                    feed.remove_message(MessageKey::Pending(pending), updates)
                });
                self.notify_update(update::MessagePostFailed { wall, draft }.into());
                Err(e.into())
            }
        }
    }

    /// Post a comment, root-level or nested under `draft.parent`.
    ///
    /// The reply counter moves inside the feed's insert, so a failed post
    /// gives the consumed counter back when the placeholder is detached.
    #[tracing::instrument(skip(self, draft))]
    pub async fn create_comment(
        &self,
        message: MessageId,
        draft: state::CommentDraft,
    ) -> Result<(), EngineError> {
        let author = self.policy.require_viewer()?;
        if !draft.has_content() {
            return Err(ValidationError::EmptyDraft.into());
        }

        let pending = PendingId::new();

        self.update_feed(|feed, updates| -> Result<(), EngineError> {
            let parent = match draft.parent {
                Some(parent) => {
                    let depth = feed
                        .raw_comments(message)
                        .and_then(|tree| tree.depth_of(&CommentKey::Confirmed(parent)))
                        .ok_or(ValidationError::UnknownParent(parent))?;
                    let cap = feed.config().max_reply_depth;
                    if depth >= cap {
                        return Err(ValidationError::TooDeep(cap).into());
                    }
                    ParentRef::Comment(parent)
                }
                None => ParentRef::Message(message),
            };

            feed.insert_comment(
                state::Comment {
                    id: pending.into(),
                    message,
                    parent,
                    author,
                    content: draft.content.clone(),
                    ts: utils::now(),
                    attachments: draft.attachments.clone(),
                    reactions: state::ReactionSet::new(),
                    my_reaction: None,
                    edited: false,
                    edited_at: None,
                },
                updates,
            )?;
            Ok(())
        })?;

        match self.api.create_comment(message, &draft).await {
            Ok(canonical) => {
                self.update_feed(|feed, updates| {
                    feed.confirm_comment(message, pending, canonical, updates)
                })?;
                Ok(())
            }
            Err(e) => {
                self.update_feed(|feed, updates| {
                    feed.remove_comment(message, CommentKey::Pending(pending), updates)
                });
                self.notify_update(
                    update::CommentPostFailed {
                        message: MessageKey::Confirmed(message),
                        draft,
                    }
                    .into(),
                );
                Err(e.into())
            }
        }
    }

    /// Rewrite a message's content, marking it edited
    #[tracing::instrument(skip(self, new_content))]
    pub async fn edit_message(
        &self,
        message: MessageId,
        new_content: String,
    ) -> Result<(), EngineError> {
        let key = MessageKey::Confirmed(message);
        {
            let feed = self.feed.read();
            let author = feed.message(key)?.raw().author;
            self.policy.require_author(author)?;
        }

        let snapshot = self.update_feed(|feed, updates| -> LookupResult<EditSnapshot> {
            let snapshot = {
                let m = feed.message(key)?;
                EditSnapshot {
                    content: m.content().to_string(),
                    edited: m.is_edited(),
                    edited_at: m.edited_at(),
                }
            };
            feed.update_message(
                key,
                |m| {
                    m.content = new_content.clone();
                    m.edited = true;
                    m.edited_at = Some(utils::now());
                },
                updates,
            )?;
            Ok(snapshot)
        })?;

        match self.api.edit_message(message, &new_content).await {
            Ok(canonical) => {
                self.update_feed(|feed, updates| {
                    feed.update_message(
                        key,
                        |m| {
                            m.content = canonical.content;
                            m.edited = canonical.edited;
                            m.edited_at = canonical.edited_at;
                        },
                        updates,
                    )
                })
                .or_log("Confirming message edit");
                Ok(())
            }
            Err(e) => {
                self.update_feed(|feed, updates| {
                    feed.update_message(
                        key,
                        |m| {
                            m.content = snapshot.content;
                            m.edited = snapshot.edited;
                            m.edited_at = snapshot.edited_at;
                        },
                        updates,
                    )
                })
                .or_log("Rolling back message edit");
                Err(e.into())
            }
        }
    }

    /// Rewrite a comment's content, marking it edited
    #[tracing::instrument(skip(self, new_content))]
    pub async fn edit_comment(
        &self,
        message: MessageId,
        comment: CommentId,
        new_content: String,
    ) -> Result<(), EngineError> {
        let key = CommentKey::Confirmed(comment);
        {
            let feed = self.feed.read();
            let author = feed.comment(message, key)?.raw().author;
            self.policy.require_author(author)?;
        }

        let snapshot = self.update_feed(|feed, updates| -> LookupResult<EditSnapshot> {
            let snapshot = {
                let c = feed.comment(message, key)?;
                EditSnapshot {
                    content: c.content().to_string(),
                    edited: c.is_edited(),
                    edited_at: c.edited_at(),
                }
            };
            feed.update_comment(
                message,
                key,
                |c| {
                    c.content = new_content.clone();
                    c.edited = true;
                    c.edited_at = Some(utils::now());
                },
                updates,
            )?;
            Ok(snapshot)
        })?;

        match self.api.edit_comment(comment, &new_content).await {
            Ok(canonical) => {
                self.update_feed(|feed, updates| {
                    feed.update_comment(
                        message,
                        key,
                        |c| {
                            c.content = canonical.content;
                            c.edited = canonical.edited;
                            c.edited_at = canonical.edited_at;
                        },
                        updates,
                    )
                })
                .or_log("Confirming comment edit");
                Ok(())
            }
            Err(e) => {
                self.update_feed(|feed, updates| {
                    feed.update_comment(
                        message,
                        key,
                        |c| {
                            c.content = snapshot.content;
                            c.edited = snapshot.edited;
                            c.edited_at = snapshot.edited_at;
                        },
                        updates,
                    )
                })
                .or_log("Rolling back comment edit");
                Err(e.into())
            }
        }
    }

    /// Remove a message. Removal is immediate and keeps no rollback state;
    /// a rejected delete surfaces an error and the message stays gone
    /// locally until a reload.
    #[tracing::instrument(skip(self))]
    pub async fn delete_message(&self, message: MessageId) -> Result<(), EngineError> {
        let key = MessageKey::Confirmed(message);
        {
            let feed = self.feed.read();
            let author = feed.message(key)?.raw().author;
            self.policy.require_author(author)?;
        }

        if self
            .update_feed(|feed, updates| feed.remove_message(key, updates))
            .is_none()
        {
            tracing::debug!(?message, "Message was already gone locally");
        }

        self.api.delete_message(message).await?;
        Ok(())
    }

    /// Remove a comment and everything nested under it. Same no-rollback
    /// rule as [`delete_message`](Self::delete_message).
    #[tracing::instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        message: MessageId,
        comment: CommentId,
    ) -> Result<(), EngineError> {
        let key = CommentKey::Confirmed(comment);
        {
            let feed = self.feed.read();
            let author = feed.comment(message, key)?.raw().author;
            self.policy.require_author(author)?;
        }

        if self
            .update_feed(|feed, updates| feed.remove_comment(message, key, updates))
            .is_none()
        {
            tracing::debug!(?comment, "Comment was already gone locally");
        }

        self.api.delete_comment(comment).await?;
        Ok(())
    }

    /// Toggle the viewer's reaction on a message or comment.
    ///
    /// The whole prior reaction map is snapshotted for rollback; restoring
    /// a recomputed map could diverge from the true prior state if realtime
    /// events merged while the call was in flight.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_reaction(
        &self,
        target: ReactTarget,
        emoji: Emoji,
    ) -> Result<(), EngineError> {
        let viewer = self.policy.require_viewer()?;

        let snapshot = self.update_feed(|feed, updates| -> LookupResult<state::ReactionSet> {
            match target {
                ReactTarget::Message(id) => {
                    let key = MessageKey::Confirmed(id);
                    let prior = feed.message(key)?.reactions().clone();
                    let mut toggled = prior.clone();
                    toggled.toggle(viewer, emoji);
                    feed.set_message_reactions(key, toggled, updates)?;
                    Ok(prior)
                }
                ReactTarget::Comment { message, comment } => {
                    let key = CommentKey::Confirmed(comment);
                    let prior = feed.comment(message, key)?.reactions().clone();
                    let mut toggled = prior.clone();
                    toggled.toggle(viewer, emoji);
                    feed.set_comment_reactions(message, key, toggled, updates)?;
                    Ok(prior)
                }
            }
        })?;

        match self.api.toggle_reaction(target, emoji).await {
            Ok(outcome) => {
                self.update_feed(|feed, updates| match target {
                    ReactTarget::Message(id) => feed.set_message_reactions(
                        MessageKey::Confirmed(id),
                        outcome.reactions,
                        updates,
                    ),
                    ReactTarget::Comment { message, comment } => feed.set_comment_reactions(
                        message,
                        CommentKey::Confirmed(comment),
                        outcome.reactions,
                        updates,
                    ),
                })
                .or_log("Confirming reaction toggle");
                Ok(())
            }
            Err(e) => {
                self.update_feed(|feed, updates| match target {
                    ReactTarget::Message(id) => {
                        feed.set_message_reactions(MessageKey::Confirmed(id), snapshot, updates)
                    }
                    ReactTarget::Comment { message, comment } => feed.set_comment_reactions(
                        message,
                        CommentKey::Confirmed(comment),
                        snapshot,
                        updates,
                    ),
                })
                .or_log("Rolling back reaction toggle");
                Err(e.into())
            }
        }
    }

    /// Legacy one-way like. The counter is reconciled to the server's
    /// value on confirm.
    #[tracing::instrument(skip(self))]
    pub async fn like_message(&self, message: MessageId) -> Result<(), EngineError> {
        self.policy.require_viewer()?;
        let key = MessageKey::Confirmed(message);

        let snapshot = self.update_feed(|feed, updates| -> LookupResult<u32> {
            let prior = feed.message(key)?.like_count();
            feed.set_like_count(key, prior + 1, updates)?;
            Ok(prior)
        })?;

        match self.api.like_message(message).await {
            Ok(canonical) => {
                self.update_feed(|feed, updates| feed.set_like_count(key, canonical, updates))
                    .or_log("Confirming like");
                Ok(())
            }
            Err(e) => {
                self.update_feed(|feed, updates| feed.set_like_count(key, snapshot, updates))
                    .or_log("Rolling back like");
                Err(e.into())
            }
        }
    }

    /// Pin or unpin a message. Moderator only.
    #[tracing::instrument(skip(self))]
    pub async fn set_pinned(&self, message: MessageId, pinned: bool) -> Result<(), EngineError> {
        self.policy.require_moderator()?;
        let key = MessageKey::Confirmed(message);

        let snapshot = self.update_feed(|feed, updates| -> LookupResult<bool> {
            let prior = feed.message(key)?.is_pinned();
            feed.set_pinned(key, pinned, updates)?;
            Ok(prior)
        })?;

        if let Err(e) = self.api.set_pinned(message, pinned).await {
            self.update_feed(|feed, updates| feed.set_pinned(key, snapshot, updates))
                .or_log("Rolling back pin change");
            return Err(e.into());
        }
        Ok(())
    }

    /// Report a message to the moderators. Nothing changes locally.
    #[tracing::instrument(skip(self, reason))]
    pub async fn report_message(
        &self,
        message: MessageId,
        reason: &str,
    ) -> Result<(), EngineError> {
        self.policy.require_viewer()?;
        self.api.report_message(message, reason).await?;
        Ok(())
    }

    /// Fetch the wall's message page, replacing the local list wholesale.
    /// Returns the number of messages now in the feed.
    #[tracing::instrument(skip(self))]
    pub async fn load_messages(&self) -> Result<usize, EngineError> {
        let wall = self.feed.read().wall().id;
        let fetched = self.api.fetch_messages(wall).await?;
        Ok(self.update_feed(|feed, updates| feed.attach_messages(fetched, updates)))
    }

    /// Fetch and cache a message's comment thread. Returns the number of
    /// comments that survived tree assembly.
    #[tracing::instrument(skip(self))]
    pub async fn load_comments(&self, message: MessageId) -> Result<usize, EngineError> {
        let flat = self.api.fetch_comments(message).await?;
        let count =
            self.update_feed(|feed, updates| feed.attach_comments(message, flat, updates))?;
        Ok(count)
    }
}
