use line_client::api::{ApiError, MessageApi, ReactionOutcome};
use line_network::prelude::*;

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// The timestamp the stub stamps on every canonical record it fabricates.
/// Distinct from anything the optimistic path produces, so tests can tell
/// a canonical replacement from a local guess.
pub const CANONICAL_TS: i64 = 1_700_000_000;

/// Scripted stand-in for the backend.
///
/// Canonical responses are fabricated from the requests; server-side
/// aggregates (reactions, likes) are simulated so confirm payloads are
/// self-consistent. `fail_next` makes exactly one following call fail,
/// which is how the rollback paths come up in tests.
pub struct StubApi {
    ids: ObjectIdGenerator,
    viewer: UserId,
    fail_next: Mutex<bool>,
    calls: Mutex<Vec<&'static str>>,
    message_page: Mutex<Vec<state::Message>>,
    comment_pages: Mutex<HashMap<MessageId, Vec<state::Comment>>>,
    reactions: Mutex<HashMap<ReactTarget, state::ReactionSet>>,
    likes: Mutex<HashMap<MessageId, u32>>,
    reports: Mutex<Vec<(MessageId, String)>>,
}

impl StubApi {
    pub fn new(viewer: UserId) -> Self {
        Self {
            ids: ObjectIdGenerator::new(ServerId::new(9)),
            viewer,
            fail_next: Mutex::new(false),
            calls: Mutex::new(Vec::new()),
            message_page: Mutex::new(Vec::new()),
            comment_pages: Mutex::new(HashMap::new()),
            reactions: Mutex::new(HashMap::new()),
            likes: Mutex::new(HashMap::new()),
            reports: Mutex::new(Vec::new()),
        }
    }

    /// Make the next call fail with a rejection
    pub fn fail_next(&self) {
        *self.fail_next.lock() = true;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    pub fn reports(&self) -> Vec<(MessageId, String)> {
        self.reports.lock().clone()
    }

    pub fn set_message_page(&self, messages: Vec<state::Message>) {
        *self.message_page.lock() = messages;
    }

    pub fn set_comment_page(&self, message: MessageId, comments: Vec<state::Comment>) {
        self.comment_pages.lock().insert(message, comments);
    }

    /// Pre-load the simulated server-side like counter
    pub fn seed_likes(&self, message: MessageId, count: u32) {
        self.likes.lock().insert(message, count);
    }

    /// Pre-load the simulated server-side reaction aggregate
    pub fn seed_reactions(&self, target: ReactTarget, set: state::ReactionSet) {
        self.reactions.lock().insert(target, set);
    }

    fn called(&self, name: &'static str) {
        self.calls.lock().push(name);
    }

    fn maybe_fail(&self) -> Result<(), ApiError> {
        if std::mem::take(&mut *self.fail_next.lock()) {
            Err(ApiError::Rejected("scripted failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MessageApi for StubApi {
    async fn fetch_messages(&self, _wall: WallId) -> Result<Vec<state::Message>, ApiError> {
        self.called("fetch_messages");
        self.maybe_fail()?;
        Ok(self.message_page.lock().clone())
    }

    async fn fetch_comments(&self, message: MessageId) -> Result<Vec<state::Comment>, ApiError> {
        self.called("fetch_comments");
        self.maybe_fail()?;
        Ok(self
            .comment_pages
            .lock()
            .get(&message)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_message(
        &self,
        wall: WallId,
        draft: &state::MessageDraft,
    ) -> Result<state::Message, ApiError> {
        self.called("create_message");
        self.maybe_fail()?;
        Ok(state::Message {
            id: MessageKey::Confirmed(self.ids.next_message()),
            wall,
            author: self.viewer,
            content: draft.content.clone(),
            ts: CANONICAL_TS,
            attachments: draft.attachments.clone(),
            tags: draft.tags.clone(),
            reactions: state::ReactionSet::new(),
            my_reaction: None,
            like_count: 0,
            reply_count: 0,
            pinned: false,
            edited: false,
            edited_at: None,
        })
    }

    async fn create_comment(
        &self,
        message: MessageId,
        draft: &state::CommentDraft,
    ) -> Result<state::Comment, ApiError> {
        self.called("create_comment");
        self.maybe_fail()?;
        let parent = match draft.parent {
            Some(parent) => ParentRef::Comment(parent),
            None => ParentRef::Message(message),
        };
        Ok(state::Comment {
            id: CommentKey::Confirmed(self.ids.next_comment()),
            message,
            parent,
            author: self.viewer,
            content: draft.content.clone(),
            ts: CANONICAL_TS,
            attachments: draft.attachments.clone(),
            reactions: state::ReactionSet::new(),
            my_reaction: None,
            edited: false,
            edited_at: None,
        })
    }

    async fn edit_message(
        &self,
        message: MessageId,
        content: &str,
    ) -> Result<state::Message, ApiError> {
        self.called("edit_message");
        self.maybe_fail()?;
        // Only the content fields matter to the caller; the rest is filler
        Ok(state::Message {
            id: MessageKey::Confirmed(message),
            wall: self.ids.next_wall(),
            author: self.viewer,
            content: content.to_string(),
            ts: CANONICAL_TS,
            attachments: Vec::new(),
            tags: Vec::new(),
            reactions: state::ReactionSet::new(),
            my_reaction: None,
            like_count: 0,
            reply_count: 0,
            pinned: false,
            edited: true,
            edited_at: Some(CANONICAL_TS),
        })
    }

    async fn edit_comment(
        &self,
        comment: CommentId,
        content: &str,
    ) -> Result<state::Comment, ApiError> {
        self.called("edit_comment");
        self.maybe_fail()?;
        Ok(state::Comment {
            id: CommentKey::Confirmed(comment),
            message: self.ids.next_message(),
            parent: ParentRef::Message(self.ids.next_message()),
            author: self.viewer,
            content: content.to_string(),
            ts: CANONICAL_TS,
            attachments: Vec::new(),
            reactions: state::ReactionSet::new(),
            my_reaction: None,
            edited: true,
            edited_at: Some(CANONICAL_TS),
        })
    }

    async fn delete_message(&self, _message: MessageId) -> Result<(), ApiError> {
        self.called("delete_message");
        self.maybe_fail()
    }

    async fn delete_comment(&self, _comment: CommentId) -> Result<(), ApiError> {
        self.called("delete_comment");
        self.maybe_fail()
    }

    async fn toggle_reaction(
        &self,
        target: ReactTarget,
        emoji: Emoji,
    ) -> Result<ReactionOutcome, ApiError> {
        self.called("toggle_reaction");
        self.maybe_fail()?;
        let mut aggregates = self.reactions.lock();
        let set = aggregates.entry(target).or_default();
        let my_reaction = set.toggle(self.viewer, emoji);
        Ok(ReactionOutcome {
            reactions: set.clone(),
            my_reaction,
        })
    }

    async fn like_message(&self, message: MessageId) -> Result<u32, ApiError> {
        self.called("like_message");
        self.maybe_fail()?;
        let mut likes = self.likes.lock();
        let count = likes.entry(message).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn set_pinned(&self, _message: MessageId, _pinned: bool) -> Result<(), ApiError> {
        self.called("set_pinned");
        self.maybe_fail()
    }

    async fn report_message(&self, message: MessageId, reason: &str) -> Result<(), ApiError> {
        self.called("report_message");
        self.maybe_fail()?;
        self.reports.lock().push((message, reason.to_string()));
        Ok(())
    }
}
