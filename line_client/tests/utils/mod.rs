use line_client::policy::SessionPolicy;
use line_client::FeedSession;
use line_network::feed::config::FeedConfig;
use line_network::feed::event::details;
use line_network::prelude::*;

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

pub mod stub_api;
pub mod stub_connection;

pub use stub_api::{StubApi, CANONICAL_TS};
pub use stub_connection::StubConnection;

/// Who the harness signs the session in as
#[derive(Clone, Copy)]
pub enum Role {
    Anonymous,
    Member,
    Moderator,
}

/// A connected session plus handles to everything scripted around it
pub struct TestHarness {
    pub session: Arc<FeedSession>,
    pub api: Arc<StubApi>,
    /// Feeds the session's single realtime subscription; dropping it ends
    /// the stream
    pub events: UnboundedSender<WallEvent>,
    pub updates: UnboundedReceiver<FeedStateChange>,
    pub ids: ObjectIdGenerator,
    pub viewer: UserId,
    pub wall: WallId,
}

pub async fn connect_session(role: Role) -> TestHarness {
    let ids = ObjectIdGenerator::new(ServerId::new(1));
    let viewer = ids.next_user();
    let wall = state::Wall {
        id: ids.next_wall(),
        name: "integration wall".to_string(),
        description: String::new(),
        category: None,
        tags: Vec::new(),
        is_public: true,
        is_active: true,
    };
    let wall_id = wall.id;

    let policy = match role {
        Role::Anonymous => SessionPolicy::anonymous(),
        Role::Member => SessionPolicy::new(Some(viewer), false),
        Role::Moderator => SessionPolicy::new(Some(viewer), true),
    };

    let api = Arc::new(StubApi::new(viewer));
    let (events, connection) = StubConnection::new();
    let (updates_tx, updates) = unbounded_channel();

    let session = FeedSession::connect(
        wall,
        policy,
        FeedConfig { max_reply_depth: 3 },
        api.clone(),
        Box::new(connection),
        updates_tx,
    )
    .await
    .expect("stub connection should subscribe");

    TestHarness {
        session: Arc::new(session),
        api,
        events,
        updates,
        ids,
        viewer,
        wall: wall_id,
    }
}

impl TestHarness {
    /// Collect every state change notified so far
    pub fn drain(&mut self) -> Vec<FeedStateChange> {
        drain(&mut self.updates)
    }

    /// The id of the only message in the feed, which must be confirmed
    pub fn only_message(&self) -> MessageId {
        let feed = self.session.feed();
        let mut ids = feed.messages().map(|m| m.id());
        let only = ids.next().expect("feed should hold a message");
        assert!(ids.next().is_none(), "feed should hold exactly one message");
        only.confirmed().expect("message should be confirmed")
    }

    /// An author snapshot carrying the signed-in viewer's id
    pub fn viewer_record(&self) -> state::User {
        state::User {
            id: self.viewer,
            name: "me".to_string(),
            username: Username::from_str("me").unwrap(),
            avatar: None,
        }
    }

    /// Deliver a realtime event announcing a message posted by someone
    /// else, returning its id
    pub fn deliver_foreign_message(&self, name: &str, content: &str) -> MessageId {
        let poster = author(&self.ids, name);
        let id = self.ids.next_message();
        self.session.apply_realtime_event(event(
            &self.ids,
            self.wall,
            id,
            details::NewMessage {
                message: message_record(id, self.wall, &poster, content),
                author: poster,
            },
        ));
        id
    }
}

pub fn drain(updates: &mut UnboundedReceiver<FeedStateChange>) -> Vec<FeedStateChange> {
    let mut out = Vec::new();
    while let Ok(update) = updates.try_recv() {
        out.push(update);
    }
    out
}

pub fn emoji(s: &str) -> Emoji {
    Emoji::from_str(s).unwrap()
}

pub fn author(ids: &ObjectIdGenerator, name: &str) -> state::User {
    state::User {
        id: ids.next_user(),
        name: name.to_string(),
        username: Username::from_str(name).unwrap(),
        avatar: None,
    }
}

pub fn message_record(
    id: MessageId,
    wall: WallId,
    author: &state::User,
    content: &str,
) -> state::Message {
    state::Message {
        id: MessageKey::Confirmed(id),
        wall,
        author: author.id,
        content: content.to_string(),
        ts: 0,
        attachments: Vec::new(),
        tags: Vec::new(),
        reactions: state::ReactionSet::new(),
        my_reaction: None,
        like_count: 0,
        reply_count: 0,
        pinned: false,
        edited: false,
        edited_at: None,
    }
}

pub fn comment_record(
    id: CommentId,
    message: MessageId,
    parent: ParentRef,
    author: &state::User,
    content: &str,
) -> state::Comment {
    state::Comment {
        id: CommentKey::Confirmed(id),
        message,
        parent,
        author: author.id,
        content: content.to_string(),
        ts: 0,
        attachments: Vec::new(),
        reactions: state::ReactionSet::new(),
        my_reaction: None,
        edited: false,
        edited_at: None,
    }
}

pub fn event(
    ids: &ObjectIdGenerator,
    wall: WallId,
    target: impl Into<ObjectId>,
    details: impl Into<EventDetails>,
) -> WallEvent {
    WallEvent {
        id: ids.next_event(),
        timestamp: 0,
        wall,
        target: target.into(),
        details: details.into(),
    }
}

pub fn stringify<T: Serialize>(obj: &T) -> String {
    serde_json::to_string(obj).unwrap()
}
