use line_network::feed::config::FeedConfig;
use line_network::prelude::*;
use serde::Serialize;

pub mod receiver;

pub fn empty_feed_config() -> FeedConfig {
    FeedConfig { max_reply_depth: 3 }
}

pub fn empty_feed(id_gen: &ObjectIdGenerator) -> Feed {
    let wall = state::Wall {
        id: id_gen.next_wall(),
        name: "wall".to_string(),
        description: String::new(),
        category: None,
        tags: Vec::new(),
        is_public: true,
        is_active: true,
    };
    Feed::new(wall, None, empty_feed_config())
}

pub fn author(id_gen: &ObjectIdGenerator, name: &str) -> state::User {
    state::User {
        id: id_gen.next_user(),
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
    id_gen: &ObjectIdGenerator,
    wall: WallId,
    target: impl Into<ObjectId>,
    details: impl Into<EventDetails>,
) -> WallEvent {
    WallEvent {
        id: id_gen.next_event(),
        timestamp: 0,
        wall,
        target: target.into(),
        details: details.into(),
    }
}

pub fn stringify<T: Serialize>(obj: &T) -> String {
    serde_json::to_string(obj).unwrap()
}
