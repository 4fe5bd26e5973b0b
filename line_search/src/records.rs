//! Denormalised search records.
//!
//! Directories hand these back instead of live state objects; each record
//! carries everything the aggregator needs to filter, score and rank a hit
//! without another lookup.

use serde::{Deserialize, Serialize};

use line_network::id::{ChatId, MessageId, TagId, UserId, WallId};

use crate::entity::EntityKind;

/// Common view of a search record, independent of its entity type.
///
/// `fields` drives scoring; each entry is matched against the query
/// separately, so a tag or skill listed on its own can score as an exact
/// match. `popularity` breaks relevance ties.
pub trait Searchable {
    fn kind(&self) -> EntityKind;
    fn fields(&self) -> Vec<String>;
    fn created_at(&self) -> i64;
    fn popularity(&self) -> u32;
    fn display_text(&self) -> &str;
    fn icon(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallRecord {
    pub id: WallId,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub is_public: bool,
    pub is_active: bool,
    pub created_at: i64,
    pub member_count: u32,
}

impl Searchable for WallRecord {
    fn kind(&self) -> EntityKind {
        EntityKind::Wall
    }

    fn fields(&self) -> Vec<String> {
        let mut fields = vec![self.name.clone(), self.description.clone()];
        fields.extend(self.tags.iter().cloned());
        fields
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn popularity(&self) -> u32 {
        self.member_count
    }

    fn display_text(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: MessageId,
    pub wall: WallId,
    pub content: String,
    pub tags: Vec<String>,
    /// Visibility of the containing wall, carried on the record so the
    /// aggregator can filter without a wall lookup
    pub wall_is_public: bool,
    /// Category of the containing wall
    pub category: Option<String>,
    pub deleted: bool,
    pub created_at: i64,
    pub like_count: u32,
}

impl Searchable for MessageRecord {
    fn kind(&self) -> EntityKind {
        EntityKind::Message
    }

    fn fields(&self) -> Vec<String> {
        let mut fields = vec![self.content.clone()];
        fields.extend(self.tags.iter().cloned());
        fields
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn popularity(&self) -> u32 {
        self.like_count
    }

    fn display_text(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub bio: String,
    pub skills: Vec<String>,
    pub avatar: Option<String>,
    pub created_at: i64,
    pub follower_count: u32,
}

impl Searchable for UserRecord {
    fn kind(&self) -> EntityKind {
        EntityKind::User
    }

    fn fields(&self) -> Vec<String> {
        let mut fields = vec![self.name.clone(), self.username.clone(), self.bio.clone()];
        fields.extend(self.skills.iter().cloned());
        fields
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn popularity(&self) -> u32 {
        self.follower_count
    }

    fn display_text(&self) -> &str {
        &self.name
    }

    fn icon(&self) -> Option<String> {
        self.avatar.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: TagId,
    pub name: String,
    pub description: String,
    pub aliases: Vec<String>,
    pub usage_count: u32,
    pub created_at: i64,
}

impl Searchable for TagRecord {
    fn kind(&self) -> EntityKind {
        EntityKind::Tag
    }

    fn fields(&self) -> Vec<String> {
        let mut fields = vec![self.name.clone(), self.description.clone()];
        fields.extend(self.aliases.iter().cloned());
        fields
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn popularity(&self) -> u32 {
        self.usage_count
    }

    fn display_text(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: ChatId,
    pub name: String,
    pub description: String,
    pub participants: Vec<UserId>,
    pub created_at: i64,
    pub message_count: u32,
}

impl Searchable for ChatRecord {
    fn kind(&self) -> EntityKind {
        EntityKind::Chat
    }

    fn fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.description.clone()]
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn popularity(&self) -> u32 {
        self.message_count
    }

    fn display_text(&self) -> &str {
        &self.name
    }
}

/// A record of any entity type, used for the combined result list.
///
/// Serialises as the inner record's own shape; the entity tag lives on the
/// surrounding [`Scored`](crate::aggregator::Scored) wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyRecord {
    Wall(WallRecord),
    Message(MessageRecord),
    User(UserRecord),
    Tag(TagRecord),
    Chat(ChatRecord),
}

impl From<WallRecord> for AnyRecord {
    fn from(record: WallRecord) -> Self {
        Self::Wall(record)
    }
}

impl From<MessageRecord> for AnyRecord {
    fn from(record: MessageRecord) -> Self {
        Self::Message(record)
    }
}

impl From<UserRecord> for AnyRecord {
    fn from(record: UserRecord) -> Self {
        Self::User(record)
    }
}

impl From<TagRecord> for AnyRecord {
    fn from(record: TagRecord) -> Self {
        Self::Tag(record)
    }
}

impl From<ChatRecord> for AnyRecord {
    fn from(record: ChatRecord) -> Self {
        Self::Chat(record)
    }
}

impl Searchable for AnyRecord {
    fn kind(&self) -> EntityKind {
        match self {
            Self::Wall(r) => r.kind(),
            Self::Message(r) => r.kind(),
            Self::User(r) => r.kind(),
            Self::Tag(r) => r.kind(),
            Self::Chat(r) => r.kind(),
        }
    }

    fn fields(&self) -> Vec<String> {
        match self {
            Self::Wall(r) => r.fields(),
            Self::Message(r) => r.fields(),
            Self::User(r) => r.fields(),
            Self::Tag(r) => r.fields(),
            Self::Chat(r) => r.fields(),
        }
    }

    fn created_at(&self) -> i64 {
        match self {
            Self::Wall(r) => r.created_at(),
            Self::Message(r) => r.created_at(),
            Self::User(r) => r.created_at(),
            Self::Tag(r) => r.created_at(),
            Self::Chat(r) => r.created_at(),
        }
    }

    fn popularity(&self) -> u32 {
        match self {
            Self::Wall(r) => r.popularity(),
            Self::Message(r) => r.popularity(),
            Self::User(r) => r.popularity(),
            Self::Tag(r) => r.popularity(),
            Self::Chat(r) => r.popularity(),
        }
    }

    fn display_text(&self) -> &str {
        match self {
            Self::Wall(r) => r.display_text(),
            Self::Message(r) => r.display_text(),
            Self::User(r) => r.display_text(),
            Self::Tag(r) => r.display_text(),
            Self::Chat(r) => r.display_text(),
        }
    }

    fn icon(&self) -> Option<String> {
        match self {
            Self::Wall(r) => r.icon(),
            Self::Message(r) => r.icon(),
            Self::User(r) => r.icon(),
            Self::Tag(r) => r.icon(),
            Self::Chat(r) => r.icon(),
        }
    }
}
