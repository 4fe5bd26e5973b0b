//! Shared fixtures for the search tests

use std::sync::Arc;

use async_trait::async_trait;

use line_network::id::{ObjectIdGenerator, UserId, WallId};
use line_search::directory::{
    ChatDirectory, MessageDirectory, SearchDirectory, TagDirectory, UserDirectory, WallDirectory,
};
use line_search::errors::DirectoryError;
use line_search::records::{ChatRecord, MessageRecord, TagRecord, UserRecord, WallRecord};
use line_search::{GlobalSearch, SearchConfig, Suggestions};

/// A directory backed by plain vectors. It over-returns on purpose: every
/// record comes back for every query, leaving the filtering and scoring
/// entirely to the code under test.
#[derive(Default)]
pub struct InMemoryDirectory {
    pub walls: Vec<WallRecord>,
    pub messages: Vec<MessageRecord>,
    pub users: Vec<UserRecord>,
    pub tags: Vec<TagRecord>,
    pub chats: Vec<ChatRecord>,
}

#[async_trait]
impl WallDirectory for InMemoryDirectory {
    async fn search_walls(&self, _query: &str) -> Result<Vec<WallRecord>, DirectoryError> {
        Ok(self.walls.clone())
    }
}

#[async_trait]
impl MessageDirectory for InMemoryDirectory {
    async fn search_messages(&self, _query: &str) -> Result<Vec<MessageRecord>, DirectoryError> {
        Ok(self.messages.clone())
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn search_users(&self, _query: &str) -> Result<Vec<UserRecord>, DirectoryError> {
        Ok(self.users.clone())
    }
}

#[async_trait]
impl TagDirectory for InMemoryDirectory {
    async fn search_tags(&self, _query: &str) -> Result<Vec<TagRecord>, DirectoryError> {
        Ok(self.tags.clone())
    }
}

#[async_trait]
impl ChatDirectory for InMemoryDirectory {
    async fn search_chats(
        &self,
        _query: &str,
        _viewer: UserId,
    ) -> Result<Vec<ChatRecord>, DirectoryError> {
        Ok(self.chats.clone())
    }
}

impl SearchDirectory for InMemoryDirectory {}

/// A directory whose backing store is down
pub struct BrokenDirectory;

#[async_trait]
impl WallDirectory for BrokenDirectory {
    async fn search_walls(&self, _query: &str) -> Result<Vec<WallRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("wall index offline".to_string()))
    }
}

#[async_trait]
impl MessageDirectory for BrokenDirectory {
    async fn search_messages(&self, _query: &str) -> Result<Vec<MessageRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable(
            "message index offline".to_string(),
        ))
    }
}

#[async_trait]
impl UserDirectory for BrokenDirectory {
    async fn search_users(&self, _query: &str) -> Result<Vec<UserRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("user index offline".to_string()))
    }
}

#[async_trait]
impl TagDirectory for BrokenDirectory {
    async fn search_tags(&self, _query: &str) -> Result<Vec<TagRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("tag index offline".to_string()))
    }
}

#[async_trait]
impl ChatDirectory for BrokenDirectory {
    async fn search_chats(
        &self,
        _query: &str,
        _viewer: UserId,
    ) -> Result<Vec<ChatRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("chat index offline".to_string()))
    }
}

impl SearchDirectory for BrokenDirectory {}

pub fn engine(directory: impl SearchDirectory + 'static) -> GlobalSearch {
    GlobalSearch::new(Arc::new(directory), SearchConfig::new())
}

pub fn suggester(directory: impl SearchDirectory + 'static) -> Suggestions {
    Suggestions::new(Arc::new(directory), SearchConfig::new())
}

pub fn wall(ids: &ObjectIdGenerator, name: &str) -> WallRecord {
    WallRecord {
        id: ids.next_wall(),
        name: name.to_string(),
        description: String::new(),
        tags: Vec::new(),
        category: None,
        is_public: true,
        is_active: true,
        created_at: 0,
        member_count: 0,
    }
}

pub fn message(ids: &ObjectIdGenerator, wall: WallId, content: &str) -> MessageRecord {
    MessageRecord {
        id: ids.next_message(),
        wall,
        content: content.to_string(),
        tags: Vec::new(),
        wall_is_public: true,
        category: None,
        deleted: false,
        created_at: 0,
        like_count: 0,
    }
}

pub fn user(ids: &ObjectIdGenerator, name: &str) -> UserRecord {
    UserRecord {
        id: ids.next_user(),
        name: name.to_string(),
        username: name.to_string(),
        bio: String::new(),
        skills: Vec::new(),
        avatar: None,
        created_at: 0,
        follower_count: 0,
    }
}

pub fn tag(ids: &ObjectIdGenerator, name: &str) -> TagRecord {
    TagRecord {
        id: ids.next_tag(),
        name: name.to_string(),
        description: String::new(),
        aliases: Vec::new(),
        usage_count: 0,
        created_at: 0,
    }
}

pub fn chat(ids: &ObjectIdGenerator, name: &str, participants: Vec<UserId>) -> ChatRecord {
    ChatRecord {
        id: ids.next_chat(),
        name: name.to_string(),
        description: String::new(),
        participants,
        created_at: 0,
        message_count: 0,
    }
}
