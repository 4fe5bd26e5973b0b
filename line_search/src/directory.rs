//! Directory traits implemented by the surrounding server.
//!
//! Each trait covers one searchable collection. Directories may over-return;
//! the aggregator re-checks visibility and computes scores itself, so a
//! backing store is free to return anything the query text loosely matches.

use async_trait::async_trait;

use line_network::id::UserId;

use crate::errors::DirectoryError;
use crate::records::{ChatRecord, MessageRecord, TagRecord, UserRecord, WallRecord};

#[async_trait]
pub trait WallDirectory: Send + Sync {
    async fn search_walls(&self, query: &str) -> Result<Vec<WallRecord>, DirectoryError>;
}

#[async_trait]
pub trait MessageDirectory: Send + Sync {
    async fn search_messages(&self, query: &str) -> Result<Vec<MessageRecord>, DirectoryError>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn search_users(&self, query: &str) -> Result<Vec<UserRecord>, DirectoryError>;
}

#[async_trait]
pub trait TagDirectory: Send + Sync {
    async fn search_tags(&self, query: &str) -> Result<Vec<TagRecord>, DirectoryError>;
}

#[async_trait]
pub trait ChatDirectory: Send + Sync {
    /// Chat lookups get the viewer because chats are only ever visible to
    /// their participants; a directory may pre-filter on it or leave the
    /// filtering to the aggregator.
    async fn search_chats(
        &self,
        query: &str,
        viewer: UserId,
    ) -> Result<Vec<ChatRecord>, DirectoryError>;
}

/// Everything the global search needs from a server, in one object
pub trait SearchDirectory:
    WallDirectory + MessageDirectory + UserDirectory + TagDirectory + ChatDirectory
{
}
