//! The global search aggregator

use std::cmp::Ordering;
use std::sync::Arc;

use serde::Serialize;

use line_network::id::UserId;

use crate::config::SearchConfig;
use crate::directory::SearchDirectory;
use crate::entity::EntityKind;
use crate::errors::SearchError;
use crate::records::{
    AnyRecord, ChatRecord, MessageRecord, Searchable, TagRecord, UserRecord, WallRecord,
};
use crate::relevance::relevance_score;
use crate::request::{SearchQuery, SearchRequest, SortBy};

/// A search hit: one record tagged with its entity kind and score
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scored<R> {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub relevance_score: f64,
    #[serde(flatten)]
    pub record: R,
}

impl<R: Into<AnyRecord>> Scored<R> {
    fn into_any(self) -> Scored<AnyRecord> {
        Scored {
            kind: self.kind,
            relevance_score: self.relevance_score,
            record: self.record.into(),
        }
    }
}

/// Everything one search run returns
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub walls: Vec<Scored<WallRecord>>,
    pub messages: Vec<Scored<MessageRecord>>,
    pub users: Vec<Scored<UserRecord>>,
    pub tags: Vec<Scored<TagRecord>>,
    pub chats: Vec<Scored<ChatRecord>>,
    /// Cross-type ranking; populated only for relevance sorts
    pub combined: Vec<Scored<AnyRecord>>,
    /// Total matches across all types, counted before pagination
    pub total: usize,
}

/// Fans one query out across the entity directories and merges the hits
/// into ranked, paginated result lists.
pub struct GlobalSearch {
    directory: Arc<dyn SearchDirectory>,
    config: SearchConfig,
}

impl GlobalSearch {
    pub fn new(directory: Arc<dyn SearchDirectory>, config: SearchConfig) -> Self {
        Self { directory, config }
    }

    #[tracing::instrument(skip_all, fields(q = %request.q))]
    pub async fn run(
        &self,
        request: SearchRequest,
        viewer: Option<UserId>,
    ) -> Result<SearchResults, SearchError> {
        let query = request.validate(&self.config)?;

        let (walls, messages, users, tags, chats) = futures::join!(
            self.scored_walls(&query),
            self.scored_messages(&query),
            self.scored_users(&query),
            self.scored_tags(&query),
            self.scored_chats(&query, viewer),
        );
        let mut walls = walls?;
        let mut messages = messages?;
        let mut users = users?;
        let mut tags = tags?;
        let mut chats = chats?;

        let total = walls.len() + messages.len() + users.len() + tags.len() + chats.len();

        sort_hits(&mut walls, query.sort_by);
        sort_hits(&mut messages, query.sort_by);
        sort_hits(&mut users, query.sort_by);
        sort_hits(&mut tags, query.sort_by);
        sort_hits(&mut chats, query.sort_by);

        let combined = match query.sort_by {
            SortBy::Relevance => {
                let mut combined: Vec<Scored<AnyRecord>> = Vec::with_capacity(total);
                combined.extend(walls.iter().cloned().map(Scored::into_any));
                combined.extend(messages.iter().cloned().map(Scored::into_any));
                combined.extend(users.iter().cloned().map(Scored::into_any));
                combined.extend(tags.iter().cloned().map(Scored::into_any));
                combined.extend(chats.iter().cloned().map(Scored::into_any));
                sort_hits(&mut combined, SortBy::Relevance);
                paginate(combined, &query)
            }
            SortBy::Date => Vec::new(),
        };

        let results = SearchResults {
            walls: paginate(walls, &query),
            messages: paginate(messages, &query),
            users: paginate(users, &query),
            tags: paginate(tags, &query),
            chats: paginate(chats, &query),
            combined,
            total,
        };

        tracing::debug!(total = results.total, "search complete");

        Ok(results)
    }

    async fn scored_walls(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<Scored<WallRecord>>, SearchError> {
        if !query.include.includes(EntityKind::Wall) {
            return Ok(Vec::new());
        }
        let hits = self.directory.search_walls(&query.q).await?;
        Ok(hits
            .into_iter()
            .filter(|wall| wall.is_public && wall.is_active)
            .filter(|wall| query.matches_category(wall.category.as_deref()))
            .filter(|wall| query.matches_date(wall.created_at))
            .filter_map(|wall| scored(&query.q, wall))
            .collect())
    }

    async fn scored_messages(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<Scored<MessageRecord>>, SearchError> {
        if !query.include.includes(EntityKind::Message) {
            return Ok(Vec::new());
        }
        let hits = self.directory.search_messages(&query.q).await?;
        Ok(hits
            .into_iter()
            .filter(|message| message.wall_is_public && !message.deleted)
            .filter(|message| query.matches_category(message.category.as_deref()))
            .filter(|message| query.matches_date(message.created_at))
            .filter_map(|message| scored(&query.q, message))
            .collect())
    }

    async fn scored_users(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<Scored<UserRecord>>, SearchError> {
        if !query.include.includes(EntityKind::User) {
            return Ok(Vec::new());
        }
        let hits = self.directory.search_users(&query.q).await?;
        Ok(hits
            .into_iter()
            .filter(|user| query.matches_date(user.created_at))
            .filter_map(|user| scored(&query.q, user))
            .collect())
    }

    async fn scored_tags(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<Scored<TagRecord>>, SearchError> {
        if !query.include.includes(EntityKind::Tag) {
            return Ok(Vec::new());
        }
        let hits = self.directory.search_tags(&query.q).await?;
        Ok(hits
            .into_iter()
            .filter(|tag| query.matches_date(tag.created_at))
            .filter_map(|tag| scored(&query.q, tag))
            .collect())
    }

    async fn scored_chats(
        &self,
        query: &SearchQuery,
        viewer: Option<UserId>,
    ) -> Result<Vec<Scored<ChatRecord>>, SearchError> {
        if !query.include.includes(EntityKind::Chat) {
            return Ok(Vec::new());
        }
        // Chats are never searchable anonymously
        let viewer = match viewer {
            Some(viewer) => viewer,
            None => return Ok(Vec::new()),
        };
        let hits = self.directory.search_chats(&query.q, viewer).await?;
        Ok(hits
            .into_iter()
            .filter(|chat| chat.participants.contains(&viewer))
            .filter(|chat| query.matches_date(chat.created_at))
            .filter_map(|chat| scored(&query.q, chat))
            .collect())
    }
}

/// Score one record; hits that score zero are not hits at all
fn scored<R: Searchable>(query: &str, record: R) -> Option<Scored<R>> {
    let score = relevance_score(query, &record.fields());
    if score > 0.0 {
        Some(Scored {
            kind: record.kind(),
            relevance_score: score,
            record,
        })
    } else {
        None
    }
}

fn sort_hits<R: Searchable>(hits: &mut [Scored<R>], sort_by: SortBy) {
    match sort_by {
        SortBy::Relevance => hits.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.record.popularity().cmp(&a.record.popularity()))
        }),
        SortBy::Date => hits.sort_by(|a, b| b.record.created_at().cmp(&a.record.created_at())),
    }
}

fn paginate<T>(hits: Vec<T>, query: &SearchQuery) -> Vec<T> {
    hits.into_iter()
        .skip((query.page - 1) * query.limit)
        .take(query.limit)
        .collect()
}
