//! Wire shape and validation of a search request

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::entity::EntityKind;
use crate::errors::SearchError;

/// Queries shorter than this (in characters, after trimming) are rejected
pub const MIN_QUERY_LEN: usize = 2;

/// Result ordering requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Relevance,
    Date,
}

impl Default for SortBy {
    fn default() -> Self {
        Self::Relevance
    }
}

/// Which entity collections a request fans out to.
///
/// On the wire this is the string `"all"` or a comma-separated list of
/// kind names, singular or plural (`"walls,tags"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntitySelection {
    All,
    Only(Vec<EntityKind>),
}

impl EntitySelection {
    pub fn includes(&self, kind: EntityKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(kinds) => kinds.contains(&kind),
        }
    }
}

impl Default for EntitySelection {
    fn default() -> Self {
        Self::All
    }
}

impl FromStr for EntitySelection {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        let kinds = s
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(EntityKind::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        if kinds.is_empty() {
            Ok(Self::All)
        } else {
            Ok(Self::Only(kinds))
        }
    }
}

impl Serialize for EntitySelection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::All => serializer.serialize_str("all"),
            Self::Only(kinds) => {
                let names: Vec<_> = kinds.iter().map(ToString::to_string).collect();
                serializer.serialize_str(&names.join(","))
            }
        }
    }
}

impl<'de> Deserialize<'de> for EntitySelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A search request as it arrives from a client.
///
/// Everything except the query text is optional; [`validate`] folds the
/// optional parts down to a [`SearchQuery`] the aggregator can run.
///
/// [`validate`]: Self::validate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub q: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub date_from: Option<i64>,
    #[serde(default)]
    pub date_to: Option<i64>,
    #[serde(default)]
    pub include_entities: EntitySelection,
}

impl SearchRequest {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            category: None,
            limit: None,
            page: None,
            sort_by: SortBy::default(),
            date_from: None,
            date_to: None,
            include_entities: EntitySelection::default(),
        }
    }

    /// Check the query text and clamp the paging parameters.
    ///
    /// The query is trimmed first; the two-character minimum counts
    /// characters, not bytes.
    pub fn validate(self, config: &SearchConfig) -> Result<SearchQuery, SearchError> {
        let q = self.q.trim().to_string();
        if q.chars().count() < MIN_QUERY_LEN {
            return Err(SearchError::QueryTooShort);
        }

        let limit = self
            .limit
            .unwrap_or(config.default_limit)
            .min(config.max_limit)
            .max(1) as usize;
        let page = self.page.unwrap_or(1).max(1) as usize;

        Ok(SearchQuery {
            q,
            category: self.category,
            limit,
            page,
            sort_by: self.sort_by,
            date_from: self.date_from,
            date_to: self.date_to,
            include: self.include_entities,
        })
    }
}

/// A validated, normalised search request
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub q: String,
    pub category: Option<String>,
    pub limit: usize,
    pub page: usize,
    pub sort_by: SortBy,
    pub date_from: Option<i64>,
    pub date_to: Option<i64>,
    pub include: EntitySelection,
}

impl SearchQuery {
    /// True when a record with the given category passes the request's
    /// category filter. No filter passes everything.
    pub fn matches_category(&self, category: Option<&str>) -> bool {
        match &self.category {
            None => true,
            Some(wanted) => category.map_or(false, |c| c.eq_ignore_ascii_case(wanted)),
        }
    }

    /// True when a creation timestamp falls inside the requested date
    /// range. Bounds are inclusive.
    pub fn matches_date(&self, created_at: i64) -> bool {
        self.date_from.map_or(true, |from| created_at >= from)
            && self.date_to.map_or(true, |to| created_at <= to)
    }
}
