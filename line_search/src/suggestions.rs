//! Typeahead suggestions.
//!
//! A trimmed-down search over walls, users and tags only, returning display
//! text instead of full records. Scoring is [`relevance_score`], the same
//! function the results page ranks with, so an entry's position in the
//! dropdown predicts its position in the full results.

use std::cmp::Ordering;
use std::sync::Arc;

use itertools::Itertools;
use serde::Serialize;

use crate::config::SearchConfig;
use crate::directory::SearchDirectory;
use crate::entity::EntityKind;
use crate::errors::SearchError;
use crate::records::Searchable;
use crate::relevance::relevance_score;
use crate::request::MIN_QUERY_LEN;

/// One dropdown entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub score: f64,
    pub popularity: u32,
}

pub struct Suggestions {
    directory: Arc<dyn SearchDirectory>,
    config: SearchConfig,
}

impl Suggestions {
    pub fn new(directory: Arc<dyn SearchDirectory>, config: SearchConfig) -> Self {
        Self { directory, config }
    }

    /// Exact matches rank first because they score 100 and nothing below a
    /// prefix match can reach that; popularity breaks ties.
    #[tracing::instrument(skip_all, fields(q = %q))]
    pub async fn run(&self, q: &str, limit: Option<u32>) -> Result<Vec<Suggestion>, SearchError> {
        let q = q.trim();
        // Below the minimum the dropdown simply stays empty
        if q.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }

        let (walls, users, tags) = futures::join!(
            self.directory.search_walls(q),
            self.directory.search_users(q),
            self.directory.search_tags(q),
        );
        let walls = walls?;
        let users = users?;
        let tags = tags?;

        let mut candidates = Vec::new();
        candidates.extend(
            walls
                .iter()
                .filter(|wall| wall.is_public && wall.is_active)
                .filter_map(|wall| suggest(q, wall)),
        );
        candidates.extend(users.iter().filter_map(|user| suggest(q, user)));
        candidates.extend(tags.iter().filter_map(|tag| suggest(q, tag)));

        let limit = limit
            .unwrap_or(self.config.suggestion_limit)
            .min(self.config.max_limit) as usize;

        // Sorting before deduplication keeps the best-ranked of any
        // duplicate pair
        Ok(candidates
            .into_iter()
            .sorted_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| b.popularity.cmp(&a.popularity))
            })
            .unique_by(|s| (s.kind, s.text.clone()))
            .take(limit)
            .collect())
    }
}

fn suggest(query: &str, record: &impl Searchable) -> Option<Suggestion> {
    let score = relevance_score(query, &record.fields());
    if score > 0.0 {
        Some(Suggestion {
            kind: record.kind(),
            text: record.display_text().to_string(),
            icon: record.icon(),
            score,
            popularity: record.popularity(),
        })
    } else {
        None
    }
}
