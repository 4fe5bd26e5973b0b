use crate::prelude::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The set of users who picked one particular emoji on one target
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionBucket {
    pub users: Vec<UserId>,
}

impl ReactionBucket {
    /// The displayed count is always derived from the member list
    pub fn count(&self) -> usize {
        self.users.len()
    }
}

/// Per-target reaction aggregate, keyed by emoji.
///
/// Invariant: any given user id appears in at most one bucket, and no
/// bucket is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionSet(HashMap<Emoji, ReactionBucket>);

impl ReactionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The emoji the given user currently has on this target, if any
    pub fn reaction_of(&self, user: UserId) -> Option<Emoji> {
        self.0
            .iter()
            .find(|(_, bucket)| bucket.users.contains(&user))
            .map(|(emoji, _)| *emoji)
    }

    pub fn count(&self, emoji: &Emoji) -> usize {
        self.0.get(emoji).map(ReactionBucket::count).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Emoji, &ReactionBucket)> {
        self.0.iter()
    }

    /// Total reactions across all buckets
    pub fn total(&self) -> usize {
        self.0.values().map(ReactionBucket::count).sum()
    }

    /// Toggle `user`'s reaction to `chosen`, returning the user's resulting
    /// reaction.
    ///
    /// The steps happen in a fixed order: the user's old reaction, if any, is
    /// removed first and its bucket dropped once empty; if the old and new
    /// emoji were the same the toggle stops there (a plain un-react);
    /// otherwise the user joins the chosen bucket, creating it if needed.
    pub fn toggle(&mut self, user: UserId, chosen: Emoji) -> Option<Emoji> {
        let previous = self.reaction_of(user);

        if let Some(prev) = &previous {
            if let Some(bucket) = self.0.get_mut(prev) {
                bucket.users.retain(|u| *u != user);
                if bucket.users.is_empty() {
                    self.0.remove(prev);
                }
            }
        }

        if previous.as_ref() == Some(&chosen) {
            return None;
        }

        self.0.entry(chosen).or_default().users.push(user);
        Some(chosen)
    }
}
