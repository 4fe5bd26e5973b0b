//! The per-message comment forest.
//!
//! One tree is cached per wall message and shared by everything that touches
//! comments: initial load, optimistic mutations, and realtime merges. All
//! lookups and mutations funnel through the recursive walkers defined here,
//! so there is exactly one traversal implementation to audit.

use crate::feed::state;
use crate::prelude::*;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One comment plus its nested replies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentNode {
    pub comment: state::Comment,
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    pub fn new(comment: state::Comment) -> Self {
        Self {
            comment,
            children: Vec::new(),
        }
    }
}

/// A node removed from the tree, along with where it sat
#[derive(Debug)]
pub struct DetachedComment {
    pub node: CommentNode,
    /// Whether the node was a direct reply to the message (as opposed to a
    /// nested reply). Root-level removals are the ones that adjust the
    /// message's reply counter.
    pub root_level: bool,
}

/// The comment forest for a single wall message.
///
/// Sibling order is the order the server returned the comments in (or, for
/// optimistic inserts, local creation order); nothing here ever re-sorts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentTree {
    roots: Vec<CommentNode>,
}

impl CommentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the forest for `root` from a flat comment list.
    ///
    /// Comments whose parent is the message become top-level nodes; comments
    /// whose parent comment appears anywhere in the input attach beneath it.
    /// A comment whose parent is missing from the input is dropped (never
    /// promoted to top level), as are its descendants. Input order is
    /// preserved within every sibling group, and the same input always
    /// produces the same tree.
    pub fn build(root: MessageId, flat: Vec<state::Comment>) -> Self {
        let known: HashSet<CommentId> = flat
            .iter()
            .filter_map(|comment| comment.id.confirmed())
            .collect();

        let mut records: HashMap<CommentId, state::Comment> = HashMap::new();
        let mut children_of: HashMap<CommentId, Vec<CommentId>> = HashMap::new();
        let mut top_level: Vec<CommentId> = Vec::new();

        for comment in flat {
            let Some(id) = comment.id.confirmed() else {
                tracing::warn!(key = ?comment.id, "Dropping unconfirmed comment from thread load");
                continue;
            };

            match comment.parent {
                ParentRef::Message(m) => {
                    if m != root {
                        tracing::warn!(comment = ?id, message = ?m, "Dropping comment attached to another message");
                        continue;
                    }
                    top_level.push(id);
                }
                ParentRef::Comment(p) => {
                    if known.contains(&p) {
                        children_of.entry(p).or_default().push(id);
                    } else {
                        tracing::warn!(comment = ?id, parent = ?p, "Dropping orphaned comment");
                        continue;
                    }
                }
            }

            records.insert(id, comment);
        }

        let roots = top_level
            .into_iter()
            .filter_map(|id| Self::assemble(id, &mut records, &mut children_of))
            .collect();

        Self { roots }
    }

    fn assemble(
        id: CommentId,
        records: &mut HashMap<CommentId, state::Comment>,
        children_of: &mut HashMap<CommentId, Vec<CommentId>>,
    ) -> Option<CommentNode> {
        let comment = records.remove(&id)?;
        let children = children_of
            .remove(&id)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|child| Self::assemble(child, records, children_of))
            .collect();
        Some(CommentNode { comment, children })
    }

    pub fn roots(&self) -> &[CommentNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total node count, including nested replies
    pub fn len(&self) -> usize {
        fn count(nodes: &[CommentNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.roots)
    }

    /// Find a node anywhere in the forest
    pub fn find(&self, key: &CommentKey) -> Option<&CommentNode> {
        Self::walk(&self.roots, key)
    }

    /// Apply a transform to the node with the given key, if present.
    ///
    /// This is the single mutation path for everything that changes a node
    /// in place: edits, confirmations and reaction replacements all go
    /// through here.
    pub fn update_node<R>(
        &mut self,
        key: &CommentKey,
        f: impl FnOnce(&mut CommentNode) -> R,
    ) -> Option<R> {
        Self::walk_mut(&mut self.roots, key).map(f)
    }

    /// Append a node under its parent, preserving sibling order.
    ///
    /// Returns whether the node was inserted at the top level. Fails when
    /// the parent comment isn't in this tree.
    pub fn insert(&mut self, node: CommentNode) -> LookupResult<bool> {
        match node.comment.parent {
            ParentRef::Message(_) => {
                self.roots.push(node);
                Ok(true)
            }
            ParentRef::Comment(p) => {
                let parent_key = CommentKey::Confirmed(p);
                match Self::walk_mut(&mut self.roots, &parent_key) {
                    Some(parent) => {
                        parent.children.push(node);
                        Ok(false)
                    }
                    None => Err(LookupError::NoSuchComment(parent_key)),
                }
            }
        }
    }

    /// Remove a node and its subtree
    pub fn detach(&mut self, key: &CommentKey) -> Option<DetachedComment> {
        if let Some(pos) = self.roots.iter().position(|n| n.comment.id == *key) {
            return Some(DetachedComment {
                node: self.roots.remove(pos),
                root_level: true,
            });
        }

        Self::detach_nested(&mut self.roots, key).map(|node| DetachedComment {
            node,
            root_level: false,
        })
    }

    /// Nesting level of a node: top-level comments are depth 1
    pub fn depth_of(&self, key: &CommentKey) -> Option<usize> {
        fn depth_in(nodes: &[CommentNode], key: &CommentKey, level: usize) -> Option<usize> {
            for node in nodes {
                if node.comment.id == *key {
                    return Some(level);
                }
                if let Some(found) = depth_in(&node.children, key, level + 1) {
                    return Some(found);
                }
            }
            None
        }
        depth_in(&self.roots, key, 1)
    }

    fn walk<'a>(nodes: &'a [CommentNode], key: &CommentKey) -> Option<&'a CommentNode> {
        for node in nodes {
            if node.comment.id == *key {
                return Some(node);
            }
            if let Some(found) = Self::walk(&node.children, key) {
                return Some(found);
            }
        }
        None
    }

    fn walk_mut<'a>(
        nodes: &'a mut [CommentNode],
        key: &CommentKey,
    ) -> Option<&'a mut CommentNode> {
        for node in nodes.iter_mut() {
            if node.comment.id == *key {
                return Some(node);
            }
            if let Some(found) = Self::walk_mut(&mut node.children, key) {
                return Some(found);
            }
        }
        None
    }

    fn detach_nested(nodes: &mut Vec<CommentNode>, key: &CommentKey) -> Option<CommentNode> {
        for node in nodes.iter_mut() {
            if let Some(pos) = node.children.iter().position(|n| n.comment.id == *key) {
                return Some(node.children.remove(pos));
            }
            if let Some(found) = Self::detach_nested(&mut node.children, key) {
                return Some(found);
            }
        }
        None
    }
}
