//! Federated search for KolTech Line.
//!
//! One query fans out across five entity collections (walls, messages,
//! users, tags, chats), each behind a directory trait implemented by the
//! surrounding server. Hits are filtered for visibility, scored by one
//! shared relevance function, ranked per type and across types, and
//! paginated. The lighter suggestions surface reuses the exact same
//! scoring, so the dropdown and the results page never disagree about
//! ranking.

pub mod aggregator;
pub mod config;
pub mod directory;
pub mod entity;
pub mod errors;
pub mod records;
pub mod relevance;
pub mod request;
pub mod suggestions;

pub use aggregator::{GlobalSearch, Scored, SearchResults};
pub use config::SearchConfig;
pub use entity::EntityKind;
pub use errors::{DirectoryError, SearchError};
pub use request::{EntitySelection, SearchRequest, SortBy};
pub use suggestions::{Suggestion, Suggestions};
