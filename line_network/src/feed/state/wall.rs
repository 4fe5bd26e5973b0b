use crate::prelude::*;

use serde::{Deserialize, Serialize};

/// A topic wall that messages are posted to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall {
    pub id: WallId,
    pub name: String,
    pub description: String,
    pub category: Option<String>,
    pub tags: Vec<TagName>,
    pub is_public: bool,
    pub is_active: bool,
}
