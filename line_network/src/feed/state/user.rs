use crate::prelude::*;

use serde::{Deserialize, Serialize};

/// An author snapshot, as bundled with canonical records and events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: Username,
    pub avatar: Option<String>,
}
