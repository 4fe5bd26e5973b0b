use serde::{Deserialize, Serialize};

/// Attachment media type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttachmentKind {
    Image,
    Video,
}

/// A media attachment on a message or comment. The upload pipeline lives
/// elsewhere; by the time one of these exists the URL is already servable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub url: String,
    pub filename: String,
}
