use thiserror::Error;

/// Errors surfaced by a backing directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory unavailable: {0}")]
    Unavailable(String),
    #[error("directory query failed: {0}")]
    QueryFailed(String),
}

/// Errors surfaced by a search or suggestion run.
///
/// `QueryTooShort` maps to a 400 at the transport boundary; everything
/// else is a 5xx.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("query must be at least {} characters", crate::request::MIN_QUERY_LEN)]
    QueryTooShort,
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),
}
