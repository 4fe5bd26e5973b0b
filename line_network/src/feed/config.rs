//! Feed behaviour configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::{fs::File, io::Read, path::Path, path::PathBuf};

/// Tunable limits for a wall feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Maximum comment nesting level accepted by the client engine; a
    /// top-level comment is depth 1. Events from the server are applied
    /// regardless of depth.
    #[serde(default = "FeedConfig::default_max_reply_depth")]
    pub max_reply_depth: usize,
}

/// Errors that could happen when loading or processing a config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error on {1}: {0}")]
    IoError(std::io::Error, PathBuf),
    #[error("Parse error in {1}: {0}")]
    ParseError(json5::Error, PathBuf),
}

impl FeedConfig {
    pub fn new() -> Self {
        Self {
            max_reply_depth: Self::default_max_reply_depth(),
        }
    }

    fn default_max_reply_depth() -> usize {
        3
    }

    /// Load the feed configuration from a given file path
    pub fn load_file<P: AsRef<Path> + Copy>(filename: P) -> Result<Self, ConfigError> {
        let mut file = File::open(filename)
            .map_err(|e| ConfigError::IoError(e, filename.as_ref().to_owned()))?;
        let mut config = String::new();
        file.read_to_string(&mut config)
            .map_err(|e| ConfigError::IoError(e, filename.as_ref().to_owned()))?;
        json5::from_str(&config).map_err(|e| ConfigError::ParseError(e, filename.as_ref().to_owned()))
    }
}
