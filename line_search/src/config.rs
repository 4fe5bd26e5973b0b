//! Search behaviour configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::{fs::File, io::Read, path::Path, path::PathBuf};

/// Tunable limits for the search surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Page size used when the request does not carry a limit
    #[serde(default = "SearchConfig::default_default_limit")]
    pub default_limit: u32,
    /// Hard ceiling on any requested page size
    #[serde(default = "SearchConfig::default_max_limit")]
    pub max_limit: u32,
    /// Number of entries in a suggestions dropdown
    #[serde(default = "SearchConfig::default_suggestion_limit")]
    pub suggestion_limit: u32,
}

/// Errors that could happen when loading or processing a config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error on {1}: {0}")]
    IoError(std::io::Error, PathBuf),
    #[error("Parse error in {1}: {0}")]
    ParseError(json5::Error, PathBuf),
}

impl SearchConfig {
    pub fn new() -> Self {
        Self {
            default_limit: Self::default_default_limit(),
            max_limit: Self::default_max_limit(),
            suggestion_limit: Self::default_suggestion_limit(),
        }
    }

    fn default_default_limit() -> u32 {
        20
    }

    fn default_max_limit() -> u32 {
        100
    }

    fn default_suggestion_limit() -> u32 {
        8
    }

    /// Load the search configuration from a given file path
    pub fn load_file<P: AsRef<Path> + Copy>(filename: P) -> Result<Self, ConfigError> {
        let mut file = File::open(filename)
            .map_err(|e| ConfigError::IoError(e, filename.as_ref().to_owned()))?;
        let mut config = String::new();
        file.read_to_string(&mut config)
            .map_err(|e| ConfigError::IoError(e, filename.as_ref().to_owned()))?;
        json5::from_str(&config).map_err(|e| ConfigError::ParseError(e, filename.as_ref().to_owned()))
    }
}
