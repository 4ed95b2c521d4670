//! Error types for pathfix

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for pathfix operations
#[derive(Debug, Error)]
pub enum PathfixError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to load {path}: {reason}")]
    LoadError { path: PathBuf, reason: String },

    #[error("Failed to save {path}: {reason}")]
    SaveError { path: PathBuf, reason: String },

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("Invalid config value for {field}: {value}")]
    InvalidConfig { field: String, value: String },
}

/// Result type alias for pathfix operations
pub type Result<T> = std::result::Result<T, PathfixError>;

impl From<toml::de::Error> for PathfixError {
    fn from(err: toml::de::Error) -> Self {
        PathfixError::ConfigParseError(err.to_string())
    }
}
