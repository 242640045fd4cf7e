use std::path::PathBuf;

use thiserror::Error;

/// Failures at the edges of the engine: parsing caller input, reading config,
/// serving HTTP. Scoring itself never fails.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("invalid media type: {0}")]
    InvalidMediaType(String),

    #[error("invalid emoji usage (expected never, rarely, often or always): {0}")]
    InvalidEmojiUsage(String),

    #[error("invalid timestamp (expected YYYY-MM-DDTHH:MM[:SS]): {0}")]
    InvalidTimestamp(String),

    #[error("missing post text: pass --text or pipe stdin")]
    MissingText,

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to write config {path}: {reason}")]
    ConfigWrite { path: PathBuf, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, ScoreError>;
