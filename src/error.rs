//! @ai:module:intent Define error types for loading and serving kata content
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for all kata store operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Schema violation: missing field, wrong type, or a solutions/blank-count mismatch.
    #[error("Malformed content in {origin} at {location}: {message}")]
    Malformed {
        origin: String,
        location: String,
        message: String,
    },

    #[error("No {what} at index {index} (count {count})")]
    NotFound {
        what: String,
        index: usize,
        count: usize,
    },

    #[error("Expected {expected} answers, got {found}")]
    AnswerCount { expected: usize, found: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to write configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// @ai:intent Build a Malformed error from displayable parts
    /// @ai:effects pure
    pub fn malformed(
        origin: impl Into<String>,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Malformed {
            origin: origin.into(),
            location: location.into(),
            message: message.into(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::Malformed { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
