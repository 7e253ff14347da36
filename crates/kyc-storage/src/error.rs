//! Error types for durable storage
//!
//! Provides error handling for:
//! - Repository reads and writes (I/O, encoding)
//! - Position registry mutations that are rejected

use std::path::PathBuf;

/// Errors raised by a [`ListRepository`](crate::ListRepository)
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// IO error on a file-backed key
    #[error("io error on {path}: {source}")]
    Io {
        /// File behind the key
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Stored text is not a JSON list of strings
    #[error("malformed list under '{key}': {source}")]
    Malformed {
        /// Key whose content failed to parse
        key: String,
        /// Parse error
        #[source]
        source: serde_json::Error,
    },

    /// Key cannot be mapped onto the backing store
    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),

    /// Backing store refused the operation (quota, closed handle)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create malformed-content error for key
    pub fn malformed(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Malformed {
            key: key.into(),
            source,
        }
    }
}

/// Reasons a position cannot be added
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// Input was empty after trimming
    #[error("position is empty")]
    Empty,

    /// Position already present (built-in or custom)
    #[error("position already exists: '{0}'")]
    Duplicate(String),
}
