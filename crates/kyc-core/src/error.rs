//! Error types for the onboarding session
//!
//! Provides error handling for:
//! - Configuration loading and validation
//! - Session operations addressing pages, persons, or row groups that do not exist
//! - Failures bubbled up from the form, storage and export crates

use kyc_export::ExportError;
use kyc_forms::{FormKind, PageId, PageListError, RowError};
use kyc_storage::{PositionError, StorageError};
use std::path::PathBuf;

/// Main onboarding error type
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    /// Page list invariant violated
    #[error(transparent)]
    PageList(#[from] PageListError),

    /// Row group mutation failed
    #[error(transparent)]
    Row(#[from] RowError),

    /// Export failed
    #[error("export failed: {0}")]
    Export(#[from] ExportError),

    /// Storage could not be opened
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Position rejected
    #[error("position rejected: {0}")]
    Position(#[from] PositionError),

    /// Configuration invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No form instance for the page
    #[error("no form for page '{0}'")]
    PageNotFound(PageId),

    /// No additional person with that number
    #[error("no additional person #{0}")]
    PersonNotFound(u32),

    /// Operation does not apply to the page's form type
    #[error("page '{page}' holds a {kind} form")]
    WrongForm {
        /// Addressed page
        page: PageId,
        /// Form type it actually holds
        kind: FormKind,
    },

    /// Form has no row group with that name
    #[error("page '{page}' has no row group '{group}'")]
    UnknownRowGroup {
        /// Addressed page
        page: PageId,
        /// Requested group
        group: String,
    },

    /// Accent color outside the palette
    #[error("accent color '{0}' is not in the palette")]
    UnknownAccent(String),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("io error at {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// TOML could not be parsed
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML could not be produced
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of range
    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl ConfigError {
    /// Create IO error with path context
    #[inline]
    #[must_use]
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for session operations
pub type Result<T> = std::result::Result<T, OnboardingError>;
