//! Error types for form state
//!
//! Provides error handling for:
//! - Page list structure (minimum-one-page invariant)
//! - Row group mutations (unknown rows or capability flags)

use crate::page::PageId;
use crate::rows::RowId;

/// Page list errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageListError {
    /// Removing the only remaining page
    #[error("you must keep at least one form page")]
    LastPage,

    /// Page id not in the active list
    #[error("page not found: {0}")]
    NotFound(PageId),

    /// A page list cannot start empty
    #[error("page list cannot be empty")]
    Empty,
}

/// Row group errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    /// Row id not in the targeted list
    #[error("row not found: {0}")]
    RowNotFound(RowId),

    /// Capability flag not part of the group's rights schema
    #[error("unknown capability flag '{flag}' for schema '{schema}'")]
    UnknownFlag {
        /// Schema name
        schema: String,
        /// Requested flag key
        flag: String,
    },

    /// View-only granted together with other rights
    #[error("view-only cannot be combined with other rights: {0}")]
    InconsistentRights(String),

    /// Rights set on a group without a rights schema
    #[error("row group '{0}' carries no capability rights")]
    NoRightsSchema(String),
}
