//! Error types for export
//!
//! Capture errors are per page and never abort a download; export errors
//! end the whole operation.

use std::path::PathBuf;

/// Failure to turn one form page into pixels
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    /// The rendering surface failed
    #[error("failed to render page '{page}': {reason}")]
    Render {
        /// Page id
        page: String,
        /// Surface-provided reason
        reason: String,
    },

    /// Pixel buffer does not match its dimensions
    #[error("invalid raster {width}x{height} with {len} bytes")]
    InvalidImage {
        /// Claimed width in pixels
        width: u32,
        /// Claimed height in pixels
        height: u32,
        /// Actual buffer length
        len: usize,
    },
}

impl CaptureError {
    /// Create render error
    #[inline]
    #[must_use]
    pub fn render(page: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Render {
            page: page.into(),
            reason: reason.into(),
        }
    }
}

/// Export operation errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Writing the document failed
    #[error("io error at {path}: {source}")]
    Io {
        /// Target path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The print surface failed
    #[error("print failed: {0}")]
    Print(String),

    /// Every page capture failed
    #[error("no page could be captured ({failed} failures)")]
    NothingCaptured {
        /// Number of failed captures
        failed: usize,
    },

    /// Export settings are unusable
    #[error("invalid export configuration: {0}")]
    InvalidConfig(String),
}

impl ExportError {
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
