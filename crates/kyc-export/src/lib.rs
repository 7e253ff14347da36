//! KYC Export
//!
//! Turns the rendered onboarding document into a printout or a paged PDF.
//!
//! # Core Concepts
//!
//! - [`PageCapture`]: Async seam that rasterizes one rendered form page
//! - [`StyleHost`] / [`StyleGuard`]: Transient stylesheet overrides, removed on drop
//! - [`PrintSurface`]: Platform print dialog
//! - [`fit_to_page`]: Width-first fit of a capture onto an A4 page
//! - [`PdfDocument`]: One image per page
//! - [`ExportPipeline`]: Sequential capture with per-page failure isolation
//!
//! # Example
//!
//! ```rust
//! use kyc_export::{fit_to_page, PageSize};
//!
//! let placement = fit_to_page(1000, 2000, PageSize::A4);
//! assert_eq!(placement.height_mm, 297.0);
//! assert_eq!(placement.y_mm, 0.0);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod capture;
pub mod error;
pub mod layout;
pub mod pdf;
pub mod pipeline;
pub mod print;
pub mod raster;
pub mod style;

// Re-exports
pub use capture::{PageCapture, RenderedPage};
pub use error::{CaptureError, ExportError};
pub use layout::{fit_to_page, PageSize, Placement, POINTS_PER_MM};
pub use pdf::PdfDocument;
pub use pipeline::{CaptureFailure, ExportArtifact, ExportConfig, ExportPipeline, DEFAULT_FILENAME};
pub use print::PrintSurface;
pub use raster::{CaptureOptions, RasterImage, Rgb};
pub use style::{StyleGuard, StyleHost, StyleOverride, CAPTURE_OVERRIDE, PRINT_OVERRIDE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
