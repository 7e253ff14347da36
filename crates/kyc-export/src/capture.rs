//! Rendering surface seam for page captures

use crate::error::CaptureError;
use crate::raster::{CaptureOptions, RasterImage};
use async_trait::async_trait;
use kyc_forms::{FormKind, PageId};
use serde::Serialize;

/// One form instance as it appears in the rendered document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    /// Zero-based position in the document
    pub index: usize,
    /// Page the instance belongs to
    pub page_id: PageId,
    /// Form type
    pub kind: FormKind,
    /// Display label, e.g. "Person 3"
    pub label: String,
    /// Person number for person-like forms
    pub person_number: Option<u32>,
}

/// Turns a rendered form page into pixels
#[async_trait]
pub trait PageCapture: Send + Sync {
    /// Capture one page
    ///
    /// # Errors
    /// `CaptureError` if the surface cannot render the page
    async fn capture(
        &self,
        page: &RenderedPage,
        options: &CaptureOptions,
    ) -> Result<RasterImage, CaptureError>;
}
