//! Print and download export
//!
//! Both modes wrap the rendering surface in a [`StyleGuard`] for the whole
//! operation. Downloads capture pages strictly one after another; a page that
//! fails to capture is logged, recorded on the artifact and left out.

use crate::capture::{PageCapture, RenderedPage};
use crate::error::{CaptureError, ExportError};
use crate::layout::{fit_to_page, PageSize};
use crate::pdf::PdfDocument;
use crate::print::PrintSurface;
use crate::raster::CaptureOptions;
use crate::style::{StyleGuard, StyleHost, CAPTURE_OVERRIDE, PRINT_OVERRIDE};
use kyc_forms::PageId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Filename offered for downloaded documents
pub const DEFAULT_FILENAME: &str = "crypto-finance-forms.pdf";

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Filename of the downloaded document
    pub filename: String,
    /// Wait before a download starts, letting overlays close
    pub settle_delay_ms: u64,
    /// Wait after injecting the capture override
    pub style_delay_ms: u64,
    /// Wait between injecting the print override and printing
    pub print_delay_ms: u64,
    /// Page size of the downloaded document
    pub page_size: PageSize,
    /// Options passed to every capture
    pub capture: CaptureOptions,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_string(),
            settle_delay_ms: 300,
            style_delay_ms: 100,
            print_delay_ms: 100,
            page_size: PageSize::A4,
            capture: CaptureOptions::default(),
        }
    }
}

impl ExportConfig {
    /// Same settings without any waits
    #[must_use]
    pub fn without_delays(mut self) -> Self {
        self.settle_delay_ms = 0;
        self.style_delay_ms = 0;
        self.print_delay_ms = 0;
        self
    }

    /// Check settings are usable
    ///
    /// # Errors
    /// `ExportError::InvalidConfig` on an empty filename, a filename with a
    /// path separator, a non-positive scale or a degenerate page size
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.filename.trim().is_empty() {
            return Err(ExportError::InvalidConfig("filename is empty".into()));
        }
        if self.filename.contains(['/', '\\']) {
            return Err(ExportError::InvalidConfig(format!(
                "filename '{}' must not contain a path",
                self.filename
            )));
        }
        if !self.capture.scale.is_finite() || self.capture.scale <= 0.0 {
            return Err(ExportError::InvalidConfig(format!(
                "capture scale must be positive, got {}",
                self.capture.scale
            )));
        }
        if !self.page_size.is_valid() {
            return Err(ExportError::InvalidConfig(format!(
                "page size {}x{} mm is not usable",
                self.page_size.width_mm, self.page_size.height_mm
            )));
        }
        Ok(())
    }
}

/// A page left out of a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureFailure {
    /// Position in the rendered document
    pub index: usize,
    /// Page the instance belongs to
    pub page_id: PageId,
    /// Display label
    pub label: String,
    /// Why the capture failed
    pub error: CaptureError,
}

/// Result of a download
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Filename to offer the document under
    pub filename: String,
    /// The assembled document
    pub document: PdfDocument,
    /// Rendered pages that made it into the document, in order
    pub exported: Vec<RenderedPage>,
    /// Rendered pages that were skipped
    pub failures: Vec<CaptureFailure>,
}

impl ExportArtifact {
    /// Number of pages in the document
    #[inline]
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    /// Save the document as `dir/filename`
    ///
    /// # Errors
    /// `ExportError::Io` if the file cannot be written
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = dir.as_ref().join(&self.filename);
        self.document.save(&path)?;
        tracing::info!(path = %path.display(), pages = self.page_count(), "saved document");
        Ok(path)
    }
}

/// Drives the rendering surface through print and download
pub struct ExportPipeline {
    config: ExportConfig,
    styles: Arc<dyn StyleHost>,
    capture: Arc<dyn PageCapture>,
    printer: Arc<dyn PrintSurface>,
}

impl ExportPipeline {
    /// Create pipeline over the given surfaces
    ///
    /// # Errors
    /// `ExportError::InvalidConfig` if `config` fails validation
    pub fn new(
        config: ExportConfig,
        styles: Arc<dyn StyleHost>,
        capture: Arc<dyn PageCapture>,
        printer: Arc<dyn PrintSurface>,
    ) -> Result<Self, ExportError> {
        config.validate()?;
        Ok(Self {
            config,
            styles,
            capture,
            printer,
        })
    }

    /// Active settings
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Print the document with input chrome hidden
    ///
    /// # Errors
    /// `ExportError::Print` if the print surface fails; the override is
    /// removed either way
    pub async fn print(&self) -> Result<(), ExportError> {
        let _guard = StyleGuard::apply(self.styles.as_ref(), &PRINT_OVERRIDE);
        pause(self.config.print_delay_ms).await;
        self.printer.print()?;
        tracing::info!("print dialog completed");
        Ok(())
    }

    /// Capture `pages` in order into one document
    ///
    /// # Errors
    /// `ExportError::NothingCaptured` if every capture failed
    pub async fn download(&self, pages: &[RenderedPage]) -> Result<ExportArtifact, ExportError> {
        let started = Instant::now();
        pause(self.config.settle_delay_ms).await;

        let guard = StyleGuard::apply(self.styles.as_ref(), &CAPTURE_OVERRIDE);
        pause(self.config.style_delay_ms).await;

        let mut document = PdfDocument::new(self.config.page_size).with_title("Client Onboarding Forms");
        let mut exported = Vec::with_capacity(pages.len());
        let mut failures = Vec::new();

        for page in pages {
            match self.capture.capture(page, &self.config.capture).await {
                Ok(image) => {
                    let placement = fit_to_page(image.width(), image.height(), self.config.page_size);
                    tracing::debug!(
                        page = %page.page_id,
                        index = page.index,
                        width = image.width(),
                        height = image.height(),
                        "captured form page"
                    );
                    document.add_image_page(image, placement);
                    exported.push(page.clone());
                }
                Err(error) => {
                    tracing::error!(
                        page = %page.page_id,
                        index = page.index,
                        label = %page.label,
                        error = %error,
                        "failed to capture form page, skipping"
                    );
                    failures.push(CaptureFailure {
                        index: page.index,
                        page_id: page.page_id.clone(),
                        label: page.label.clone(),
                        error,
                    });
                }
            }
        }
        drop(guard);

        if document.is_empty() {
            return Err(ExportError::NothingCaptured {
                failed: failures.len(),
            });
        }

        tracing::info!(
            pages = document.page_count(),
            failed = failures.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "export complete"
        );

        Ok(ExportArtifact {
            filename: self.config.filename.clone(),
            document,
            exported,
            failures,
        })
    }
}

async fn pause(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}
