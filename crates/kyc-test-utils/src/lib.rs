//! Testing utilities for the KYC forms workspace
//!
//! Shared fakes for the rendering surfaces and storage, log capture, plus
//! fixtures.

#![allow(missing_docs)]

use async_trait::async_trait;
use kyc_export::{
    CaptureError, CaptureOptions, ExportError, PageCapture, PrintSurface, RasterImage,
    RenderedPage, Rgb, StyleHost,
};
use kyc_forms::{SequentialIdSource, SharedIdSource};
use kyc_storage::{ListRepository, StorageError};
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

/// Capture surface that fails on chosen document positions
#[derive(Debug)]
pub struct ScriptedCapture {
    failing: BTreeSet<usize>,
    size: (u32, u32),
    calls: Mutex<Vec<(usize, CaptureOptions)>>,
}

impl ScriptedCapture {
    pub fn new() -> Self {
        Self {
            failing: BTreeSet::new(),
            size: (8, 12),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_at(mut self, index: usize) -> Self {
        self.failing.insert(index);
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Indices captured so far, in call order
    pub fn captured_indices(&self) -> Vec<usize> {
        self.calls.lock().iter().map(|(i, _)| *i).collect()
    }

    pub fn options_seen(&self) -> Vec<CaptureOptions> {
        self.calls.lock().iter().map(|(_, o)| *o).collect()
    }
}

impl Default for ScriptedCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageCapture for ScriptedCapture {
    async fn capture(
        &self,
        page: &RenderedPage,
        options: &CaptureOptions,
    ) -> Result<RasterImage, CaptureError> {
        self.calls.lock().push((page.index, *options));
        if self.failing.contains(&page.index) {
            return Err(CaptureError::render(page.page_id.as_str(), "scripted failure"));
        }
        // Shade encodes the index so pages are distinguishable
        let shade = u8::try_from(page.index % 256).unwrap_or(0);
        RasterImage::filled(self.size.0, self.size.1, Rgb(shade, shade, shade))
    }
}

/// Style host that records what is currently injected
#[derive(Debug, Default)]
pub struct RecordingStyleHost {
    active: Mutex<BTreeMap<String, String>>,
    log: Mutex<Vec<String>>,
}

impl RecordingStyleHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_ids(&self) -> Vec<String> {
        self.active.lock().keys().cloned().collect()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.lock().contains_key(id)
    }

    /// `inject:<id>` / `remove:<id>` entries in call order
    pub fn log(&self) -> Vec<String> {
        self.log.lock().clone()
    }
}

impl StyleHost for RecordingStyleHost {
    fn inject(&self, id: &str, css: &str) {
        self.active.lock().insert(id.to_string(), css.to_string());
        self.log.lock().push(format!("inject:{id}"));
    }

    fn remove(&self, id: &str) -> bool {
        self.log.lock().push(format!("remove:{id}"));
        self.active.lock().remove(id).is_some()
    }
}

/// Print surface that counts calls and snapshots injected styles
#[derive(Debug)]
pub struct RecordingPrintSurface {
    styles: Arc<RecordingStyleHost>,
    fail: bool,
    printed_with: Mutex<Vec<Vec<String>>>,
}

impl RecordingPrintSurface {
    pub fn new(styles: Arc<RecordingStyleHost>) -> Self {
        Self {
            styles,
            fail: false,
            printed_with: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn print_count(&self) -> usize {
        self.printed_with.lock().len()
    }

    /// Style ids active at each print call
    pub fn styles_at_print(&self) -> Vec<Vec<String>> {
        self.printed_with.lock().clone()
    }
}

impl PrintSurface for RecordingPrintSurface {
    fn print(&self) -> Result<(), ExportError> {
        self.printed_with.lock().push(self.styles.active_ids());
        if self.fail {
            return Err(ExportError::Print("printer offline".into()));
        }
        Ok(())
    }
}

/// Repository whose every operation fails
#[derive(Debug, Default)]
pub struct FailingRepository;

impl ListRepository for FailingRepository {
    fn get(&self, _key: &str) -> Result<Vec<String>, StorageError> {
        Err(StorageError::Unavailable("read refused".into()))
    }

    fn put(&self, _key: &str, _values: &[String]) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("write refused".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("write refused".into()))
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Err(StorageError::Unavailable("listing refused".into()))
    }
}

/// In-memory log sink for asserting on emitted events
///
/// Install it with [`LogCapture::install`]; the subscriber stays active on
/// the current thread until the returned guard drops.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    /// Lines logged at `level` (e.g. `"ERROR"`)
    pub fn lines_at(&self, level: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.trim_start().starts_with(level))
            .map(str::to_string)
            .collect()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
        self.buf.lock().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Deterministic ids: `{namespace}-1`, `{namespace}-2`, ...
pub fn sequential_ids() -> SharedIdSource {
    SequentialIdSource::shared()
}

pub fn rendered_page(index: usize, id: &str, label: &str) -> RenderedPage {
    RenderedPage {
        index,
        page_id: id.into(),
        kind: kyc_forms::FormKind::WalletBank,
        label: label.to_string(),
        person_number: None,
    }
}
