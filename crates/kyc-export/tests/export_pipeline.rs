//! Export pipeline against recording surfaces.

use kyc_export::{
    CaptureError, ExportConfig, ExportError, ExportPipeline, CAPTURE_OVERRIDE, DEFAULT_FILENAME,
    PRINT_OVERRIDE,
};
use kyc_test_utils::{
    rendered_page, LogCapture, RecordingPrintSurface, RecordingStyleHost, ScriptedCapture,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

struct Fixture {
    styles: Arc<RecordingStyleHost>,
    capture: Arc<ScriptedCapture>,
    printer: Arc<RecordingPrintSurface>,
    pipeline: ExportPipeline,
}

fn fixture(capture: ScriptedCapture, failing_printer: bool) -> Fixture {
    let styles = Arc::new(RecordingStyleHost::new());
    let capture = Arc::new(capture);
    let mut printer = RecordingPrintSurface::new(Arc::clone(&styles));
    if failing_printer {
        printer = printer.failing();
    }
    let printer = Arc::new(printer);

    let pipeline = ExportPipeline::new(
        ExportConfig::default().without_delays(),
        styles.clone(),
        capture.clone(),
        printer.clone(),
    )
    .expect("default config is valid");

    Fixture {
        styles,
        capture,
        printer,
        pipeline,
    }
}

fn three_pages() -> Vec<kyc_export::RenderedPage> {
    vec![
        rendered_page(0, "auth-1", "Authorized Person 1"),
        rendered_page(1, "wallet-1", "Wallet & Bank Account"),
        rendered_page(2, "lynx-1", "Lynx & API"),
    ]
}

#[tokio::test]
async fn failed_capture_is_skipped_and_style_removed() {
    let f = fixture(ScriptedCapture::new().failing_at(1), false);
    let logs = LogCapture::new();
    let _logging = logs.install();

    let artifact = f.pipeline.download(&three_pages()).await.unwrap();

    assert_eq!(artifact.filename, DEFAULT_FILENAME);
    assert_eq!(artifact.page_count(), 2);
    let exported: Vec<&str> = artifact.exported.iter().map(|p| p.page_id.as_str()).collect();
    assert_eq!(exported, vec!["auth-1", "lynx-1"]);

    assert_eq!(artifact.failures.len(), 1);
    let failure = &artifact.failures[0];
    assert_eq!(failure.index, 1);
    assert_eq!(failure.page_id.as_str(), "wallet-1");
    assert!(matches!(failure.error, CaptureError::Render { .. }));

    let errors = logs.lines_at("ERROR");
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(errors[0].contains("failed to capture form page"));
    assert!(errors[0].contains("page=wallet-1"));

    assert_eq!(f.capture.captured_indices(), vec![0, 1, 2]);
    assert!(f.styles.active_ids().is_empty());
    assert_eq!(
        f.styles.log(),
        vec![
            format!("inject:{}", CAPTURE_OVERRIDE.id),
            format!("remove:{}", CAPTURE_OVERRIDE.id)
        ]
    );
}

#[tokio::test]
async fn captures_use_scale_two_on_white() {
    let f = fixture(ScriptedCapture::new(), false);
    f.pipeline.download(&three_pages()).await.unwrap();

    for options in f.capture.options_seen() {
        assert!((options.scale - 2.0).abs() < f32::EPSILON);
        assert_eq!(options.background.to_hex(), "#FFFFFF");
    }
}

#[tokio::test]
async fn all_failures_yield_error_and_clean_surface() {
    let f = fixture(
        ScriptedCapture::new().failing_at(0).failing_at(1).failing_at(2),
        false,
    );

    let result = f.pipeline.download(&three_pages()).await;
    assert!(matches!(result, Err(ExportError::NothingCaptured { failed: 3 })));
    assert!(f.styles.active_ids().is_empty());
}

#[tokio::test]
async fn print_runs_with_override_then_removes_it() {
    let f = fixture(ScriptedCapture::new(), false);
    f.pipeline.print().await.unwrap();

    assert_eq!(f.printer.print_count(), 1);
    assert_eq!(
        f.printer.styles_at_print(),
        vec![vec![PRINT_OVERRIDE.id.to_string()]]
    );
    assert!(!f.styles.is_active(PRINT_OVERRIDE.id));
}

#[tokio::test]
async fn print_failure_still_removes_override() {
    let f = fixture(ScriptedCapture::new(), true);

    assert!(matches!(f.pipeline.print().await, Err(ExportError::Print(_))));
    assert!(f.styles.active_ids().is_empty());
}

#[tokio::test]
async fn artifact_writes_under_filename() {
    let f = fixture(ScriptedCapture::new().with_size(20, 10), false);
    let artifact = f.pipeline.download(&three_pages()).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = artifact.write_to(dir.path()).unwrap();
    assert_eq!(path, dir.path().join("crypto-finance-forms.pdf"));

    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
}
