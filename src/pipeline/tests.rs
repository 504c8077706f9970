//! End-to-end tick tests over a real temporary directory, with the broker
//! replaced by an in-memory [`RequestSink`] recorder.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::headers::{Headers, FILE_NAME, MESSAGE_KIND};
use crate::messaging::{PublisherError, RequestSink};
use crate::metrics::Metrics;
use crate::model::ProductionRequest;
use crate::pipeline::{run_tick, FilePoller};

// ── Test sink ──────────────────────────────────────────────────────────────────

/// Records every publish; optionally fails them all.
#[derive(Default)]
struct RecorderSink {
    published: Mutex<Vec<(ProductionRequest, Headers)>>,
    fail: bool,
}

impl RecorderSink {
    fn failing() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn take(&self) -> Vec<(ProductionRequest, Headers)> {
        std::mem::take(&mut *self.published.lock().unwrap())
    }
}

#[async_trait]
impl RequestSink for RecorderSink {
    async fn publish(
        &self,
        request: &ProductionRequest,
        headers: &Headers,
    ) -> Result<(), PublisherError> {
        if self.fail {
            return Err(PublisherError::Publish("broker unreachable".into()));
        }
        self.published
            .lock()
            .unwrap()
            .push((request.clone(), headers.clone()));
        Ok(())
    }
}

// ── Fixtures ───────────────────────────────────────────────────────────────────

const VALID_MANIFEST: &str = r#"{
    "interview": "i.mp3",
    "introduction": "intro.mp3",
    "timestamp": 1000,
    "description": "d"
}"#;

fn poller_for(dir: &std::path::Path) -> FilePoller {
    FilePoller::new(dir.to_path_buf(), Duration::ZERO)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn one_valid_manifest_yields_exactly_one_publication() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ep1.podcast"), VALID_MANIFEST).unwrap();

    let sink = RecorderSink::default();
    let metrics = Metrics::new();

    run_tick(&poller_for(dir.path()), &sink, &metrics).await;

    let published = sink.take();
    assert_eq!(published.len(), 1);

    let (request, headers) = &published[0];
    assert_eq!(request.filename, "ep1.podcast");
    assert_eq!(request.interview_file, "i.mp3");
    assert_eq!(request.introduction_file, "intro.mp3");
    assert_eq!(request.timestamp, 1000);
    assert_eq!(headers.get(FILE_NAME), Some("ep1.podcast"));
    assert_eq!(headers.get(MESSAGE_KIND), Some("production_request"));

    let s = metrics.snapshot();
    assert_eq!(s.ticks, 1);
    assert_eq!(s.discovered, 1);
    assert_eq!(s.published, 1);
}

#[tokio::test]
async fn malformed_manifest_never_reaches_the_sink() {
    let dir = tempfile::tempdir().unwrap();
    // Missing the required timestamp field.
    std::fs::write(
        dir.path().join("broken.podcast"),
        r#"{"interview": "i.mp3", "introduction": "intro.mp3", "description": "d"}"#,
    )
    .unwrap();

    let sink = RecorderSink::default();
    let metrics = Metrics::new();

    run_tick(&poller_for(dir.path()), &sink, &metrics).await;

    assert!(sink.take().is_empty());
    let s = metrics.snapshot();
    assert_eq!(s.parse_failures, 1);
    assert_eq!(s.published, 0);
}

#[tokio::test]
async fn rejected_files_are_skipped_without_publish_attempts() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ep1.podcast"), VALID_MANIFEST).unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"unrelated").unwrap();
    std::fs::write(dir.path().join("empty.podcast"), b"").unwrap();
    std::fs::create_dir(dir.path().join("archive")).unwrap();

    let sink = RecorderSink::default();
    let metrics = Metrics::new();

    run_tick(&poller_for(dir.path()), &sink, &metrics).await;

    let published = sink.take();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0.filename, "ep1.podcast");

    let s = metrics.snapshot();
    assert_eq!(s.discovered, 4);
    assert_eq!(s.rejected, 3);
    assert_eq!(s.published, 1);
}

#[tokio::test]
async fn manifest_body_cannot_spoof_the_originating_filename() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("show42.podcast"),
        r#"{
            "interview": "i.mp3",
            "introduction": "intro.mp3",
            "timestamp": 1000,
            "description": "d",
            "filename": "spoofed.podcast"
        }"#,
    )
    .unwrap();

    let sink = RecorderSink::default();
    let metrics = Metrics::new();

    run_tick(&poller_for(dir.path()), &sink, &metrics).await;

    let published = sink.take();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0.filename, "show42.podcast");
}

#[tokio::test]
async fn publish_failure_is_counted_and_does_not_abort_the_tick() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ep1.podcast"), VALID_MANIFEST).unwrap();
    std::fs::write(dir.path().join("ep2.podcast"), VALID_MANIFEST).unwrap();

    let sink = RecorderSink::failing();
    let metrics = Metrics::new();

    run_tick(&poller_for(dir.path()), &sink, &metrics).await;

    let s = metrics.snapshot();
    assert_eq!(s.publish_failures, 2);
    assert_eq!(s.published, 0);
    // The tick itself still completed.
    assert_eq!(s.ticks, 1);
}

#[tokio::test]
async fn files_reappearing_on_a_later_tick_are_processed_again() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ep1.podcast");
    std::fs::write(&path, VALID_MANIFEST).unwrap();

    let sink = RecorderSink::default();
    let metrics = Metrics::new();
    let poller = poller_for(dir.path());

    run_tick(&poller, &sink, &metrics).await;
    // Still present on the next tick — no cross-tick de-duplication.
    run_tick(&poller, &sink, &metrics).await;

    assert_eq!(sink.take().len(), 2);
    assert_eq!(metrics.snapshot().ticks, 2);
}
