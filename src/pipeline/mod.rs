mod parser;
mod poller;
mod transform;
mod validator;

#[cfg(test)]
mod tests;

pub use parser::ManifestParseError;
pub use poller::{FileEvent, FilePoller, ScanError};

use crate::messaging::{PublisherError, RequestSink};
use crate::metrics::Metrics;

// ── Per-file outcome ───────────────────────────────────────────────────────────

/// Terminal state of one file's single pipeline pass.
///
/// A file moves Discovered → Validated → Parsed → Transformed → Published,
/// exiting early as `Rejected` (validator) or with a [`PipelineError`]
/// (read / parse / publish). Nothing is remembered between ticks — a file
/// still present next tick gets a fresh pass.
#[derive(Debug)]
pub enum FileOutcome {
    Published,
    Rejected,
}

#[derive(Debug)]
pub enum PipelineError {
    /// The file vanished or became unreadable after validation.
    Read(std::io::Error),
    /// Malformed manifest content; the file is abandoned until fixed or removed.
    Parse(ManifestParseError),
    /// The broker refused or failed to confirm the publication.
    Publish(PublisherError),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(e) => write!(f, "file read failed: {e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Publish(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PipelineError {}

// ── Tick ───────────────────────────────────────────────────────────────────────

/// Execute one polling tick: scan the watched directory and run every
/// discovered file through validate → read → parse → transform → publish,
/// sequentially.
///
/// The caller awaits this function before starting the next tick, so ticks
/// never overlap. Per-file failures are logged and counted here; none of
/// them aborts the tick, and a scan failure only skips it.
pub async fn run_tick<S: RequestSink>(poller: &FilePoller, sink: &S, metrics: &Metrics) {
    let events = match poller.scan().await {
        Ok(events) => events,
        Err(e) => {
            tracing::warn!(dir = %poller.dir().display(), error = %e, "⚠️  scan failed, skipping tick");
            return;
        }
    };

    for event in events {
        metrics.inc_discovered();
        let filename = event.filename.clone();

        match process_file(event, sink).await {
            Ok(FileOutcome::Published) => {
                metrics.inc_published();
            }
            Ok(FileOutcome::Rejected) => {
                metrics.inc_rejected();
                tracing::trace!(file = %filename, "not a processable manifest, skipped");
            }
            Err(PipelineError::Read(e)) => {
                // Likely a concurrent move or delete; next tick settles it.
                tracing::warn!(file = %filename, error = %e, "read failed");
            }
            Err(PipelineError::Parse(e)) => {
                metrics.inc_parse_failures();
                tracing::warn!(file = %filename, "⚠️  {e} — fix or remove the file");
            }
            Err(PipelineError::Publish(e)) => {
                metrics.inc_publish_failures();
                tracing::error!(file = %filename, error = %e, "❌ publish failed");
            }
        }
    }

    metrics.inc_ticks();
}

/// Run a single file through the pipeline.
async fn process_file<S: RequestSink>(
    event: FileEvent,
    sink: &S,
) -> Result<FileOutcome, PipelineError> {
    // Discovered → Validated
    if !validator::accepts(&event) {
        return Ok(FileOutcome::Rejected);
    }

    // Validated → Parsed
    let content = tokio::fs::read_to_string(&event.path)
        .await
        .map_err(PipelineError::Read)?;
    let manifest = parser::parse(&event.filename, &content).map_err(PipelineError::Parse)?;

    // Parsed → Transformed
    let (request, headers) =
        transform::to_production_request(manifest, &event.filename, &event.headers);

    // Transformed → Published
    sink.publish(&request, &headers)
        .await
        .map_err(PipelineError::Publish)?;

    Ok(FileOutcome::Published)
}
