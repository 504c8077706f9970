use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use crate::headers::{self, Headers};

// ── Types ──────────────────────────────────────────────────────────────────────

/// One file discovered during a polling tick.
///
/// Carries the filesystem metadata captured at discovery time (the validator
/// works on this snapshot, not on a re-stat) and the initial header map for
/// the message envelope, stamped with the `file_name` header.
pub struct FileEvent {
    pub path: PathBuf,
    pub filename: String,
    pub metadata: std::fs::Metadata,
    pub headers: Headers,
}

#[derive(Debug)]
pub enum ScanError {
    /// The watched directory is missing and could not be created.
    /// Not fatal to the process — creation is re-attempted on every tick,
    /// so the poll interval doubles as the retry backoff.
    DirectoryUnavailable(std::io::Error),
    /// The directory exists but listing it failed.
    List(std::io::Error),
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryUnavailable(e) => {
                write!(f, "watched directory unavailable: {e}")
            }
            Self::List(e) => write!(f, "directory listing failed: {e}"),
        }
    }
}

impl std::error::Error for ScanError {}

// ── FilePoller ─────────────────────────────────────────────────────────────────

/// Periodic file source.
///
/// Each call to [`scan`](Self::scan) is one tick: list the watched
/// directory and emit one [`FileEvent`] per entry. The poller keeps no
/// state between ticks — the directory itself is the record of what still
/// needs processing, and a file that reappears after processing is simply
/// treated as new.
pub struct FilePoller {
    dir: PathBuf,
    /// Minimum age since last modification before a file is emitted.
    /// Files younger than this are assumed to still be mid-write and are
    /// held back until a later tick. Zero disables the check.
    settle: Duration,
}

impl FilePoller {
    pub fn new(dir: PathBuf, settle: Duration) -> Self {
        Self { dir, settle }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    /// Create the watched directory if it does not exist yet.
    pub async fn ensure_directory(&self) -> Result<(), ScanError> {
        if !self.dir.is_dir() {
            tokio::fs::create_dir_all(&self.dir)
                .await
                .map_err(ScanError::DirectoryUnavailable)?;
            tracing::info!(dir = %self.dir.display(), "📂 created inbound directory");
        }
        Ok(())
    }

    /// Perform one directory scan and return the discovered file events.
    ///
    /// Entries that vanish between listing and stat are skipped; entries
    /// still inside the settle window are held back for a later tick.
    pub async fn scan(&self) -> Result<Vec<FileEvent>, ScanError> {
        self.ensure_directory().await?;

        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(ScanError::List)?;

        let mut events = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(ScanError::List)? {
            let path = entry.path();
            let filename = entry.file_name().to_string_lossy().into_owned();

            let metadata = match entry.metadata().await {
                Ok(m) => m,
                Err(e) => {
                    // The file may have been picked up or deleted mid-scan.
                    tracing::debug!(file = %filename, error = %e, "stat failed, skipping");
                    continue;
                }
            };

            if !self.is_settled(&metadata) {
                tracing::debug!(file = %filename, "still settling, holding back");
                continue;
            }

            let headers = Headers::new().with(headers::FILE_NAME, filename.clone());

            events.push(FileEvent {
                path,
                filename,
                metadata,
                headers,
            });
        }

        Ok(events)
    }

    /// A file is settled once its modification time is at least `settle` in
    /// the past. Clock anomalies (mtime in the future, missing mtime) count
    /// as not settled; the file gets another chance next tick.
    fn is_settled(&self, metadata: &std::fs::Metadata) -> bool {
        if self.settle.is_zero() {
            return true;
        }
        match metadata.modified().map(|m| SystemTime::now().duration_since(m)) {
            Ok(Ok(age)) => age >= self.settle,
            _ => false,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
