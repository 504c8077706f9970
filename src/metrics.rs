use std::sync::atomic::{AtomicU64, Ordering};

/// Application-wide runtime counters.
///
/// All counters use `Relaxed` ordering — they are independent observations;
/// no cross-variable synchronisation is required. Share via `Arc<Metrics>`.
pub struct Metrics {
    /// Completed polling ticks since startup.
    pub ticks: AtomicU64,

    /// File events emitted by the poller (before validation).
    pub files_discovered: AtomicU64,

    /// Events dropped by the validator (wrong extension, empty, not a file).
    pub files_rejected: AtomicU64,

    /// Files whose content failed manifest decoding.
    pub parse_failures: AtomicU64,

    /// Publish attempts the broker did not confirm, or that failed outright.
    pub publish_failures: AtomicU64,

    /// Production requests successfully published and confirmed.
    pub requests_published: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            ticks: AtomicU64::new(0),
            files_discovered: AtomicU64::new(0),
            files_rejected: AtomicU64::new(0),
            parse_failures: AtomicU64::new(0),
            publish_failures: AtomicU64::new(0),
            requests_published: AtomicU64::new(0),
        }
    }

    // ── Convenience increment methods ─────────────────────────────────────────

    pub fn inc_ticks(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_discovered(&self) {
        self.files_discovered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rejected(&self) {
        self.files_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_parse_failures(&self) {
        self.parse_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_publish_failures(&self) {
        self.publish_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_published(&self) {
        self.requests_published.fetch_add(1, Ordering::Relaxed);
    }

    // ── Snapshot ──────────────────────────────────────────────────────────────

    /// Return a point-in-time snapshot of all counters.
    /// Reads are `Relaxed`, so the snapshot is approximate but sufficient
    /// for observability purposes.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            ticks:            self.ticks.load(Ordering::Relaxed),
            discovered:       self.files_discovered.load(Ordering::Relaxed),
            rejected:         self.files_rejected.load(Ordering::Relaxed),
            parse_failures:   self.parse_failures.load(Ordering::Relaxed),
            publish_failures: self.publish_failures.load(Ordering::Relaxed),
            published:        self.requests_published.load(Ordering::Relaxed),
        }
    }

    /// Log a summary of all counters via `tracing`.
    pub fn log_summary(&self) {
        let s = self.snapshot();
        tracing::info!(
            ticks            = s.ticks,
            discovered       = s.discovered,
            rejected         = s.rejected,
            parse_failures   = s.parse_failures,
            publish_failures = s.publish_failures,
            published        = s.published,
            "📊 metrics summary"
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of [`Metrics`] counters.
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub ticks:            u64,
    pub discovered:       u64,
    pub rejected:         u64,
    pub parse_failures:   u64,
    pub publish_failures: u64,
    pub published:        u64,
}
