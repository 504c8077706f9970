use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::config::Config;
use crate::messaging::{build_pool, RabbitPublisher, Topology};
use crate::metrics::Metrics;
use crate::pipeline::{self, FilePoller};
use crate::shutdown::{self, ShutdownSignal};

// ── Error type ─────────────────────────────────────────────────────────────────

/// Top-level application error, surfaced only at startup.
/// Each variant wraps the underlying cause so `main.rs` can log it cleanly
/// without depending on every sub-module type.
#[derive(Debug)]
pub enum AppError {
    Config(crate::config::ConfigError),
    RabbitMQ(crate::messaging::RabbitError),
    Publisher(crate::messaging::PublisherError),
    Loop(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e)    => write!(f, "config error: {e}"),
            Self::RabbitMQ(e)  => write!(f, "rabbitmq pool error: {e}"),
            Self::Publisher(e) => write!(f, "publisher error: {e}"),
            Self::Loop(e)      => write!(f, "tick loop error: {e}"),
        }
    }
}

// ── Entry point ────────────────────────────────────────────────────────────────

/// Full application lifecycle.
///
/// # Startup sequence
/// 1. Load and validate configuration from environment variables.
/// 2. Build the RabbitMQ connection pool (bounded connect retry; fatal on
///    exhaustion — the pipeline must not run if it cannot publish).
/// 3. Create the publisher and idempotently declare the requests topology.
/// 4. Ensure the inbound directory exists (non-fatal; re-attempted per tick).
/// 5. Drive the polling loop until SIGINT / SIGTERM, letting any in-flight
///    tick finish before exit.
pub async fn run() -> Result<(), AppError> {
    // ── 1. Configuration ──────────────────────────────────────────────────────
    let cfg = Config::load().map_err(AppError::Config)?;
    cfg.log_summary();

    // ── 2. Metrics ────────────────────────────────────────────────────────────
    let metrics = Arc::new(Metrics::new());

    // ── 3. Shutdown pair ──────────────────────────────────────────────────────
    // The handle is held here; the signal is moved into the tick loop so it
    // can break between passes on demand.
    let (shutdown_handle, shutdown_signal) = shutdown::new_pair();

    // ── 4. RabbitMQ pool ──────────────────────────────────────────────────────
    // One connection is enough for the single publishing channel; a second
    // gives headroom for broker-side channel recovery.
    tracing::info!("🔌 connecting to RabbitMQ...");
    let rabbit_pool = build_pool(&cfg.rabbitmq_url, 2)
        .await
        .map_err(AppError::RabbitMQ)?;

    // ── 5. Publisher + topology ───────────────────────────────────────────────
    // Declares exchange, queue, and binding before the first scan. Failure
    // here aborts startup: polling without a publishable topology would
    // silently drop work.
    let topology = Topology::from_config(&cfg);
    let publisher = RabbitPublisher::new(&rabbit_pool, topology)
        .await
        .map_err(AppError::Publisher)?;

    // ── 6. File source ────────────────────────────────────────────────────────
    let poller = FilePoller::new(
        cfg.inbound_dir.clone(),
        Duration::from_millis(cfg.settle_ms),
    );
    if let Err(e) = poller.ensure_directory().await {
        // Not fatal: the scan re-attempts creation every tick.
        tracing::error!(dir = %cfg.inbound_dir.display(), error = %e, "inbound directory unavailable");
    }

    tracing::info!(
        dir = %cfg.inbound_dir.display(),
        poll_ms = cfg.poll_interval_ms,
        "✅ ingestion ready — watching for manifests"
    );

    // ── 7. Concurrent run + OS-signal wait ────────────────────────────────────
    // The tick loop runs in a background task so we can simultaneously wait
    // for an OS signal on the current task.
    let poll_interval = Duration::from_millis(cfg.poll_interval_ms);
    let loop_metrics = Arc::clone(&metrics);
    let loop_task = tokio::spawn(tick_loop(
        poller,
        publisher,
        poll_interval,
        loop_metrics,
        shutdown_signal,
    ));

    // Block until SIGINT or SIGTERM is received.
    shutdown::wait_for_os_signal().await;
    tracing::info!("🛑 signal received — initiating graceful shutdown...");

    // ── 8. Graceful shutdown ──────────────────────────────────────────────────
    // The loop breaks after the current tick completes, so no file is left
    // between parse and publish.
    shutdown_handle.trigger();

    loop_task
        .await
        .map_err(|e| AppError::Loop(e.to_string()))?;

    metrics.log_summary();
    tracing::info!("✅ shutdown complete — goodbye");
    Ok(())
}

// ── Tick loop ──────────────────────────────────────────────────────────────────

/// Drive [`pipeline::run_tick`] on a fixed interval until shutdown.
///
/// Each pass is awaited before the next interval fire, so ticks are strictly
/// serialized; a slow pass delays the schedule rather than overlapping it.
/// `biased` makes the shutdown branch win over a due tick, so a busy
/// directory cannot starve the signal.
async fn tick_loop(
    poller: FilePoller,
    publisher: RabbitPublisher,
    poll_interval: Duration,
    metrics: Arc<Metrics>,
    mut shutdown_signal: ShutdownSignal,
) {
    let mut interval = tokio::time::interval(poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            _ = shutdown_signal.wait() => {
                tracing::info!("🛑 tick loop stopping");
                break;
            }

            _ = interval.tick() => {
                pipeline::run_tick(&poller, &publisher, &metrics).await;
            }
        }
    }
}
