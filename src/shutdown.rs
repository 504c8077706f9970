use tokio::sync::watch;

/// Sender side, held by `app::run`.
/// Call [`ShutdownHandle::trigger`] to broadcast shutdown to all listeners.
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

/// Receiver side, handed to the tick loop.
/// Clone freely — each clone independently observes the signal.
#[derive(Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

/// Construct a linked handle/signal pair.
pub fn new_pair() -> (ShutdownHandle, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (ShutdownHandle { tx }, ShutdownSignal { rx })
}

impl ShutdownHandle {
    /// Broadcast the shutdown signal to all outstanding [`ShutdownSignal`]
    /// receivers. The tick loop finishes any in-flight pass before exiting,
    /// so no file is left half-published.
    pub fn trigger(self) {
        // Errors only if every receiver has been dropped — harmless.
        let _ = self.tx.send(true);
    }
}

impl ShutdownSignal {
    /// Asynchronously wait until shutdown has been triggered.
    /// Resolves immediately if it already was.
    pub async fn wait(&mut self) {
        let _ = self.rx.wait_for(|&triggered| triggered).await;
    }
}

/// Wait for `SIGINT` (Ctrl-C) or `SIGTERM` (container stop / kill).
///
/// A free function rather than a method so `app::run` can call it once
/// without any prior state.
pub async fn wait_for_os_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt()).expect("failed to register SIGINT handler");
    let mut sigterm = signal(SignalKind::terminate()).expect("failed to register SIGTERM handler");

    tokio::select! {
        _ = sigint.recv()  => tracing::info!("🔔 SIGINT received"),
        _ = sigterm.recv() => tracing::info!("🔔 SIGTERM received"),
    }
}
