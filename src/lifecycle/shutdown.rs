//! Shutdown coordination for the server.

use std::fmt;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::observability::TelemetryHandle;

/// What triggered shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    /// SIGINT / Ctrl-C.
    Interrupt,
    /// SIGTERM.
    Terminate,
    /// SIGABRT.
    Abort,
    /// Programmatic request through [`Shutdown::trigger`].
    Requested,
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TerminationSignal::Interrupt => "interrupt",
            TerminationSignal::Terminate => "terminated",
            TerminationSignal::Abort => "aborted",
            TerminationSignal::Requested => "requested",
        };
        f.write_str(name)
    }
}

/// Coordinator for graceful shutdown.
///
/// Provides a broadcast channel the serve loop subscribes to. The signal
/// watcher is the only producer in a running process.
#[derive(Debug, Clone)]
pub struct Shutdown {
    /// Broadcast channel sender.
    tx: broadcast::Sender<TerminationSignal>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<TerminationSignal> {
        self.tx.subscribe()
    }

    /// Request shutdown without an OS signal.
    pub fn trigger(&self) {
        self.notify(TerminationSignal::Requested);
    }

    /// Broadcast `signal` to every subscriber.
    pub fn notify(&self, signal: TerminationSignal) {
        let _ = self.tx.send(signal);
    }

    /// Get the number of active subscribers (tasks still running).
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait until a termination signal arrives on `rx`.
///
/// If every sender is gone no signal can ever arrive, so this waits forever.
pub async fn wait_for_signal(mut rx: broadcast::Receiver<TerminationSignal>) -> TerminationSignal {
    match rx.recv().await {
        Ok(signal) => signal,
        Err(broadcast::error::RecvError::Lagged(_)) => TerminationSignal::Requested,
        Err(broadcast::error::RecvError::Closed) => {
            tracing::warn!("Shutdown channel closed, signal-triggered shutdown disabled");
            std::future::pending().await
        }
    }
}

/// Run the shutdown sequence once a signal has been received.
///
/// Logs the signal, sleeps for `grace` so in-flight requests can finish,
/// then flushes telemetry. The serve loop is not stopped here; requests keep
/// being accepted until the caller drops it.
pub async fn run_shutdown_sequence(
    signal: TerminationSignal,
    grace: Duration,
    telemetry: TelemetryHandle,
) {
    tracing::info!(signal = %signal, "caught signal");
    tracing::info!(grace_ms = grace.as_millis() as u64, "waiting for in-flight requests to finish");
    tokio::time::sleep(grace).await;

    tracing::info!("os term signal captured, shutting down http server");

    // The OTLP batch processor blocks while draining.
    if let Err(e) = tokio::task::spawn_blocking(move || telemetry.flush()).await {
        tracing::error!(error = %e, "Telemetry flush task failed");
    }

    tracing::info!("finished server cleanup");
}
