//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGINT, SIGTERM, SIGABRT)
//! - Translate the first signal received into a [`TerminationSignal`]
//! - Forward it to the [`Shutdown`] coordinator exactly once
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Handlers are registered before the listener binds, so no signal can
//!   hit the default disposition once the port is open
//! - The signal kind is reported but does not change the exit path

use tokio::task::JoinHandle;

use crate::lifecycle::shutdown::{Shutdown, TerminationSignal};

/// Registered termination signal streams.
#[cfg(unix)]
pub struct TerminationSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
    abort: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl TerminationSignals {
    /// Register handlers for SIGINT, SIGTERM and SIGABRT.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn install() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
            abort: signal(SignalKind::from_raw(libc::SIGABRT))?,
        })
    }

    /// Wait for the next termination signal.
    pub async fn recv(&mut self) -> TerminationSignal {
        tokio::select! {
            _ = self.interrupt.recv() => TerminationSignal::Interrupt,
            _ = self.terminate.recv() => TerminationSignal::Terminate,
            _ = self.abort.recv() => TerminationSignal::Abort,
        }
    }
}

/// Registered Ctrl-C handler.
#[cfg(not(unix))]
pub struct TerminationSignals {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(not(unix))]
impl TerminationSignals {
    /// Register the Ctrl-C handler.
    pub fn install() -> std::io::Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    /// Wait for the next Ctrl-C.
    pub async fn recv(&mut self) -> TerminationSignal {
        self.ctrl_c.recv().await;
        TerminationSignal::Interrupt
    }
}

/// Spawn the watcher task that forwards the first termination signal to
/// `shutdown`.
pub fn spawn_signal_watcher(mut signals: TerminationSignals, shutdown: Shutdown) -> JoinHandle<()> {
    tokio::spawn(async move {
        let signal = signals.recv().await;
        tracing::debug!(signal = %signal, "Termination signal received");
        shutdown.notify(signal);
    })
}
