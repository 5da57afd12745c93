//! Cooperative cancellation for a run.
//!
//! A run moves through `RUNNING → DRAINING → STOPPED`:
//!
//! - The first [`interrupt`](ShutdownCoordinator::interrupt) stops chunk
//!   dispatch. In-flight chunks finish, the queue closes once every worker is
//!   done, and the writer flushes what is left.
//! - A second interrupt while draining forces the stop: workers abandon their
//!   chunks and the writer drops whatever is still queued. The artifact is
//!   still closed cleanly.
//! - [`fail`](ShutdownCoordinator::fail) goes straight to the forced path;
//!   the writer uses it when the artifact breaks.

use portable_atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Lifecycle of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ShutdownState {
    Running = 0,
    Draining = 1,
    Stopped = 2,
}

impl ShutdownState {
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Running,
            1 => Self::Draining,
            _ => Self::Stopped,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: AtomicU8,
    interrupted: AtomicBool,
    /// Cancelled on the first interrupt: no more chunks are handed out.
    drain: CancellationToken,
    /// Cancelled on the forced path: in-flight work is dropped.
    abort: CancellationToken,
    stopped: CancellationToken,
}

/// Shared handle that drives a run's shutdown. Cheap to clone.
#[derive(Clone, Debug, Default)]
pub struct ShutdownCoordinator {
    inner: Arc<Inner>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ShutdownState {
        ShutdownState::from_u8(self.inner.state.load(Ordering::Acquire))
    }

    /// Handles one interrupt and returns the resulting state.
    ///
    /// The first call starts draining; any later call before the run stops
    /// forces it. Interrupts after [`ShutdownState::Stopped`] are ignored.
    pub fn interrupt(&self) -> ShutdownState {
        let inner = &self.inner;
        match inner.state.compare_exchange(
            ShutdownState::Running as u8,
            ShutdownState::Draining as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                inner.interrupted.store(true, Ordering::Release);
                #[cfg(feature = "tracing")]
                tracing::warn!("Interrupt received, draining in-flight chunks");
                inner.drain.cancel();
                ShutdownState::Draining
            }
            Err(current) if current == ShutdownState::Draining as u8 => {
                inner.interrupted.store(true, Ordering::Release);
                if !inner.abort.is_cancelled() {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("Second interrupt received, forcing stop");
                    inner.abort.cancel();
                }
                ShutdownState::Draining
            }
            Err(_) => ShutdownState::Stopped,
        }
    }

    /// Forces the stop without counting as an interrupt.
    pub fn fail(&self) {
        let inner = &self.inner;
        let _ = inner.state.compare_exchange(
            ShutdownState::Running as u8,
            ShutdownState::Draining as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        inner.drain.cancel();
        inner.abort.cancel();
    }

    /// `true` once chunk dispatch has stopped.
    pub fn is_draining(&self) -> bool {
        self.inner.drain.is_cancelled()
    }

    /// `true` once in-flight work is being dropped.
    pub fn is_forced(&self) -> bool {
        self.inner.abort.is_cancelled()
    }

    pub fn was_interrupted(&self) -> bool {
        self.inner.interrupted.load(Ordering::Acquire)
    }

    /// Resolves once the forced path has been taken.
    pub async fn aborted(&self) {
        self.inner.abort.cancelled().await;
    }

    /// Resolves once the run has fully stopped.
    pub async fn stopped(&self) {
        self.inner.stopped.cancelled().await;
    }

    pub(crate) fn mark_stopped(&self) {
        self.inner
            .state
            .store(ShutdownState::Stopped as u8, Ordering::Release);
        self.inner.stopped.cancel();
    }
}

/// Forwards Ctrl+C (and `SIGTERM` on Unix) to `coordinator` until the run
/// stops.
///
/// # Errors
///
/// Returns an error if a signal handler cannot be installed.
pub async fn watch_signals(coordinator: ShutdownCoordinator) -> std::io::Result<()> {
    #[cfg(unix)]
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;

    loop {
        #[cfg(unix)]
        let term = terminate.recv();
        #[cfg(not(unix))]
        let term = std::future::pending::<Option<()>>();

        tokio::select! {
            () = coordinator.stopped() => return Ok(()),
            res = signal::ctrl_c() => {
                res?;
                #[cfg(feature = "tracing")]
                tracing::info!("Received Ctrl+C signal");
            }
            Some(()) = term => {
                #[cfg(feature = "tracing")]
                tracing::info!("Received SIGTERM signal");
            }
        }

        coordinator.interrupt();
    }
}
