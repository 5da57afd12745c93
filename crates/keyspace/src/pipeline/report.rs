use crate::error::SinkError;
use core::{fmt, time::Duration};
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Counters {
    attempted: AtomicU64,
    chunks_succeeded: AtomicU64,
    chunks_failed: AtomicU64,
    chunks_abandoned: AtomicU64,
}

/// Live tallies kept by the workers. Cheap to clone.
#[derive(Clone, Debug, Default)]
pub struct RunStats {
    inner: Arc<Counters>,
}

impl RunStats {
    /// Records produced by workers, whether or not they were written.
    pub fn attempted(&self) -> u64 {
        self.inner.attempted.load(Ordering::Relaxed)
    }

    pub fn chunks_succeeded(&self) -> u64 {
        self.inner.chunks_succeeded.load(Ordering::Relaxed)
    }

    pub fn chunks_failed(&self) -> u64 {
        self.inner.chunks_failed.load(Ordering::Relaxed)
    }

    pub fn chunks_abandoned(&self) -> u64 {
        self.inner.chunks_abandoned.load(Ordering::Relaxed)
    }

    pub(crate) fn record_attempt(&self) {
        self.inner.attempted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn chunk_succeeded(&self) {
        self.inner.chunks_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn chunk_failed(&self) {
        self.inner.chunks_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn chunk_abandoned(&self) {
        self.inner.chunks_abandoned.fetch_add(1, Ordering::Relaxed);
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum Outcome {
    /// Every chunk was dispatched and the artifact was closed.
    Completed,
    /// Stopped by an interrupt. `forced` runs dropped in-flight records.
    Interrupted { forced: bool },
    /// No interrupt or write error, yet `skipped` chunks never reached a
    /// worker.
    Incomplete { skipped: u64 },
    /// The artifact failed; its contents cannot be trusted.
    Failed(SinkError),
}

impl Outcome {
    /// Decides how a run ended. A write failure wins over an interrupt, and an
    /// interrupt explains any chunks left undispatched.
    pub(crate) fn settle(
        written: Result<(), SinkError>,
        interrupted: Option<bool>,
        skipped: u64,
    ) -> Self {
        match (written, interrupted) {
            (Err(e), _) => Self::Failed(e),
            (Ok(()), Some(forced)) => Self::Interrupted { forced },
            (Ok(()), None) if skipped > 0 => Self::Incomplete { skipped },
            (Ok(()), None) => Self::Completed,
        }
    }

    /// Process exit status conventionally associated with this outcome.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Completed => 0,
            Self::Failed(_) | Self::Incomplete { .. } => 1,
            Self::Interrupted { .. } => 130,
        }
    }

    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("completed"),
            Self::Interrupted { forced: false } => f.write_str("interrupted"),
            Self::Interrupted { forced: true } => {
                f.write_str("interrupted (forced, queued records dropped)")
            }
            Self::Incomplete { skipped } => {
                write!(f, "incomplete ({skipped} chunks never ran)")
            }
            Self::Failed(e) => write!(f, "failed: {e}"),
        }
    }
}

/// Summary of a finished run.
#[derive(Debug)]
pub struct RunReport {
    pub outcome: Outcome,
    /// Records a complete run would have produced.
    pub total: u64,
    /// Records produced by workers.
    pub attempted: u64,
    /// Records accepted by the sink.
    pub written: u64,
    pub chunks_total: u64,
    pub chunks_succeeded: u64,
    pub chunks_failed: u64,
    pub chunks_abandoned: u64,
    pub elapsed: Duration,
}

impl RunReport {
    /// Chunks that were never handed to a worker.
    pub const fn chunks_skipped(&self) -> u64 {
        self.chunks_total
            .saturating_sub(self.chunks_succeeded + self.chunks_failed + self.chunks_abandoned)
    }

    /// Written records per second.
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.written as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "outcome:   {}", self.outcome)?;
        writeln!(
            f,
            "records:   {} written / {} attempted / {} total",
            self.written, self.attempted, self.total
        )?;
        writeln!(
            f,
            "chunks:    {} succeeded, {} failed, {} abandoned, {} skipped (of {})",
            self.chunks_succeeded,
            self.chunks_failed,
            self.chunks_abandoned,
            self.chunks_skipped(),
            self.chunks_total
        )?;
        write!(
            f,
            "elapsed:   {:.2?} ({:.0} records/s)",
            self.elapsed,
            self.rate()
        )
    }
}
