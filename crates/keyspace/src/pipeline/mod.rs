//! The generation pipeline.
//!
//! ```text
//! Partitioner ─► ChunkDispatcher ─► workers (N tasks) ─► sink queue ─► writer ─► artifact
//!                                                                        │
//!                            ProgressMonitor ◄── ProgressCounter ◄───────┘
//! ```
//!
//! Workers are tokio tasks that claim chunks from a shared cursor and push
//! records into a bounded queue of `queue_capacity` slots. A single writer on
//! a blocking thread owns the [`RecordSink`] and advances the
//! [`ProgressCounter`] after every accepted record. The queue closes when the
//! last worker drops its sender, which is the writer's only end-of-stream
//! signal. A [`ShutdownCoordinator`] supervises the whole run.

mod pool;
mod progress;
mod report;
mod shutdown;
mod worker;
mod writer;


pub use progress::*;
pub use report::*;
pub use shutdown::*;

use crate::{config::Plan, error::SinkError, sink::RecordSink};
use pool::{ChunkDispatcher, WorkerPool};
use std::{io, sync::Arc};
use tokio::{sync::mpsc, time::Instant};
use tokio_util::sync::CancellationToken;
use writer::writer_loop;

/// One run of a validated [`Plan`].
///
/// Handles to the coordinator, counter and stats can be taken before
/// [`run`](Pipeline::run) consumes the pipeline, so the caller can interrupt
/// it or watch it from elsewhere.
#[derive(Debug)]
pub struct Pipeline {
    plan: Plan,
    shutdown: ShutdownCoordinator,
    progress: ProgressCounter,
    stats: RunStats,
}

impl Pipeline {
    pub fn new(plan: Plan) -> Self {
        Self::with_shutdown(plan, ShutdownCoordinator::new())
    }

    /// Uses an existing coordinator, e.g. one already wired to signals.
    pub fn with_shutdown(plan: Plan, shutdown: ShutdownCoordinator) -> Self {
        Self {
            plan,
            shutdown,
            progress: ProgressCounter::new(),
            stats: RunStats::default(),
        }
    }

    pub const fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn shutdown(&self) -> ShutdownCoordinator {
        self.shutdown.clone()
    }

    pub fn progress(&self) -> ProgressCounter {
        self.progress.clone()
    }

    pub fn stats(&self) -> RunStats {
        self.stats.clone()
    }

    /// Generates every record of the plan into `sink`.
    ///
    /// Returns once the workers and the writer have all exited and `sink` has
    /// been closed. The coordinator is [`ShutdownState::Stopped`] afterwards.
    pub async fn run<S, P>(self, sink: S, progress_sink: P) -> RunReport
    where
        S: RecordSink + 'static,
        P: ProgressSink,
    {
        let Self {
            plan,
            shutdown,
            progress,
            stats,
        } = self;
        let started = Instant::now();
        let total = plan.total();
        let chunks_total = plan.partitioner().chunk_count();

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Generating {total} passwords in {chunks_total} chunks ({} mode, {} workers, queue {})",
            plan.mode(),
            plan.workers(),
            plan.queue_capacity()
        );

        let (tx, rx) = mpsc::channel(plan.queue_capacity());

        let writer = {
            let counter = progress.clone();
            let shutdown = shutdown.clone();
            tokio::task::spawn_blocking(move || writer_loop(sink, rx, &counter, &shutdown))
        };

        let monitor_stop = CancellationToken::new();
        let monitor = tokio::spawn(
            ProgressMonitor::new(progress.clone(), total, plan.progress_interval())
                .run(progress_sink, monitor_stop.clone()),
        );

        let dispatcher = Arc::new(ChunkDispatcher::new(
            plan.partitioner().chunks(),
            shutdown.clone(),
        ));
        WorkerPool::spawn(
            plan.workers(),
            dispatcher,
            plan.generator().clone(),
            tx,
            &shutdown,
            &stats,
        )
        .join()
        .await;

        let written = match writer.await {
            Ok(result) => result,
            Err(e) => Err(SinkError::Io(io::Error::other(format!(
                "writer terminated abnormally: {e}"
            )))),
        };

        shutdown.mark_stopped();
        monitor_stop.cancel();
        if let Err(_e) = monitor.await {
            #[cfg(feature = "tracing")]
            tracing::warn!("Progress monitor terminated abnormally: {_e}");
        }

        let mut report = RunReport {
            outcome: Outcome::Completed,
            total,
            attempted: stats.attempted(),
            written: progress.get(),
            chunks_total,
            chunks_succeeded: stats.chunks_succeeded(),
            chunks_failed: stats.chunks_failed(),
            chunks_abandoned: stats.chunks_abandoned(),
            elapsed: started.elapsed(),
        };
        let interrupted = shutdown
            .was_interrupted()
            .then(|| shutdown.is_forced());
        report.outcome = Outcome::settle(written, interrupted, report.chunks_skipped());

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Run {} after {:.2?}: {} of {} records written",
            report.outcome,
            report.elapsed,
            report.written,
            report.total
        );

        report
    }
}
