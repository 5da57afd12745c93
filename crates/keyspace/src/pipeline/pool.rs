//! Worker pool and the shared chunk cursor.
//!
//! Chunks are not preassigned. Every worker pulls the next one from a single
//! [`ChunkDispatcher`] as soon as it is free, so a slow chunk never leaves
//! other workers idle.

use super::{RunStats, ShutdownCoordinator, worker::worker_loop};
use crate::{
    generator::Generator,
    partition::{Chunk, Chunks},
    record::PasswordRecord,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::{sync::mpsc, task::JoinHandle};

/// Hands out each chunk exactly once, first come first served.
#[derive(Debug)]
pub(crate) struct ChunkDispatcher {
    chunks: Mutex<Chunks>,
    shutdown: ShutdownCoordinator,
}

impl ChunkDispatcher {
    pub(crate) fn new(chunks: Chunks, shutdown: ShutdownCoordinator) -> Self {
        Self {
            chunks: Mutex::new(chunks),
            shutdown,
        }
    }

    /// Claims the next chunk, or `None` once the space is exhausted or the
    /// run is draining.
    pub(crate) fn claim(&self) -> Option<Chunk> {
        if self.shutdown.is_draining() {
            return None;
        }
        self.chunks.lock().next()
    }
}

/// A fixed set of workers sharing one dispatcher and one sink queue.
pub(crate) struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `workers` tasks. The pool takes ownership of `tx`; the queue
    /// closes once the last worker exits.
    pub(crate) fn spawn(
        workers: usize,
        dispatcher: Arc<ChunkDispatcher>,
        generator: Arc<dyn Generator>,
        tx: mpsc::Sender<PasswordRecord>,
        shutdown: &ShutdownCoordinator,
        stats: &RunStats,
    ) -> Self {
        let handles = (0..workers)
            .map(|worker_id| {
                tokio::spawn(worker_loop(
                    worker_id,
                    dispatcher.clone(),
                    generator.clone(),
                    tx.clone(),
                    shutdown.clone(),
                    stats.clone(),
                ))
            })
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!("Spawned {workers} workers");

        Self { handles }
    }

    /// Waits for every worker to exit.
    pub(crate) async fn join(self) {
        let results = futures::future::join_all(self.handles).await;
        for (_worker_id, result) in results.into_iter().enumerate() {
            if let Err(_e) = result {
                #[cfg(feature = "tracing")]
                tracing::error!("Worker {_worker_id} terminated abnormally: {_e}");
            }
        }
    }
}
