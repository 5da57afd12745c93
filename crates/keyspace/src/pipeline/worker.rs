use super::{RunStats, ShutdownCoordinator, pool::ChunkDispatcher};
use crate::{
    error::ExpandError, generator::Generator, partition::Chunk, record::PasswordRecord,
};
use core::panic::AssertUnwindSafe;
use futures::FutureExt;
use std::{any::Any, sync::Arc};
use tokio::sync::mpsc;

/// What happened to one claimed chunk.
#[derive(Debug)]
pub(crate) enum ChunkOutcome {
    /// Every record was pushed to the queue.
    Done,
    /// The generator failed; records pushed before the error stay pushed.
    Failed(ExpandError),
    /// The run was forced to stop or the writer went away.
    Abandoned,
}

/// Claims chunks until the dispatcher runs dry, pushing their records to
/// `tx`.
///
/// An expansion error or a generator panic only costs the chunk it happened
/// in. The loop exits early on a forced stop.
#[allow(clippy::used_underscore_binding)]
pub(crate) async fn worker_loop(
    _worker_id: usize,
    dispatcher: Arc<ChunkDispatcher>,
    generator: Arc<dyn Generator>,
    tx: mpsc::Sender<PasswordRecord>,
    shutdown: ShutdownCoordinator,
    stats: RunStats,
) {
    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {_worker_id} started");

    while let Some(chunk) = dispatcher.claim() {
        let outcome = AssertUnwindSafe(expand_chunk(
            chunk,
            generator.as_ref(),
            &tx,
            &shutdown,
            &stats,
        ))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| {
            ChunkOutcome::Failed(ExpandError::Panicked(panic_message(&*panic)))
        });

        match outcome {
            ChunkOutcome::Done => stats.chunk_succeeded(),
            ChunkOutcome::Failed(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Worker {_worker_id} abandoned chunk {chunk}: {_e}");
                stats.chunk_failed();
            }
            ChunkOutcome::Abandoned => {
                #[cfg(feature = "tracing")]
                tracing::debug!("Worker {_worker_id} dropped chunk {chunk}");
                stats.chunk_abandoned();
                break;
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {_worker_id} stopped");
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}

/// Expands one chunk, waiting on the queue whenever it is full.
pub(crate) async fn expand_chunk(
    chunk: Chunk,
    generator: &dyn Generator,
    tx: &mpsc::Sender<PasswordRecord>,
    shutdown: &ShutdownCoordinator,
    stats: &RunStats,
) -> ChunkOutcome {
    let records = match generator.expand(chunk) {
        Ok(records) => records,
        Err(e) => return ChunkOutcome::Failed(e),
    };

    for record in records {
        let record = match record {
            Ok(record) => record,
            Err(e) => return ChunkOutcome::Failed(e),
        };
        stats.record_attempt();

        tokio::select! {
            biased;
            () = shutdown.aborted() => return ChunkOutcome::Abandoned,
            sent = tx.send(record) => {
                if sent.is_err() {
                    return ChunkOutcome::Abandoned;
                }
            }
        }
    }

    ChunkOutcome::Done
}
