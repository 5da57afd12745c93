use super::{ProgressCounter, ShutdownCoordinator};
use crate::{error::SinkError, record::PasswordRecord, sink::RecordSink};
use tokio::sync::mpsc;

/// Drains the sink queue into `sink` until every sender is gone.
///
/// Runs on a blocking thread. The counter advances only after the sink has
/// accepted a record. On a forced stop queued records are dropped; on an
/// append failure the coordinator is told to stop generation. Either way the
/// sink is closed exactly once before returning.
pub(crate) fn writer_loop<S: RecordSink>(
    mut sink: S,
    mut rx: mpsc::Receiver<PasswordRecord>,
    counter: &ProgressCounter,
    shutdown: &ShutdownCoordinator,
) -> Result<(), SinkError> {
    #[cfg(feature = "tracing")]
    tracing::trace!("Writer started");

    while let Some(record) = rx.blocking_recv() {
        if shutdown.is_forced() {
            #[cfg(feature = "tracing")]
            tracing::warn!("Forced stop, dropping queued records");
            break;
        }

        if let Err(e) = sink.append(&record) {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to write record: {e}");
            shutdown.fail();
            rx.close();
            if let Err(_close) = sink.close() {
                #[cfg(feature = "tracing")]
                tracing::error!("Failed to close output after write error: {_close}");
            }
            return Err(e);
        }
        counter.advance();
    }

    // Wake any worker still waiting to push.
    rx.close();
    sink.close()?;

    #[cfg(feature = "tracing")]
    tracing::trace!("Writer stopped after {} records", counter.get());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Default)]
    struct Flaky {
        accepted: Vec<String>,
        fail_at: Option<usize>,
    }

    impl RecordSink for Flaky {
        fn append(&mut self, record: &PasswordRecord) -> Result<(), SinkError> {
            if self.fail_at == Some(self.accepted.len()) {
                return Err(io::Error::other("disk full").into());
            }
            self.accepted.push(record.password.clone());
            Ok(())
        }

        fn close(self) -> Result<(), SinkError> {
            Ok(())
        }
    }

    fn queue(records: &[&str]) -> mpsc::Receiver<PasswordRecord> {
        let (tx, rx) = mpsc::channel(records.len().max(1));
        for record in records {
            tx.try_send((*record).into()).unwrap();
        }
        rx
    }

    #[test]
    fn counts_every_accepted_record() {
        let counter = ProgressCounter::new();
        let shutdown = ShutdownCoordinator::new();
        let rx = queue(&["a", "b", "c"]);

        writer_loop(Flaky::default(), rx, &counter, &shutdown).unwrap();
        assert_eq!(counter.get(), 3);
        assert!(!shutdown.is_forced());
    }

    #[test]
    fn append_failure_stops_the_run() {
        let counter = ProgressCounter::new();
        let shutdown = ShutdownCoordinator::new();
        let rx = queue(&["a", "b", "c"]);
        let sink = Flaky {
            fail_at: Some(1),
            ..Flaky::default()
        };

        let err = writer_loop(sink, rx, &counter, &shutdown).unwrap_err();
        assert!(matches!(err, SinkError::Io(_)));
        assert_eq!(counter.get(), 1);
        assert!(shutdown.is_forced());
        assert!(!shutdown.was_interrupted());
    }

    #[test]
    fn forced_stop_drops_the_queue() {
        let counter = ProgressCounter::new();
        let shutdown = ShutdownCoordinator::new();
        let rx = queue(&["a", "b", "c"]);
        shutdown.interrupt();
        shutdown.interrupt();

        writer_loop(Flaky::default(), rx, &counter, &shutdown).unwrap();
        assert_eq!(counter.get(), 0);
    }
}
