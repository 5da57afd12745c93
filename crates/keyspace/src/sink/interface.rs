use crate::{error::SinkError, record::PasswordRecord};

/// The single output artifact of a run.
///
/// A sink is opened before the run starts and handed to the writer, which
/// becomes its only owner. The writer calls [`append`] once per record and
/// [`close`] exactly once, whether the run completed, was interrupted or
/// failed. An implementation must never leave a partially written record
/// behind after `close` returns.
///
/// [`append`]: RecordSink::append
/// [`close`]: RecordSink::close
pub trait RecordSink: Send {
    /// Serializes one record into the artifact.
    ///
    /// # Errors
    ///
    /// Any error is fatal to the run.
    fn append(&mut self, record: &PasswordRecord) -> Result<(), SinkError>;

    /// Flushes buffered output and finalizes the artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if buffered data could not be persisted.
    fn close(self) -> Result<(), SinkError>
    where
        Self: Sized;
}
