use crate::{error::ExpandError, partition::Chunk, record::PasswordRecord};

/// Lazily produced records for one chunk.
///
/// An `Err` item aborts the rest of the chunk.
pub type RecordIter<'a> = Box<dyn Iterator<Item = Result<PasswordRecord, ExpandError>> + Send + 'a>;

/// A strategy for turning chunks into password records.
///
/// The pipeline never looks inside a generator: it asks for the population
/// of each length once while planning, then hands every worker whole chunks
/// to [`Generator::expand`]. Implementations must be safe to call from many
/// workers at once.
///
/// # Example
/// ```
/// use keyspace::{Chunk, ExpandError, Generator, PasswordRecord, RecordIter};
///
/// struct Digits;
///
/// impl Generator for Digits {
///     fn name(&self) -> &'static str {
///         "digits"
///     }
///
///     fn population(&self, length: usize) -> Option<u64> {
///         10_u64.checked_pow(length as u32)
///     }
///
///     fn expand(&self, chunk: Chunk) -> Result<RecordIter<'_>, ExpandError> {
///         Ok(Box::new((chunk.start..chunk.end).map(move |i| {
///             Ok::<_, ExpandError>(PasswordRecord::new(format!("{i:0width$}", width = chunk.length)))
///         })))
///     }
/// }
///
/// let records: Vec<_> = Digits
///     .expand(Chunk { length: 2, start: 7, end: 10 })
///     .unwrap()
///     .map(|r| r.unwrap().password)
///     .collect();
/// assert_eq!(records, ["07", "08", "09"]);
/// ```
pub trait Generator: Send + Sync {
    /// Short, stable name used in logs.
    fn name(&self) -> &'static str;

    /// Number of work units for `length`, or `None` if it does not fit in a
    /// `u64`.
    fn population(&self, length: usize) -> Option<u64>;

    /// Produces exactly `chunk.len()` records unless an error is yielded.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpandError`] if the chunk cannot be expanded at all.
    fn expand(&self, chunk: Chunk) -> Result<RecordIter<'_>, ExpandError>;
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn population(&self, length: usize) -> Option<u64> {
        (**self).population(length)
    }

    fn expand(&self, chunk: Chunk) -> Result<RecordIter<'_>, ExpandError> {
        (**self).expand(chunk)
    }
}
