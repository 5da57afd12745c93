//! Splitting a length range into bounded, independently computable chunks.
//!
//! Every length class `L` contributes a population of `p(L)` work units
//! (`|alphabet|^L` ordinals for enumeration, a requested count for sampling
//! modes). The [`Partitioner`] cuts each population into half-open ranges of
//! at most `chunk_size` units, so no worker ever holds more than one chunk of
//! records in memory. Chunks are produced lazily and never overlap; together
//! they cover every unit exactly once.

use crate::error::ConfigError;
use core::{fmt, iter::FusedIterator, ops::RangeInclusive};

/// Inclusive range of password lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthRange {
    min: usize,
    max: usize,
}

impl LengthRange {
    /// Validates `1 <= min <= max <= ceiling`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvertedLengthRange`] if `min > max`.
    /// - [`ConfigError::LengthOutOfBounds`] if either end falls outside
    ///   `1..=ceiling`.
    pub fn new(min: usize, max: usize, ceiling: usize) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvertedLengthRange { min, max });
        }
        for length in [min, max] {
            if length == 0 || length > ceiling {
                return Err(ConfigError::LengthOutOfBounds {
                    length,
                    max: ceiling,
                });
            }
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub const fn min(&self) -> usize {
        self.min
    }

    #[inline]
    pub const fn max(&self) -> usize {
        self.max
    }

    #[inline]
    pub fn lengths(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }
}

/// A contiguous range of work units `[start, end)` within one length class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Chunk {
    pub length: usize,
    pub start: u64,
    pub end: u64,
}

impl Chunk {
    /// Number of work units covered by this chunk.
    #[inline]
    pub const fn len(&self) -> u64 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}[{}..{})", self.length, self.start, self.end)
    }
}

/// Deterministic plan for cutting a set of length classes into chunks.
///
/// The partitioner itself holds no cursor: [`Partitioner::chunks`] returns a
/// fresh iterator every time, always yielding the same sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partitioner {
    chunk_size: u64,
    classes: Vec<(usize, u64)>,
    total: u64,
}

impl Partitioner {
    /// Builds a partitioner over `(length, population)` classes, emitted in
    /// the order given.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroChunkSize`] if `chunk_size == 0`.
    /// - [`ConfigError::SpaceTooLarge`] if the summed population does not fit
    ///   in a `u64`.
    pub fn new(
        chunk_size: u64,
        classes: impl IntoIterator<Item = (usize, u64)>,
    ) -> Result<Self, ConfigError> {
        if chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }

        let classes: Vec<_> = classes.into_iter().collect();
        let total = classes
            .iter()
            .try_fold(0_u64, |acc, &(_, population)| acc.checked_add(population))
            .ok_or_else(|| ConfigError::SpaceTooLarge {
                reason: "total".to_string(),
                ceiling: u64::MAX,
            })?;

        Ok(Self {
            chunk_size,
            classes,
            total,
        })
    }

    #[inline]
    pub const fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Sum of all class populations.
    #[inline]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// `(length, population)` pairs in emission order.
    #[inline]
    pub fn classes(&self) -> &[(usize, u64)] {
        &self.classes
    }

    /// Number of chunks [`Partitioner::chunks`] will yield.
    pub fn chunk_count(&self) -> u64 {
        self.classes
            .iter()
            .map(|&(_, population)| population.div_ceil(self.chunk_size))
            .sum()
    }

    /// Returns a lazy iterator over all chunks, starting from the beginning.
    pub fn chunks(&self) -> Chunks {
        Chunks {
            chunk_size: self.chunk_size,
            classes: self.classes.clone(),
            class: 0,
            next_start: 0,
        }
    }
}

impl IntoIterator for Partitioner {
    type Item = Chunk;
    type IntoIter = Chunks;

    fn into_iter(self) -> Self::IntoIter {
        Chunks {
            chunk_size: self.chunk_size,
            classes: self.classes,
            class: 0,
            next_start: 0,
        }
    }
}

/// Iterator returned by [`Partitioner::chunks`].
#[derive(Clone, Debug)]
pub struct Chunks {
    chunk_size: u64,
    classes: Vec<(usize, u64)>,
    class: usize,
    next_start: u64,
}

impl Iterator for Chunks {
    type Item = Chunk;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let &(length, population) = self.classes.get(self.class)?;
            if self.next_start >= population {
                self.class += 1;
                self.next_start = 0;
                continue;
            }

            let start = self.next_start;
            let end = start.saturating_add(self.chunk_size).min(population);
            self.next_start = end;
            return Some(Chunk { length, start, end });
        }
    }
}

impl FusedIterator for Chunks {}
