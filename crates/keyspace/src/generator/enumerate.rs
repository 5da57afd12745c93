use super::{Generator, RecordIter};
use crate::{
    alphabet::Alphabet, codec, error::ExpandError, partition::Chunk, record::PasswordRecord,
};

/// Exhaustive enumeration through the index codec.
///
/// Every ordinal of a chunk is expanded in increasing order, so two runs over
/// the same plan produce the same multiset of passwords.
#[derive(Clone, Debug)]
pub struct Enumerate {
    alphabet: Alphabet,
}

impl Enumerate {
    pub const fn new(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
}

impl Generator for Enumerate {
    fn name(&self) -> &'static str {
        "brute"
    }

    fn population(&self, length: usize) -> Option<u64> {
        codec::population(self.alphabet.len(), length)
    }

    fn expand(&self, chunk: Chunk) -> Result<RecordIter<'_>, ExpandError> {
        // An overflowing population can hold any u64 ordinal.
        if let Some(population) = self.population(chunk.length) {
            if chunk.end > population {
                return Err(ExpandError::ChunkOutOfRange { chunk, population });
            }
        }

        let length = chunk.length;
        Ok(Box::new((chunk.start..chunk.end).map(move |index| {
            Ok::<_, ExpandError>(PasswordRecord::new(codec::encode(
                index,
                length,
                &self.alphabet,
            )))
        })))
    }
}
