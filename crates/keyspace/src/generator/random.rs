use super::{Generator, RandSource, RecordIter, ThreadRandom};
use crate::{alphabet::Alphabet, error::ExpandError, partition::Chunk, record::PasswordRecord};

/// Uniformly random passwords over an alphabet.
///
/// The chunk ordinal is ignored; each unit of work draws `length` fresh
/// symbols. Duplicates across the output are possible.
#[derive(Clone, Debug)]
pub struct RandomSampler<R = ThreadRandom> {
    alphabet: Alphabet,
    count: u64,
    rand: R,
}

impl RandomSampler {
    pub const fn new(alphabet: Alphabet, count: u64) -> Self {
        Self::with_rand(alphabet, count, ThreadRandom)
    }
}

impl<R: RandSource> RandomSampler<R> {
    pub const fn with_rand(alphabet: Alphabet, count: u64, rand: R) -> Self {
        Self {
            alphabet,
            count,
            rand,
        }
    }
}

/// Draws `length` symbols from `symbols`.
pub(crate) fn random_password<R: RandSource>(rand: &R, symbols: &[char], length: usize) -> String {
    (0..length).map(|_| rand.pick(symbols)).collect()
}

impl<R: RandSource> Generator for RandomSampler<R> {
    fn name(&self) -> &'static str {
        "random"
    }

    fn population(&self, _length: usize) -> Option<u64> {
        Some(self.count)
    }

    fn expand(&self, chunk: Chunk) -> Result<RecordIter<'_>, ExpandError> {
        let symbols = self.alphabet.symbols();
        Ok(Box::new((chunk.start..chunk.end).map(move |_| {
            Ok::<_, ExpandError>(PasswordRecord::new(random_password(
                &self.rand,
                symbols,
                chunk.length,
            )))
        })))
    }
}
