use super::{
    Generator, RandSource, RecordIter, ThreadRandom, pronounceable::pronounceable_password,
    random::random_password,
};
use crate::{alphabet::Alphabet, error::ExpandError, partition::Chunk, record::PasswordRecord};

/// A pronounceable half and a random half, shuffled together.
#[derive(Clone, Debug)]
pub struct Hybrid<R = ThreadRandom> {
    alphabet: Alphabet,
    count: u64,
    rand: R,
}

impl Hybrid {
    pub const fn new(alphabet: Alphabet, count: u64) -> Self {
        Self::with_rand(alphabet, count, ThreadRandom)
    }
}

impl<R: RandSource> Hybrid<R> {
    pub const fn with_rand(alphabet: Alphabet, count: u64, rand: R) -> Self {
        Self {
            alphabet,
            count,
            rand,
        }
    }

    fn password(&self, length: usize) -> String {
        let base = pronounceable_password(&self.rand, length / 2);
        let suffix = random_password(&self.rand, self.alphabet.symbols(), length - length / 2);

        let mut combined: Vec<char> = base.chars().chain(suffix.chars()).collect();
        self.rand.shuffle(&mut combined);
        combined.into_iter().collect()
    }
}

impl<R: RandSource> Generator for Hybrid<R> {
    fn name(&self) -> &'static str {
        "hybrid"
    }

    fn population(&self, _length: usize) -> Option<u64> {
        Some(self.count)
    }

    fn expand(&self, chunk: Chunk) -> Result<RecordIter<'_>, ExpandError> {
        Ok(Box::new((chunk.start..chunk.end).map(move |_| {
            Ok::<_, ExpandError>(PasswordRecord::new(self.password(chunk.length)))
        })))
    }
}
