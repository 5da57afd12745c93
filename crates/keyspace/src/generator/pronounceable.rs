use super::{Generator, RandSource, RecordIter, ThreadRandom};
use crate::{error::ExpandError, partition::Chunk, record::PasswordRecord};

const CONSONANTS: &[char] = &[
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'q', 'r', 's', 't', 'v', 'w', 'x',
    'y', 'z',
];
const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];
const LETTERS: &[char] = &[
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'q', 'r', 's', 't', 'v', 'w', 'x',
    'y', 'z', 'a', 'e', 'i', 'o', 'u',
];
const ACCENTS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '!', '@', '#', '$'];

/// Passwords longer than this get one symbol swapped for a digit or sign.
const ACCENT_THRESHOLD: usize = 6;

/// Passwords built from consonant-vowel syllables.
#[derive(Clone, Debug)]
pub struct Pronounceable<R = ThreadRandom> {
    count: u64,
    rand: R,
}

impl Pronounceable {
    pub const fn new(count: u64) -> Self {
        Self::with_rand(count, ThreadRandom)
    }
}

impl<R: RandSource> Pronounceable<R> {
    pub const fn with_rand(count: u64, rand: R) -> Self {
        Self { count, rand }
    }
}

/// Builds a `length` symbol password from syllables.
///
/// Whole syllables are appended while they fit; an odd tail is filled with
/// random letters.
pub(crate) fn pronounceable_password<R: RandSource>(rand: &R, length: usize) -> String {
    let mut out: Vec<char> = Vec::with_capacity(length);

    while out.len() + 2 <= length {
        out.push(rand.pick(CONSONANTS));
        out.push(rand.pick(VOWELS));
    }
    while out.len() < length {
        out.push(rand.pick(LETTERS));
    }

    if length > ACCENT_THRESHOLD {
        let pos = rand.below(out.len());
        out[pos] = rand.pick(ACCENTS);
    }

    out.into_iter().collect()
}

impl<R: RandSource> Generator for Pronounceable<R> {
    fn name(&self) -> &'static str {
        "pronounceable"
    }

    fn population(&self, _length: usize) -> Option<u64> {
        Some(self.count)
    }

    fn expand(&self, chunk: Chunk) -> Result<RecordIter<'_>, ExpandError> {
        Ok(Box::new((chunk.start..chunk.end).map(move |_| {
            Ok::<_, ExpandError>(PasswordRecord::new(pronounceable_password(
                &self.rand,
                chunk.length,
            )))
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::rand::StepRandom;

    #[test]
    fn alternates_consonants_and_vowels() {
        let rand = ThreadRandom;
        for _ in 0..100 {
            let password: Vec<char> = pronounceable_password(&rand, 6).chars().collect();
            assert_eq!(password.len(), 6);
            for pair in password.chunks(2) {
                assert!(CONSONANTS.contains(&pair[0]));
                assert!(VOWELS.contains(&pair[1]));
            }
        }
    }

    #[test]
    fn odd_length_gets_a_letter_tail() {
        let password: Vec<char> = pronounceable_password(&ThreadRandom, 5).chars().collect();
        assert_eq!(password.len(), 5);
        assert!(LETTERS.contains(&password[4]));
    }

    #[test]
    fn long_passwords_get_one_accent() {
        let rand = StepRandom::default();
        let password = pronounceable_password(&rand, 8);
        assert_eq!(password.chars().count(), 8);
        let accents = password.chars().filter(|c| ACCENTS.contains(c)).count();
        assert_eq!(accents, 1);
    }

    #[test]
    fn short_passwords_have_no_accent() {
        for length in 1..=ACCENT_THRESHOLD {
            let password = pronounceable_password(&ThreadRandom, length);
            assert_eq!(password.chars().count(), length);
            assert!(password.chars().all(|c| LETTERS.contains(&c)));
        }
    }

    #[test]
    fn expands_one_record_per_unit() {
        let generator = Pronounceable::new(3);
        let chunk = Chunk {
            length: 10,
            start: 0,
            end: 3,
        };
        assert_eq!(generator.expand(chunk).unwrap().count(), 3);
    }
}
