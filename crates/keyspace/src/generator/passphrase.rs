use super::{Generator, RandSource, RecordIter, ThreadRandom};
use crate::{
    error::{ConfigError, ExpandError},
    partition::Chunk,
    record::PasswordRecord,
};

/// Word list used when no file is supplied.
pub const BUILTIN_WORDS: &[&str] = &[
    "correct",
    "horse",
    "battery",
    "staple",
    "mountain",
    "river",
    "forest",
    "ocean",
    "thunder",
    "lightning",
    "shadow",
    "phantom",
    "cyber",
    "quantum",
    "matrix",
    "nexus",
    "vertex",
    "zenith",
    "alpha",
    "beta",
    "gamma",
    "delta",
];

/// Exclusive upper bound of the number occasionally appended to a phrase.
const SUFFIX_BOUND: usize = 100;

/// Splits word-list text into trimmed, non-empty, non-comment lines.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Word-list concatenation.
///
/// For this mode the "length" of a record is its number of words. Each word
/// is capitalized with probability one half, and half of the phrases get a
/// number below 100 appended as an extra segment.
#[derive(Clone, Debug)]
pub struct Passphrase<R = ThreadRandom> {
    words: Vec<String>,
    separator: String,
    count: u64,
    rand: R,
}

impl Passphrase {
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyWordList`] if `words` is empty.
    pub fn new(words: Vec<String>, separator: String, count: u64) -> Result<Self, ConfigError> {
        Self::with_rand(words, separator, count, ThreadRandom)
    }

    /// A generator over [`BUILTIN_WORDS`].
    pub fn builtin(separator: String, count: u64) -> Self {
        Self {
            words: BUILTIN_WORDS.iter().map(|w| (*w).to_string()).collect(),
            separator,
            count,
            rand: ThreadRandom,
        }
    }
}

impl<R: RandSource> Passphrase<R> {
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyWordList`] if `words` is empty.
    pub fn with_rand(
        words: Vec<String>,
        separator: String,
        count: u64,
        rand: R,
    ) -> Result<Self, ConfigError> {
        if words.is_empty() {
            return Err(ConfigError::EmptyWordList);
        }
        Ok(Self {
            words,
            separator,
            count,
            rand,
        })
    }

    fn phrase(&self, word_count: usize) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(word_count + 1);
        for _ in 0..word_count {
            let word = &self.words[self.rand.below(self.words.len())];
            parts.push(if self.rand.coin() {
                capitalize(word)
            } else {
                word.clone()
            });
        }
        if self.rand.coin() {
            parts.push(self.rand.below(SUFFIX_BOUND).to_string());
        }
        parts.join(&self.separator)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl<R: RandSource> Generator for Passphrase<R> {
    fn name(&self) -> &'static str {
        "passphrase"
    }

    fn population(&self, _length: usize) -> Option<u64> {
        Some(self.count)
    }

    fn expand(&self, chunk: Chunk) -> Result<RecordIter<'_>, ExpandError> {
        Ok(Box::new((chunk.start..chunk.end).map(move |_| {
            Ok::<_, ExpandError>(PasswordRecord::new(self.phrase(chunk.length)))
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::rand::StepRandom;

    #[test]
    fn parses_word_lists() {
        let words = parse_word_list("alpha\n\n  beta  \n# comment\r\ngamma\r\n");
        assert_eq!(words, ["alpha", "beta", "gamma"]);
    }

    #[test]
    fn rejects_empty_word_list() {
        assert_eq!(
            Passphrase::new(Vec::new(), "-".into(), 1).err(),
            Some(ConfigError::EmptyWordList)
        );
    }

    #[test]
    fn capitalizes_first_letter_only() {
        assert_eq!(capitalize("shadow"), "Shadow");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn joins_the_requested_number_of_words() {
        let generator = Passphrase::builtin("-".to_string(), 20);
        let chunk = Chunk {
            length: 4,
            start: 0,
            end: 20,
        };
        for record in generator.expand(chunk).unwrap() {
            let phrase = record.unwrap().password;
            let parts: Vec<&str> = phrase.split('-').collect();
            assert!(parts.len() == 4 || parts.len() == 5, "{phrase}");
            for word in &parts[..4] {
                assert!(BUILTIN_WORDS.contains(&word.to_lowercase().as_str()));
            }
            if let Some(suffix) = parts.get(4) {
                assert!(suffix.parse::<usize>().unwrap() < SUFFIX_BOUND);
            }
        }
    }

    #[test]
    fn deterministic_with_step_source() {
        let words = vec!["red".to_string(), "green".to_string(), "blue".to_string()];
        let generator = Passphrase::with_rand(words, " ".into(), 1, StepRandom::default()).unwrap();
        // below(3)=0 -> red, coin -> 1 -> "Red"; below(3)=2 -> blue, coin -> 1 -> "Blue";
        // coin -> 0 -> no suffix.
        assert_eq!(generator.phrase(2), "Red Blue");
    }
}
