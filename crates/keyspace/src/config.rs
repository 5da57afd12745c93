//! Run configuration and its validation into an executable [`Plan`].

use crate::{
    alphabet::{Alphabet, Profile},
    analysis::{Analyzed, Analyzer},
    error::ConfigError,
    generator::{
        Enumerate, Generator, Hybrid, Mode, Passphrase, Pronounceable,
        RandomSampler,
    },
    partition::{LengthRange, Partitioner},
};
use core::{fmt, time::Duration};
use std::sync::Arc;

/// Longest password (or passphrase, in words) a run may request.
pub const MAX_LENGTH: usize = 1000;
/// Upper bound on concurrent workers.
pub const MAX_WORKERS: usize = 64;
pub const DEFAULT_CHUNK_SIZE: u64 = 10_000;
/// Default ceiling on the number of records a single run may produce.
pub const DEFAULT_MAX_TOTAL: u64 = 1_000_000_000_000;
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(100);
/// Passphrases generated per length when no count is given.
pub const DEFAULT_PASSPHRASE_COUNT: u64 = 1000;

/// Everything needed to describe a run, as supplied by the caller.
///
/// Nothing here is trusted until [`GenerationConfig::validate`] turns it into
/// a [`Plan`].
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationConfig {
    pub alphabet: Vec<char>,
    /// Drop `0 O 1 l I` from the alphabet.
    pub exclude_ambiguous: bool,
    pub min_length: usize,
    pub max_length: usize,
    pub chunk_size: u64,
    pub workers: usize,
    /// Sink queue capacity. Defaults to twice the worker count.
    pub queue_capacity: Option<usize>,
    pub mode: Mode,
    /// Records per length for sampling modes. Ignored by [`Mode::Brute`];
    /// [`Mode::Passphrase`] falls back to [`DEFAULT_PASSPHRASE_COUNT`].
    pub count: Option<u64>,
    /// Word list for [`Mode::Passphrase`]; `None` uses the built-in list.
    pub words: Option<Vec<String>>,
    pub separator: String,
    /// Attach entropy and strength metadata to every record.
    pub analyze: bool,
    pub max_total: u64,
    pub progress_interval: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            alphabet: Profile::Standard.alphabet().symbols().to_vec(),
            exclude_ambiguous: false,
            min_length: 1,
            max_length: 4,
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: 4,
            queue_capacity: None,
            mode: Mode::Brute,
            count: None,
            words: None,
            separator: "-".to_string(),
            analyze: false,
            max_total: DEFAULT_MAX_TOTAL,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl GenerationConfig {
    /// Validates the configuration and builds the generator for its mode.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found. Nothing is started or
    /// created before this succeeds.
    pub fn validate(&self) -> Result<Plan, ConfigError> {
        let alphabet = self.alphabet()?;
        let generator = self.generator(&alphabet)?;
        self.plan(alphabet, generator)
    }

    /// Like [`validate`](Self::validate), but runs `generator` instead of the
    /// one selected by [`mode`](Self::mode).
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate_with(&self, generator: Arc<dyn Generator>) -> Result<Plan, ConfigError> {
        let alphabet = self.alphabet()?;
        self.plan(alphabet, generator)
    }

    fn alphabet(&self) -> Result<Alphabet, ConfigError> {
        let alphabet = Alphabet::new(self.alphabet.iter().copied())?;
        if self.exclude_ambiguous {
            alphabet.without_ambiguous()
        } else {
            Ok(alphabet)
        }
    }

    fn sample_count(&self) -> Result<u64, ConfigError> {
        match (self.count, self.mode) {
            (Some(count), _) if count > 0 => Ok(count),
            (None, Mode::Passphrase) => Ok(DEFAULT_PASSPHRASE_COUNT),
            _ => Err(ConfigError::MissingCount {
                mode: self.mode.name(),
            }),
        }
    }

    fn generator(&self, alphabet: &Alphabet) -> Result<Arc<dyn Generator>, ConfigError> {
        let base: Box<dyn Generator> = match self.mode {
            Mode::Brute => Box::new(Enumerate::new(alphabet.clone())),
            Mode::Random => Box::new(RandomSampler::new(alphabet.clone(), self.sample_count()?)),
            Mode::Pronounceable => Box::new(Pronounceable::new(self.sample_count()?)),
            Mode::Hybrid => Box::new(Hybrid::new(alphabet.clone(), self.sample_count()?)),
            Mode::Passphrase => {
                let count = self.sample_count()?;
                match &self.words {
                    Some(words) => Box::new(Passphrase::new(
                        words.clone(),
                        self.separator.clone(),
                        count,
                    )?),
                    None => Box::new(Passphrase::builtin(self.separator.clone(), count)),
                }
            }
        };

        Ok(if self.analyze {
            Arc::new(Analyzed::new(base, Analyzer::new(alphabet.len())))
        } else {
            Arc::from(base)
        })
    }

    fn plan(&self, alphabet: Alphabet, generator: Arc<dyn Generator>) -> Result<Plan, ConfigError> {
        let lengths = LengthRange::new(self.min_length, self.max_length, MAX_LENGTH)?;
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(ConfigError::WorkerCount {
                workers: self.workers,
                max: MAX_WORKERS,
            });
        }
        let queue_capacity = match self.queue_capacity {
            Some(0) => return Err(ConfigError::ZeroQueueCapacity),
            Some(capacity) => capacity,
            None => self.workers * 2,
        };

        let mut classes = Vec::with_capacity(lengths.max() - lengths.min() + 1);
        let mut total = 0_u64;
        for length in lengths.lengths() {
            let population = generator
                .population(length)
                .filter(|&p| p <= self.max_total)
                .ok_or_else(|| ConfigError::SpaceTooLarge {
                    reason: format!("for length {length}"),
                    ceiling: self.max_total,
                })?;
            total = total
                .checked_add(population)
                .filter(|&t| t <= self.max_total)
                .ok_or_else(|| ConfigError::SpaceTooLarge {
                    reason: format!("for lengths {}..={length}", lengths.min()),
                    ceiling: self.max_total,
                })?;
            classes.push((length, population));
        }
        let partitioner = Partitioner::new(self.chunk_size, classes)?;

        Ok(Plan {
            alphabet,
            lengths,
            partitioner,
            workers: self.workers,
            queue_capacity,
            generator,
            mode: self.mode,
            progress_interval: self.progress_interval,
        })
    }
}

/// A validated, ready-to-run configuration.
#[derive(Clone)]
pub struct Plan {
    alphabet: Alphabet,
    lengths: LengthRange,
    partitioner: Partitioner,
    workers: usize,
    queue_capacity: usize,
    generator: Arc<dyn Generator>,
    mode: Mode,
    progress_interval: Duration,
}

impl Plan {
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub const fn lengths(&self) -> LengthRange {
        self.lengths
    }

    pub fn partitioner(&self) -> &Partitioner {
        &self.partitioner
    }

    /// Number of records a complete run produces.
    pub const fn total(&self) -> u64 {
        self.partitioner.total()
    }

    pub const fn workers(&self) -> usize {
        self.workers
    }

    pub const fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    pub fn generator(&self) -> &Arc<dyn Generator> {
        &self.generator
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn progress_interval(&self) -> Duration {
        self.progress_interval
    }
}

impl fmt::Debug for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plan")
            .field("alphabet", &self.alphabet.to_string())
            .field("lengths", &self.lengths)
            .field("total", &self.total())
            .field("chunks", &self.partitioner.chunk_count())
            .field("workers", &self.workers)
            .field("queue_capacity", &self.queue_capacity)
            .field("generator", &self.generator.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::Chunk;

    fn config(alphabet: &str, min: usize, max: usize) -> GenerationConfig {
        GenerationConfig {
            alphabet: alphabet.chars().collect(),
            min_length: min,
            max_length: max,
            ..GenerationConfig::default()
        }
    }

    #[test]
    fn validates_a_brute_force_plan() {
        let plan = GenerationConfig {
            chunk_size: 3,
            workers: 2,
            ..config("ab", 1, 2)
        }
        .validate()
        .unwrap();

        assert_eq!(plan.total(), 6);
        assert_eq!(plan.partitioner().chunk_count(), 3);
        assert_eq!(plan.queue_capacity(), 4);
        assert_eq!(plan.generator().name(), "brute");
        assert_eq!(plan.lengths().lengths().collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn rejects_inverted_range() {
        assert_eq!(
            config("ab", 5, 1).validate().unwrap_err(),
            ConfigError::InvertedLengthRange { min: 5, max: 1 }
        );
    }

    #[test]
    fn rejects_bad_alphabets() {
        assert_eq!(
            config("", 1, 2).validate().unwrap_err(),
            ConfigError::EmptyAlphabet
        );
        assert_eq!(
            config("abca", 1, 2).validate().unwrap_err(),
            ConfigError::DuplicateSymbol { symbol: 'a' }
        );
        let only_ambiguous = GenerationConfig {
            exclude_ambiguous: true,
            ..config("0O1lI", 1, 2)
        };
        assert_eq!(
            only_ambiguous.validate().unwrap_err(),
            ConfigError::EmptyAlphabet
        );
    }

    #[test]
    fn excludes_ambiguous_symbols() {
        let plan = GenerationConfig {
            exclude_ambiguous: true,
            ..config("a0b1c", 1, 1)
        }
        .validate()
        .unwrap();
        assert_eq!(plan.alphabet().to_string(), "abc");
        assert_eq!(plan.total(), 3);
    }

    #[test]
    fn rejects_bad_execution_settings() {
        let base = config("ab", 1, 2);
        let rejected = |config: GenerationConfig| config.validate().unwrap_err();

        assert_eq!(
            rejected(GenerationConfig {
                chunk_size: 0,
                ..base.clone()
            }),
            ConfigError::ZeroChunkSize
        );
        assert_eq!(
            rejected(GenerationConfig {
                workers: 0,
                ..base.clone()
            }),
            ConfigError::WorkerCount {
                workers: 0,
                max: MAX_WORKERS
            }
        );
        assert_eq!(
            rejected(GenerationConfig {
                workers: MAX_WORKERS + 1,
                ..base.clone()
            }),
            ConfigError::WorkerCount {
                workers: MAX_WORKERS + 1,
                max: MAX_WORKERS
            }
        );
        assert_eq!(
            rejected(GenerationConfig {
                queue_capacity: Some(0),
                ..base
            }),
            ConfigError::ZeroQueueCapacity
        );
    }

    #[test]
    fn rejects_oversized_spaces() {
        let printable: String = (' '..='~').collect();
        assert!(matches!(
            config(&printable, 1, 10).validate(),
            Err(ConfigError::SpaceTooLarge {
                ceiling: DEFAULT_MAX_TOTAL,
                ..
            })
        ));
        // Overflows u64 outright.
        assert!(matches!(
            config("ab", 60, 70).validate(),
            Err(ConfigError::SpaceTooLarge { .. })
        ));
        let capped = GenerationConfig {
            max_total: 5,
            ..config("ab", 1, 2)
        };
        assert_eq!(
            capped.validate().unwrap_err(),
            ConfigError::SpaceTooLarge {
                reason: "for lengths 1..=2".to_string(),
                ceiling: 5
            }
        );
    }

    #[test]
    fn sampling_modes_need_a_count() {
        let counted = [Mode::Random, Mode::Pronounceable, Mode::Hybrid];
        for mode in counted {
            let missing = GenerationConfig {
                mode,
                ..config("abc", 1, 3)
            };
            assert_eq!(
                missing.validate().unwrap_err(),
                ConfigError::MissingCount { mode: mode.name() }
            );

            let plan = GenerationConfig {
                count: Some(5),
                ..missing
            }
            .validate()
            .unwrap();
            assert_eq!(plan.total(), 15, "{mode}");
            assert_eq!(plan.generator().name(), mode.name());
        }
    }

    #[test]
    fn passphrases_have_a_default_count() {
        let passphrase = GenerationConfig {
            mode: Mode::Passphrase,
            ..config("abc", 3, 4)
        };
        let plan = passphrase.clone().validate().unwrap();
        assert_eq!(plan.total(), 2 * DEFAULT_PASSPHRASE_COUNT);
        assert_eq!(plan.generator().name(), "passphrase");

        let zero = GenerationConfig {
            count: Some(0),
            ..passphrase
        };
        assert_eq!(
            zero.validate().unwrap_err(),
            ConfigError::MissingCount { mode: "passphrase" }
        );
    }

    #[test]
    fn passphrase_word_lists() {
        let empty = GenerationConfig {
            mode: Mode::Passphrase,
            count: Some(1),
            words: Some(Vec::new()),
            ..config("abc", 2, 2)
        };
        assert_eq!(empty.validate().unwrap_err(), ConfigError::EmptyWordList);

        let plan = GenerationConfig {
            words: Some(vec!["solo".to_string()]),
            separator: "+".to_string(),
            ..empty
        }
        .validate()
        .unwrap();
        let phrase = plan
            .generator()
            .expand(Chunk {
                length: 2,
                start: 0,
                end: 1,
            })
            .unwrap()
            .next()
            .unwrap()
            .unwrap()
            .password;
        assert!(phrase.to_lowercase().starts_with("solo+solo"), "{phrase}");
    }

    #[test]
    fn analyze_wraps_the_generator() {
        let plan = GenerationConfig {
            analyze: true,
            ..config("ab", 2, 2)
        }
        .validate()
        .unwrap();
        let record = plan
            .generator()
            .expand(Chunk {
                length: 2,
                start: 0,
                end: 1,
            })
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(record.password, "aa");
        assert_eq!(record.metadata.unwrap()["strength"], "very_weak");
    }
}
