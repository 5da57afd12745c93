//! Optional strength annotations.
//!
//! [`Analyzed`] wraps any [`Generator`] and attaches entropy, a strength
//! label and a crack-time estimate to every record it produces. The pipeline
//! forwards that metadata without looking at it.

use crate::{
    error::ExpandError,
    generator::{Generator, RecordIter},
    partition::Chunk,
    record::Metadata,
};
use core::fmt;
use serde::Serialize;
use serde_json::Value;

/// Guesses per second assumed by [`time_to_crack`].
const GUESSES_PER_SECOND: f64 = 1_000_000_000.0;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const YEAR: f64 = 31_536_000.0;

/// Coarse strength buckets by entropy in bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
}

impl Strength {
    pub fn from_entropy(bits: f64) -> Self {
        match bits {
            b if b >= 95.0 => Self::VeryStrong,
            b if b >= 80.0 => Self::Strong,
            b if b >= 65.0 => Self::Good,
            b if b >= 50.0 => Self::Fair,
            b if b >= 35.0 => Self::Weak,
            _ => Self::VeryWeak,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryWeak => "very_weak",
            Self::Weak => "weak",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Strong => "strong",
            Self::VeryStrong => "very_strong",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strength figures for one password.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    pub entropy: f64,
    pub strength: Strength,
    pub time_to_crack: String,
}

impl Analysis {
    /// Metadata keys, in output order: `entropy`, `strength`, `time_to_crack`.
    pub fn into_metadata(self) -> Metadata {
        let mut map = Metadata::new();
        // Two decimals, matching what the text formats print.
        let entropy = (self.entropy * 100.0).round() / 100.0;
        map.insert(
            "entropy".to_string(),
            serde_json::Number::from_f64(entropy).map_or(Value::Null, Value::Number),
        );
        map.insert(
            "strength".to_string(),
            Value::String(self.strength.as_str().to_string()),
        );
        map.insert(
            "time_to_crack".to_string(),
            Value::String(self.time_to_crack),
        );
        map
    }
}

/// Scores passwords drawn from a character set of a known size.
#[derive(Clone, Copy, Debug)]
pub struct Analyzer {
    charset_size: usize,
}

impl Analyzer {
    pub const fn new(charset_size: usize) -> Self {
        Self { charset_size }
    }

    /// `length * log2(charset_size)`, zero for empty input.
    pub fn entropy(&self, password: &str) -> f64 {
        let length = password.chars().count();
        if length == 0 || self.charset_size == 0 {
            return 0.0;
        }
        length as f64 * (self.charset_size as f64).log2()
    }

    pub fn analyze(&self, password: &str) -> Analysis {
        let entropy = self.entropy(password);
        Analysis {
            entropy,
            strength: Strength::from_entropy(entropy),
            time_to_crack: time_to_crack(entropy),
        }
    }
}

/// Average-case brute-force time for `entropy` bits, rendered for humans.
pub fn time_to_crack(entropy: f64) -> String {
    let seconds = entropy.exp2() / 2.0 / GUESSES_PER_SECOND;

    if seconds < 1.0 {
        "< 1 second".to_string()
    } else if seconds < MINUTE {
        format!("{seconds:.1} seconds")
    } else if seconds < HOUR {
        format!("{:.1} minutes", seconds / MINUTE)
    } else if seconds < DAY {
        format!("{:.1} hours", seconds / HOUR)
    } else if seconds < YEAR {
        format!("{:.1} days", seconds / DAY)
    } else {
        format!("{:.1} years", seconds / YEAR)
    }
}

/// A [`Generator`] decorator that attaches [`Analysis`] metadata.
#[derive(Clone, Debug)]
pub struct Analyzed<G> {
    inner: G,
    analyzer: Analyzer,
}

impl<G: Generator> Analyzed<G> {
    pub const fn new(inner: G, analyzer: Analyzer) -> Self {
        Self { inner, analyzer }
    }
}

impl<G: Generator> Generator for Analyzed<G> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn population(&self, length: usize) -> Option<u64> {
        self.inner.population(length)
    }

    fn expand(&self, chunk: Chunk) -> Result<RecordIter<'_>, ExpandError> {
        let analyzer = self.analyzer;
        let records = self.inner.expand(chunk)?;
        Ok(Box::new(records.map(move |record| {
            record.map(|record| {
                let metadata = analyzer.analyze(&record.password).into_metadata();
                record.with_metadata(metadata)
            })
        })))
    }
}
