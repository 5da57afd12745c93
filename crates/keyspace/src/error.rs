//! Error types for the generation pipeline.
//!
//! Errors are split by how far they are allowed to travel:
//!
//! - [`ConfigError`]: rejected before any worker starts or any artifact is
//!   created.
//! - [`ExpandError`]: local to a single chunk. Logged, tallied in the
//!   [`crate::RunReport`], and otherwise swallowed.
//! - [`SinkError`]: the artifact can no longer be trusted. Fatal to the run.
//!
//! [`Error`] unifies them for callers that drive a whole run.

use crate::partition::Chunk;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Unified error type for a generation run.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The configuration was rejected during validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The output sink failed to open, append, or close.
    #[error("output error: {0}")]
    Sink(#[from] SinkError),
}

/// A configuration that cannot be turned into a runnable plan.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,

    #[error("alphabet contains duplicate symbol {symbol:?}")]
    DuplicateSymbol { symbol: char },

    #[error("minimum length {min} is greater than maximum length {max}")]
    InvertedLengthRange { min: usize, max: usize },

    #[error("length {length} is outside the supported range 1..={max}")]
    LengthOutOfBounds { length: usize, max: usize },

    #[error("chunk size must be greater than 0")]
    ZeroChunkSize,

    #[error("worker count {workers} is outside the supported range 1..={max}")]
    WorkerCount { workers: usize, max: usize },

    #[error("queue capacity must be greater than 0")]
    ZeroQueueCapacity,

    #[error("mode `{mode}` requires a password count greater than 0")]
    MissingCount { mode: &'static str },

    #[error("unknown generation mode `{name}`")]
    UnknownMode { name: String },

    #[error("unknown character profile `{name}`")]
    UnknownProfile { name: String },

    #[error("word list is empty")]
    EmptyWordList,

    #[error("search space {reason} exceeds the configured ceiling of {ceiling}")]
    SpaceTooLarge { reason: String, ceiling: u64 },
}

/// A failure while expanding one chunk into records.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum ExpandError {
    /// The chunk does not fit inside the population of its length.
    #[error("chunk {chunk} exceeds population {population}")]
    ChunkOutOfRange { chunk: Chunk, population: u64 },

    /// The generator panicked partway through the chunk.
    #[error("generator panicked: {0}")]
    Panicked(String),

    /// Catch-all for generator specific failures.
    #[error("{0}")]
    Other(String),
}

/// A failure of the output artifact.
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
