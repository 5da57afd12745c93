//! Generation strategies.
//!
//! Every strategy implements [`Generator`]: given a chunk, produce its
//! records. The pipeline only decides *which* chunk a worker gets; the
//! generator decides *what* that chunk turns into.

mod enumerate;
mod hybrid;
mod interface;
mod mode;
mod passphrase;
mod pronounceable;
pub(crate) mod rand;
mod random;

pub use enumerate::*;
pub use hybrid::*;
pub use interface::*;
pub use mode::*;
pub use passphrase::{BUILTIN_WORDS, Passphrase, parse_word_list};
pub use pronounceable::Pronounceable;
pub use self::rand::{RandSource, ThreadRandom};
pub use random::RandomSampler;
