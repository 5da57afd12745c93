use crate::error::ConfigError;
use core::{fmt, str::FromStr};

/// Selectable generation strategy.
///
/// Only [`Mode::Brute`] is a bijection over the space; the other modes are
/// sampling modes and need an explicit per-length count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Every string of every length in range, via the index codec.
    #[default]
    Brute,
    /// Uniformly random symbols from the alphabet.
    Random,
    /// Consonant-vowel syllables.
    Pronounceable,
    /// Words drawn from a word list; length counts words.
    Passphrase,
    /// Pronounceable half plus random half, shuffled.
    Hybrid,
}

impl Mode {
    pub const ALL: [Self; 5] = [
        Self::Brute,
        Self::Random,
        Self::Pronounceable,
        Self::Passphrase,
        Self::Hybrid,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Brute => "brute",
            Self::Random => "random",
            Self::Pronounceable => "pronounceable",
            Self::Passphrase => "passphrase",
            Self::Hybrid => "hybrid",
        }
    }

    /// Whether the mode draws from a random source instead of enumerating.
    pub const fn is_sampling(self) -> bool {
        !matches!(self, Self::Brute)
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownMode {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(mode.name().parse::<Mode>(), Ok(mode));
        }
    }

    #[test]
    fn unknown_mode_fails_fast() {
        assert_eq!(
            "markov".parse::<Mode>(),
            Err(ConfigError::UnknownMode {
                name: "markov".to_string()
            })
        );
    }

    #[test]
    fn only_brute_enumerates() {
        assert!(!Mode::Brute.is_sampling());
        assert!(Mode::ALL[1..].iter().all(|m| m.is_sampling()));
    }
}
