use crate::error::ConfigError;
use core::{fmt, str::FromStr};

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const BASIC_SPECIAL: &str = "!@#$%^&*";
const EXTENDED_SPECIAL: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?`~";
const CUSTOM_SPECIAL: &str = "@#%&*$!?";
/// Mathematical operators, split where the `military` profile stops.
const MATH_HEAD: &str = "∀∂∃∄∅∆∇∈∉∋∌∎∏∐∑−∓∔∕∖∗∘∙√∛∜∝∞∟∠∡∢∣∤∥∦∧∨∩∪∫∬∭∮∯∰∱∲∳∴";
const MATH_TAIL: &str = "∵∶∷∸∹∺∻∼∽∾∿≀≁≂≃≄≅≆≇≈≉≊≋≌≍≎≏≐≑≒≓≔≕≖≗≘≙≚≛≜≝≞≟≠≡≢≣≤≥≦≧≨≩≪≫≬≭≮≯≰≱≲≳≴≵≶≷≸≹≺≻≼≽≾≿⊀⊁⊂⊃⊄⊅⊆⊇⊈⊉⊊⊋⊌⊍⊎⊏⊐⊑⊒⊓⊔⊕⊖⊗⊘⊙⊚⊛⊜⊝⊞⊟⊠⊡⊢⊣⊤⊥⊦⊧⊨⊩⊪⊫⊬⊭⊮⊯⊰⊱⊲⊳⊴⊵⊶⊷⊸⊹⊺⊻⊼⊽⊾⊿⋀⋁⋂⋃⋄⋅⋆⋇⋈⋉⋊⋋⋌⋍⋎⋏⋐⋑⋒⋓⋔⋕⋖⋗⋘⋙⋚⋛⋜⋝⋞⋟⋠⋡⋢⋣⋤⋥⋦⋧⋨⋩⋪⋫⋬⋭⋮⋯⋰⋱⋲⋳⋴⋵⋶⋷⋸⋹⋺⋻⋼⋽⋾⋿";

/// Symbols that are easy to confuse when read back by a human.
pub const AMBIGUOUS: &[char] = &['0', 'O', '1', 'l', 'I'];

/// An ordered set of unique symbols.
///
/// The position of a symbol is its digit value in the index codec, so
/// `symbols[0]` acts as zero. An `Alphabet` can only be built through
/// [`Alphabet::new`], which rejects empty and duplicated input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Builds an alphabet from `symbols`, preserving their order.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyAlphabet`] if `symbols` is empty.
    /// - [`ConfigError::DuplicateSymbol`] on the first repeated symbol.
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Result<Self, ConfigError> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        for (i, symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(symbol) {
                return Err(ConfigError::DuplicateSymbol { symbol: *symbol });
            }
        }
        Ok(Self { symbols })
    }

    /// Returns a copy of this alphabet without the [`AMBIGUOUS`] symbols.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAlphabet`] if nothing is left.
    pub fn without_ambiguous(&self) -> Result<Self, ConfigError> {
        Self::new(
            self.symbols
                .iter()
                .copied()
                .filter(|c| !AMBIGUOUS.contains(c)),
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[inline]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    #[inline]
    pub fn symbol(&self, digit: usize) -> char {
        self.symbols[digit]
    }

    /// Digit value of `symbol`, if it belongs to this alphabet.
    pub fn digit(&self, symbol: char) -> Option<usize> {
        self.symbols.iter().position(|&c| c == symbol)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.symbols {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Named character-set presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
    /// Lowercase letters and digits.
    Basic,
    /// Letters and digits.
    Standard,
    /// Letters, digits and common symbols.
    Advanced,
    /// Letters, digits and the extended symbol set.
    Elite,
    /// The elite set plus 50 mathematical operators.
    Military,
    /// The elite set plus every mathematical operator.
    Alien,
    /// Letters, digits and `@#%&*$!?`.
    Custom,
}

impl Profile {
    pub const ALL: [Self; 7] = [
        Self::Basic,
        Self::Standard,
        Self::Advanced,
        Self::Elite,
        Self::Military,
        Self::Alien,
        Self::Custom,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Advanced => "advanced",
            Self::Elite => "elite",
            Self::Military => "military",
            Self::Alien => "alien",
            Self::Custom => "custom",
        }
    }

    pub fn alphabet(self) -> Alphabet {
        let parts: &[&str] = match self {
            Self::Basic => &[LOWER, DIGITS],
            Self::Standard => &[LOWER, UPPER, DIGITS],
            Self::Advanced => &[LOWER, UPPER, DIGITS, BASIC_SPECIAL],
            Self::Elite => &[LOWER, UPPER, DIGITS, EXTENDED_SPECIAL],
            Self::Military => &[LOWER, UPPER, DIGITS, EXTENDED_SPECIAL, MATH_HEAD],
            Self::Alien => &[
                LOWER,
                UPPER,
                DIGITS,
                EXTENDED_SPECIAL,
                MATH_HEAD,
                MATH_TAIL,
            ],
            Self::Custom => &[LOWER, UPPER, DIGITS, CUSTOM_SPECIAL],
        };
        Alphabet {
            symbols: parts.iter().flat_map(|p| p.chars()).collect(),
        }
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownProfile {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_alphabet() {
        assert_eq!(Alphabet::new("".chars()), Err(ConfigError::EmptyAlphabet));
    }

    #[test]
    fn rejects_duplicate_symbols() {
        assert_eq!(
            Alphabet::new("abca".chars()),
            Err(ConfigError::DuplicateSymbol { symbol: 'a' })
        );
    }

    #[test]
    fn keeps_symbol_order_and_digits() {
        let alphabet = Alphabet::new("zyx".chars()).unwrap();
        assert_eq!(alphabet.len(), 3);
        assert_eq!(alphabet.symbol(0), 'z');
        assert_eq!(alphabet.digit('x'), Some(2));
        assert_eq!(alphabet.digit('a'), None);
        assert_eq!(alphabet.to_string(), "zyx");
    }

    #[test]
    fn accepts_non_ascii_symbols() {
        let alphabet = Alphabet::new("αβγ∑".chars()).unwrap();
        assert_eq!(alphabet.len(), 4);
        assert_eq!(alphabet.digit('∑'), Some(3));
    }

    #[test]
    fn every_profile_is_a_valid_alphabet() {
        for profile in Profile::ALL {
            let alphabet = profile.alphabet();
            assert!(Alphabet::new(alphabet.symbols().iter().copied()).is_ok());
        }
        assert_eq!(Profile::Basic.alphabet().len(), 36);
        assert_eq!(Profile::Standard.alphabet().len(), 62);
        assert_eq!(Profile::Advanced.alphabet().len(), 70);
    }

    #[test]
    fn unicode_profiles_extend_elite() {
        let elite = Profile::Elite.alphabet();
        let military = Profile::Military.alphabet();
        let alien = Profile::Alien.alphabet();
        assert_eq!(elite.len(), 90);
        assert_eq!(military.len(), 140);
        assert_eq!(alien.len(), 343);

        for alphabet in [&military, &alien] {
            assert!(Alphabet::new(alphabet.symbols().iter().copied()).is_ok());
            assert_eq!(&alphabet.symbols()[..90], elite.symbols());
        }
        assert_eq!(&alien.symbols()[..140], military.symbols());
        assert_eq!(military.symbol(90), '∀');
        assert!(alien.symbols()[90..].iter().all(|c| !c.is_ascii()));
    }

    #[test]
    fn strips_ambiguous_symbols() {
        let alphabet = Profile::Standard.alphabet().without_ambiguous().unwrap();
        for c in AMBIGUOUS {
            assert_eq!(alphabet.digit(*c), None);
        }
        assert_eq!(alphabet.len(), 57);

        let only_ambiguous = Alphabet::new("0O1".chars()).unwrap();
        assert_eq!(
            only_ambiguous.without_ambiguous(),
            Err(ConfigError::EmptyAlphabet)
        );
    }

    #[test]
    fn parses_profile_names() {
        assert_eq!("elite".parse::<Profile>(), Ok(Profile::Elite));
        assert_eq!("BASIC".parse::<Profile>(), Ok(Profile::Basic));
        assert_eq!("military".parse::<Profile>(), Ok(Profile::Military));
        assert_eq!("alien".parse::<Profile>(), Ok(Profile::Alien));
        assert!(matches!(
            "martian".parse::<Profile>(),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }
}
