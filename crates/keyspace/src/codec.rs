//! Bijection between ordinals and fixed-length strings over an [`Alphabet`].
//!
//! An ordinal `i` in `[0, |alphabet|^length)` is written in base `|alphabet|`
//! using exactly `length` digits, most significant first, where digit `d` is
//! rendered as `alphabet.symbol(d)`. Because any ordinal maps to its string
//! without reference to any other, the space can be cut anywhere and expanded
//! in any order.

use crate::alphabet::Alphabet;

/// Number of strings of `length` symbols over an alphabet of `base` symbols.
///
/// Returns `None` when the count does not fit in a `u64`.
#[inline]
pub fn population(base: usize, length: usize) -> Option<u64> {
    let exp = u32::try_from(length).ok()?;
    (base as u64).checked_pow(exp)
}

/// Encodes `index` as a string of exactly `length` symbols.
///
/// `index` must be below `|alphabet|^length`. Larger values silently lose
/// their high digits, which is why callers validate chunk bounds first.
pub fn encode(index: u64, length: usize, alphabet: &Alphabet) -> String {
    let mut out = String::with_capacity(length);
    encode_into(index, length, alphabet, &mut out);
    out
}

/// Like [`encode`], but appends to `out` so a caller can reuse one buffer
/// across many ordinals.
pub fn encode_into(mut index: u64, length: usize, alphabet: &Alphabet, out: &mut String) {
    debug_assert!(
        population(alphabet.len(), length).is_none_or(|p| index < p),
        "ordinal {index} out of range for length {length}"
    );

    let base = alphabet.len() as u64;
    let mut digits = vec![alphabet.symbol(0); length];

    // Fill from the least significant end; once the ordinal is exhausted the
    // remaining leading digits are already zero.
    for slot in digits.iter_mut().rev() {
        if index == 0 {
            break;
        }
        // `index % base` < `alphabet.len()`, so the cast and lookup are in range.
        *slot = alphabet.symbol((index % base) as usize);
        index /= base;
    }

    out.extend(digits);
}

/// Inverse of [`encode`]: the ordinal of `password` within its length class.
///
/// Returns `None` if `password` contains a symbol outside `alphabet` or its
/// ordinal does not fit in a `u64`.
pub fn decode(password: &str, alphabet: &Alphabet) -> Option<u64> {
    let base = alphabet.len() as u64;
    password.chars().try_fold(0_u64, |acc, c| {
        let digit = alphabet.digit(c)? as u64;
        acc.checked_mul(base)?.checked_add(digit)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn alphabet(s: &str) -> Alphabet {
        Alphabet::new(s.chars()).unwrap()
    }

    #[test]
    fn zero_maps_to_repeated_first_symbol() {
        let ab = alphabet("xyz");
        assert_eq!(encode(0, 4, &ab), "xxxx");
    }

    #[test]
    fn most_significant_digit_comes_first() {
        let ab = alphabet("ab");
        let all: Vec<String> = (0..4).map(|i| encode(i, 2, &ab)).collect();
        assert_eq!(all, ["aa", "ab", "ba", "bb"]);

        let digits = alphabet("0123456789");
        assert_eq!(encode(42, 5, &digits), "00042");
        assert_eq!(encode(99_999, 5, &digits), "99999");
    }

    #[test]
    fn single_symbol_alphabet_has_one_string_per_length() {
        let ab = alphabet("q");
        assert_eq!(population(1, 7), Some(1));
        assert_eq!(encode(0, 7, &ab), "qqqqqqq");
        assert_eq!(decode("qqq", &ab), Some(0));
    }

    #[test]
    fn encode_into_appends() {
        let ab = alphabet("ab");
        let mut buf = String::from("> ");
        encode_into(3, 3, &ab, &mut buf);
        assert_eq!(buf, "> abb");
    }

    #[test]
    fn population_reports_overflow() {
        assert_eq!(population(2, 63), Some(1 << 63));
        assert_eq!(population(2, 64), None);
        assert_eq!(population(95, 10), None);
        assert_eq!(population(10, 0), Some(1));
    }

    #[test]
    fn decode_rejects_foreign_symbols() {
        let ab = alphabet("abc");
        assert_eq!(decode("abd", &ab), None);
    }

    #[test]
    fn decode_rejects_overflowing_ordinals() {
        let ab = alphabet("ab");
        let long = "b".repeat(65);
        assert_eq!(decode(&long, &ab), None);
    }

    #[test]
    fn every_string_is_reached_exactly_once() {
        let ab = alphabet("a1$");
        let length = 4;
        let total = population(ab.len(), length).unwrap();

        let seen: HashSet<String> = (0..total).map(|i| encode(i, length, &ab)).collect();
        assert_eq!(seen.len() as u64, total);
        for s in &seen {
            assert_eq!(s.chars().count(), length);
            assert!(s.chars().all(|c| ab.digit(c).is_some()));
        }
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(
            symbols in proptest::sample::subsequence(
                "abcdefghijklmnopqrstuvwxyz0123456789".chars().collect::<Vec<_>>(),
                1..=36,
            ),
            length in 1_usize..=8,
            seed in any::<u64>(),
        ) {
            let ab = Alphabet::new(symbols).unwrap();
            let total = population(ab.len(), length).unwrap();
            let index = seed % total;

            let encoded = encode(index, length, &ab);
            prop_assert_eq!(encoded.chars().count(), length);
            prop_assert_eq!(decode(&encoded, &ab), Some(index));
        }

        #[test]
        fn distinct_ordinals_give_distinct_strings(
            a in 0_u64..1_000_000,
            b in 0_u64..1_000_000,
        ) {
            let ab = alphabet("0123456789");
            prop_assume!(a != b);
            prop_assert_ne!(encode(a, 6, &ab), encode(b, 6, &ab));
        }
    }
}
