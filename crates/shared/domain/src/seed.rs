//! Pronounceable seed words.
//!
//! A seed is written in base 120, one consonant-vowel syllable per digit, most
//! significant syllable first: digit `d` is `CONSONANTS[d % 20]` followed by
//! `VOWELS[d / 20]`. Reading is more lenient: any letter pair is accepted and
//! contributes the sum of its two letter values, a trailing unpaired letter is
//! ignored.

const CONSONANTS: &[u8; 20] = b"bcdfghjklmnpqrstvwxz";
const VOWELS: &[u8; 6] = b"aeiouy";
const BASE: u64 = 120;

/// Letter value: a consonant's index, or twenty times a vowel's index.
fn letter_value(letter: u8) -> Option<u64> {
    let letter = letter.to_ascii_lowercase();
    if let Some(i) = CONSONANTS.iter().position(|&c| c == letter) {
        return Some(i as u64);
    }
    VOWELS.iter().position(|&v| v == letter).map(|i| i as u64 * 20)
}

/// Decodes a seed word.
///
/// Returns `None` when the word contains anything but ASCII letters or when
/// the value does not fit in a `u64`.
#[must_use]
pub fn seed_from_word(word: &str) -> Option<u64> {
    if !word.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    word.as_bytes().chunks_exact(2).try_fold(0_u64, |seed, pair| {
        let digit = letter_value(pair[0])? + letter_value(pair[1])?;
        seed.checked_mul(BASE)?.checked_add(digit)
    })
}

/// Encodes `seed` as a seed word; zero is `"ba"`.
#[must_use]
pub fn word_from_seed(mut seed: u64) -> String {
    let mut digits = Vec::new();
    loop {
        digits.push((seed % BASE) as usize);
        seed /= BASE;
        if seed == 0 {
            break;
        }
    }

    let mut word = String::with_capacity(digits.len() * 2);
    for digit in digits.into_iter().rev() {
        word.push(char::from(CONSONANTS[digit % 20]));
        word.push(char::from(VOWELS[digit / 20]));
    }
    word
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn cosmic_decodes_to_a_fixed_seed() {
        // co = 1 + 60, sm = 14 + 10, ic = 40 + 1
        assert_eq!(seed_from_word("cosmic"), Some(61 * 120 * 120 + 24 * 120 + 41));
        assert_eq!(seed_from_word("COSMIC"), seed_from_word("cosmic"));
    }

    #[test]
    fn trailing_letter_is_ignored() {
        assert_eq!(seed_from_word("cosmicx"), seed_from_word("cosmic"));
        assert_eq!(seed_from_word("x"), Some(0));
        assert_eq!(seed_from_word(""), Some(0));
    }

    #[test]
    fn non_letters_are_rejected() {
        assert_eq!(seed_from_word("cos mic"), None);
        assert_eq!(seed_from_word("c0smic"), None);
    }

    #[test]
    fn overflowing_words_are_rejected() {
        assert_eq!(seed_from_word(&"zy".repeat(12)), None);
    }

    #[test]
    fn zero_encodes_as_first_syllable() {
        assert_eq!(word_from_seed(0), "ba");
        assert_eq!(word_from_seed(119), "zy");
        assert_eq!(word_from_seed(120), "caba");
    }

    proptest! {
        #[test]
        fn encoded_words_decode_to_the_same_seed(seed in any::<u32>()) {
            let word = word_from_seed(u64::from(seed));
            prop_assert_eq!(seed_from_word(&word), Some(u64::from(seed)));
        }
    }
}
