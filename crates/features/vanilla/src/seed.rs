//! The universal seed group shared by every vanilla generator.
//!
//! Three ways to say the same thing, all merging into one `seed` integer:
//!
//! * `number`: the integer itself.
//! * `word`: a pronounceable seed word, see [`gap_domain::seed`].
//! * `string`: any text, hashed.

use gap_domain::seed::seed_from_word;
use fxhash::FxHasher32;
use gap_settings::{Argument, Context, Group, GroupOption, SettingsError};
use std::hash::Hasher;
use std::sync::LazyLock;

pub const SEED_GROUP: &str = "seed";
pub const SEED_FIELD: &str = "seed";

const MAX_TEXT: usize = 256;

static SEED: LazyLock<Result<Group, SettingsError>> = LazyLock::new(build);

/// A fresh copy of the seed group.
pub fn seed_group() -> Result<Group, SettingsError> {
    SEED.clone()
}

fn build() -> Result<Group, SettingsError> {
    let schema = Context::new().with(SEED_FIELD, Argument::integer(i32::MIN..=i32::MAX))?;

    let number = GroupOption::new("number")
        .argument(SEED_FIELD, Argument::integer(i32::MIN..=i32::MAX))?
        .auto_merge();

    let word = GroupOption::new("word").argument(SEED_FIELD, Argument::string(1, MAX_TEXT))?.merges(
        |input, output| {
            let word: String = input.get(SEED_FIELD)?;
            output.set(SEED_FIELD, word_seed(&word)?)
        },
    );

    let string = GroupOption::new("string")
        .argument(SEED_FIELD, Argument::string(0, MAX_TEXT))?
        .merges(|input, output| {
            let text: String = input.get(SEED_FIELD)?;
            output.set(SEED_FIELD, string_seed(&text))
        });

    Group::new(SEED_GROUP, schema).option(number)?.option(word)?.option(string)
}

/// Decodes a seed word into a generator seed.
///
/// # Errors
/// [`SettingsError::InvalidFormat`] for anything but ASCII letters,
/// [`SettingsError::OutOfRange`] when the word encodes more than `i32::MAX`.
pub fn word_seed(word: &str) -> Result<i32, SettingsError> {
    if !word.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(SettingsError::InvalidFormat {
            message: format!("seed word '{word}' may only contain letters").into(),
            context: None,
        });
    }
    seed_from_word(word).and_then(|seed| i32::try_from(seed).ok()).ok_or_else(|| SettingsError::OutOfRange {
        message: format!("seed word '{word}' is too long").into(),
        context: None,
    })
}

/// Hashes arbitrary text into a seed.
///
/// Bytes are fed to the hasher one at a time, so the result does not depend
/// on the byte order of the target.
#[must_use]
pub fn string_seed(text: &str) -> i32 {
    let mut hasher = FxHasher32::default();
    for byte in text.bytes() {
        hasher.write_u8(byte);
    }
    (hasher.finish() as u32).cast_signed()
}
