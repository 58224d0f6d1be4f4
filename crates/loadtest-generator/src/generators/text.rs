//! Random string helpers.

use rand::seq::IndexedRandom;
use rand::Rng;

/// Alphabet used for random letter strings.
pub const LETTERS: &[u8] = b"AaBbCcDdEeFfGgHhIiJjKkLlMmNnOoPpQqRrSsTtUuVvWwXxYyZz";

pub const DIGITS: &[u8] = b"0123456789";

/// Sample `length` distinct letters.
///
/// `length` is capped at the alphabet size.
pub fn random_letters<R: Rng>(rng: &mut R, length: usize) -> String {
    sample_distinct(rng, LETTERS, length)
}

/// Random digit string of the given length.
///
/// Digits are distinct while `length` fits in ten; longer strings append
/// independently chosen digits.
pub fn random_digits<R: Rng>(rng: &mut R, length: usize) -> String {
    let mut result = sample_distinct(rng, DIGITS, length);
    for _ in DIGITS.len()..length {
        if let Some(&d) = DIGITS.choose(rng) {
            result.push(d as char);
        }
    }
    result
}

fn sample_distinct<R: Rng>(rng: &mut R, pool: &[u8], length: usize) -> String {
    pool.choose_multiple(rng, length.min(pool.len()))
        .map(|&b| b as char)
        .collect()
}
