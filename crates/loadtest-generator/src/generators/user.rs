//! User account records.

use super::text::random_letters;
use crate::record::{SyntheticRecord, SyntheticValue};
use chrono::NaiveDateTime;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Phone number of user id 0; user `id` gets `PHONE_BASE + id`.
pub const PHONE_BASE: i64 = 13_100_000_000;

const SEXES: [&str; 2] = ["M", "F"];

/// User id for the record at `offset`. Ids start at 1.
pub fn user_id(offset: u64) -> i64 {
    offset as i64 + 1
}

/// Build the user row at `offset`.
pub fn generate_user<R: Rng>(
    offset: u64,
    rng: &mut R,
    created_at: NaiveDateTime,
) -> SyntheticRecord {
    let id = user_id(offset);
    let sex = SEXES.choose(rng).copied().unwrap_or("M");

    SyntheticRecord::new(
        offset,
        vec![
            SyntheticValue::Int(id),
            SyntheticValue::Text(format!("last_name_{}", rng.random_range(0..100_000))),
            SyntheticValue::Text(format!("first_name_{}", rng.random_range(0..100_000))),
            SyntheticValue::text(sex),
            SyntheticValue::Int(rng.random_range(1..=120)),
            SyntheticValue::Int(PHONE_BASE + id),
            SyntheticValue::Text(random_letters(rng, 20)),
            SyntheticValue::Text(random_letters(rng, 10)),
            SyntheticValue::DateTime(created_at),
        ],
    )
}
