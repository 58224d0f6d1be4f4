//! Per-profile record builders.
//!
//! Each builder turns a global record offset (plus an RNG for filler fields)
//! into one `SyntheticRecord` whose values follow the profile's column order.

pub mod text;
pub mod thing;
pub mod user;

use crate::profile::RecordProfile;
use crate::record::SyntheticRecord;
use chrono::NaiveDateTime;
use rand::Rng;

/// Build the record at `offset` for the given profile.
pub fn generate_record<R: Rng>(
    profile: RecordProfile,
    offset: u64,
    rng: &mut R,
    created_at: NaiveDateTime,
) -> SyntheticRecord {
    match profile {
        RecordProfile::Thing => thing::generate_thing(offset),
        RecordProfile::User => user::generate_user(offset, rng, created_at),
    }
}
