//! Batch generator for producing synthetic records.

use crate::generators::generate_record;
use crate::profile::RecordProfile;
use crate::record::SyntheticRecord;
use chrono::{Local, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Offsets ran past the key space of the profile
    #[error("Offset overflow: {start} + {rows} exceeds the {profile} key space")]
    OffsetOverflow {
        profile: RecordProfile,
        start: u64,
        rows: u64,
    },
}

/// Largest offset any profile can turn into a key without overflowing.
///
/// User phone numbers are `13100000000 + id` in an `i64`.
const MAX_OFFSET: u64 = (i64::MAX - 13_100_000_001) as u64;

/// Generator that produces deterministic batches of synthetic records.
///
/// Records are keyed by their global offset. `generate_batch` is a pure
/// function of the generator's configuration and its arguments, while
/// `next_batch` advances an explicit offset counter so consecutive batches
/// never share keys.
#[derive(Debug, Clone)]
pub struct RecordGenerator {
    /// Profile defining the record shape
    profile: RecordProfile,
    /// Base seed for the filler fields
    seed: u64,
    /// Timestamp stamped on every record carrying a creation time
    created_at: NaiveDateTime,
    /// Offset of the first record of the next batch
    next_offset: u64,
}

impl RecordGenerator {
    /// Create a new generator for the given profile and seed.
    ///
    /// The creation timestamp is the current local time, truncated to the
    /// second.
    pub fn new(profile: RecordProfile, seed: u64) -> Self {
        let now = Local::now().naive_local();
        Self {
            profile,
            seed,
            created_at: now.with_nanosecond(0).unwrap_or(now),
            next_offset: 0,
        }
    }

    /// Set the starting offset for batch generation.
    ///
    /// Useful to append to a table loaded by an earlier run without reusing
    /// its keys.
    pub fn with_start_offset(mut self, offset: u64) -> Self {
        self.next_offset = offset;
        self
    }

    /// Pin the creation timestamp instead of using the current time.
    pub fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn profile(&self) -> RecordProfile {
        self.profile
    }

    /// Offset the next call to `next_batch` starts from.
    pub fn next_offset(&self) -> u64 {
        self.next_offset
    }

    /// Compute the RNG seed for a batch starting at `offset`.
    ///
    /// Seeding per batch lets any batch be regenerated without replaying the
    /// ones before it.
    fn rng_seed_for_offset(&self, offset: u64) -> u64 {
        self.seed.wrapping_add(offset.wrapping_mul(0x9E3779B97F4A7C15))
    }

    /// Generate `size` records starting at `start_offset`.
    ///
    /// Has no side effects: the same arguments always produce the same
    /// records, and record `i` of the batch carries offset `start_offset + i`.
    pub fn generate_batch(&self, start_offset: u64, size: usize) -> Vec<SyntheticRecord> {
        let mut rng = StdRng::seed_from_u64(self.rng_seed_for_offset(start_offset));
        (0..size as u64)
            .map(|i| generate_record(self.profile, start_offset + i, &mut rng, self.created_at))
            .collect()
    }

    /// Check that a batch of `size` records starting at `start_offset` stays
    /// inside the profile's key space.
    pub fn check_range(&self, start_offset: u64, size: usize) -> Result<(), GeneratorError> {
        self.check_rows(start_offset, size as u64)
    }

    /// Like `check_range`, for a whole run of `rows` records.
    pub fn check_rows(&self, start_offset: u64, rows: u64) -> Result<(), GeneratorError> {
        match start_offset.checked_add(rows) {
            Some(end) if end <= MAX_OFFSET => Ok(()),
            _ => Err(GeneratorError::OffsetOverflow {
                profile: self.profile,
                start: start_offset,
                rows,
            }),
        }
    }

    /// Generate the next batch and advance the offset counter past it.
    pub fn next_batch(&mut self, size: usize) -> Vec<SyntheticRecord> {
        let batch = self.generate_batch(self.next_offset, size);
        self.next_offset += size as u64;
        batch
    }
}
