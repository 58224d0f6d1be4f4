//! Synthetic record generator for mysql-bulkload.
//!
//! This crate provides the `RecordGenerator` which produces batches of
//! synthetic rows for one of the built-in `RecordProfile`s. Every record is
//! derived from a running offset, so keys never repeat within a run, and the
//! random filler fields come from an RNG seeded from the run seed and the
//! batch offset, so the same batch can be regenerated exactly.
//!
//! # Architecture
//!
//! ```text
//!   RecordProfile (thing | user)
//!          │
//!          ▼
//! ┌──────────────────┐
//! │ RecordGenerator  │
//! │                  │
//! │  - seed          │
//! │  - created_at    │
//! │  - next_offset   │
//! └────────┬─────────┘
//!          │ next_batch(size)
//!          ▼
//!   Vec<SyntheticRecord>
//! ```
//!
//! # Example
//!
//! ```rust
//! use loadtest_generator::{RecordGenerator, RecordProfile};
//!
//! let mut generator = RecordGenerator::new(RecordProfile::User, 42);
//! let batch = generator.next_batch(100);
//! assert_eq!(batch.len(), 100);
//! assert_eq!(generator.next_offset(), 100);
//! ```

pub mod generator;
pub mod generators;
pub mod profile;
pub mod record;

// Re-exports for convenience
pub use generator::{GeneratorError, RecordGenerator};
pub use profile::{RecordProfile, WriteMode};
pub use record::{NamedRecord, SyntheticRecord, SyntheticValue, DATETIME_FORMAT};
