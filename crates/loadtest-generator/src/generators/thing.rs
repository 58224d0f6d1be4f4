//! Device base info records.

use crate::record::{SyntheticRecord, SyntheticValue};

/// First serial number handed out; record `n` gets `THING_ID_BASE + n`.
pub const THING_ID_BASE: u64 = 1_000_000;

pub const THING_ID_PREFIX: &str = "WDDUX5268F";

/// Thing id for the record at `offset`.
pub fn thing_id(offset: u64) -> String {
    format!("{THING_ID_PREFIX}{}", THING_ID_BASE + offset)
}

/// Build the device row at `offset`. Only the thing id varies.
pub fn generate_thing(offset: u64) -> SyntheticRecord {
    SyntheticRecord::new(
        offset,
        vec![
            SyntheticValue::text("12345678901234567890123456789"),
            SyntheticValue::text("1234567890123456"),
            SyntheticValue::Text(thing_id(offset)),
            SyntheticValue::text("12345678901234567890"),
            SyntheticValue::text("HGTSN12584UHGTE"),
            SyntheticValue::Int(0),
            SyntheticValue::Int(0),
            SyntheticValue::text("1234567890123456"),
            SyntheticValue::Int(0),
        ],
    )
}
