//! Built-in record profiles.
//!
//! A profile fixes everything about the destination of a load run except the
//! connection: the default table, its column list, the write statement kind
//! and the batch defaults.

use std::fmt;
use std::str::FromStr;

/// Statement kind used to write a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// `INSERT INTO`: a duplicate key rejects the whole statement.
    Insert,
    /// `REPLACE INTO`: a duplicate key deletes the old row, then inserts.
    Replace,
}

impl WriteMode {
    /// SQL keyword that starts the statement.
    pub fn keyword(&self) -> &'static str {
        match self {
            WriteMode::Insert => "INSERT",
            WriteMode::Replace => "REPLACE",
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Destination table shape for generated records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordProfile {
    /// Device base info rows keyed by a serial thing id.
    Thing,
    /// User account rows keyed by a numeric id.
    User,
}

const THING_COLUMNS: [&str; 9] = [
    "thingserialno",
    "prethingaes128key",
    "thingid",
    "iccid",
    "imsi",
    "status",
    "bid",
    "thingaes128key",
    "eventcreationtime",
];

const USER_COLUMNS: [&str; 9] = [
    "id",
    "last_name",
    "first_name",
    "sex",
    "age",
    "phone",
    "address",
    "password",
    "create_time",
];

impl RecordProfile {
    pub const ALL: [RecordProfile; 2] = [RecordProfile::Thing, RecordProfile::User];

    /// Profile name as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            RecordProfile::Thing => "thing",
            RecordProfile::User => "user",
        }
    }

    /// Table written when no override is given.
    pub fn default_table(&self) -> &'static str {
        match self {
            RecordProfile::Thing => "thingbaseinfodata_tbl",
            RecordProfile::User => "user",
        }
    }

    /// Destination columns, in the order record values are generated.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            RecordProfile::Thing => &THING_COLUMNS,
            RecordProfile::User => &USER_COLUMNS,
        }
    }

    pub fn arity(&self) -> usize {
        self.columns().len()
    }

    pub fn write_mode(&self) -> WriteMode {
        match self {
            RecordProfile::Thing => WriteMode::Insert,
            RecordProfile::User => WriteMode::Replace,
        }
    }

    /// Whether the table is cleared before loading unless told otherwise.
    ///
    /// Plain INSERT collides with rows left by a previous run, REPLACE does not.
    pub fn truncate_by_default(&self) -> bool {
        matches!(self.write_mode(), WriteMode::Insert)
    }

    pub fn default_batch_size(&self) -> usize {
        match self {
            RecordProfile::Thing => 1000,
            RecordProfile::User => 100,
        }
    }

    pub fn default_batch_count(&self) -> u64 {
        match self {
            RecordProfile::Thing => 100,
            RecordProfile::User => 1_000_000,
        }
    }
}

impl fmt::Display for RecordProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordProfile::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<&str> = RecordProfile::ALL.iter().map(|p| p.name()).collect();
                format!("unknown profile '{s}' (expected one of: {})", known.join(", "))
            })
    }
}
