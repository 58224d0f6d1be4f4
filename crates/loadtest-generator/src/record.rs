//! Synthetic record and value types.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt;

/// Text form of `DATETIME` values, as MySQL prints them.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn serialize_datetime<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&dt.format(DATETIME_FORMAT))
}

/// A single generated column value.
///
/// Serializes as the bare value: a number, a string, or a
/// `YYYY-MM-DD HH:MM:SS` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SyntheticValue {
    /// Integer column (ids, flags, ages, phone numbers).
    Int(i64),
    /// Character column.
    Text(String),
    /// Wall-clock timestamp without a zone, as MySQL `DATETIME` expects.
    DateTime(#[serde(serialize_with = "serialize_datetime")] NaiveDateTime),
}

impl SyntheticValue {
    /// Shorthand for a text value.
    pub fn text(value: impl Into<String>) -> Self {
        SyntheticValue::Text(value.into())
    }

    #[cfg(test)]
    pub(crate) fn as_int(&self) -> Option<i64> {
        match self {
            SyntheticValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn as_text(&self) -> Option<&str> {
        match self {
            SyntheticValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SyntheticValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntheticValue::Int(i) => write!(f, "{i}"),
            SyntheticValue::Text(s) => write!(f, "'{s}'"),
            SyntheticValue::DateTime(dt) => write!(f, "'{}'", dt.format(DATETIME_FORMAT)),
        }
    }
}

/// One generated row, values ordered like the profile's column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticRecord {
    /// Global offset of this record within the run.
    pub offset: u64,
    /// Column values.
    pub values: Vec<SyntheticValue>,
}

impl SyntheticRecord {
    pub fn new(offset: u64, values: Vec<SyntheticValue>) -> Self {
        Self { offset, values }
    }

    /// Number of columns carried by this record.
    pub fn arity(&self) -> usize {
        self.values.len()
    }

    /// Get the value at the given column position.
    pub fn get(&self, column: usize) -> Option<&SyntheticValue> {
        self.values.get(column)
    }

    /// View of the record that serializes as a `column -> value` map,
    /// keeping the column order.
    pub fn named<'a>(&'a self, columns: &'a [&'a str]) -> NamedRecord<'a> {
        NamedRecord {
            columns,
            record: self,
        }
    }
}

/// A record paired with its column names. See [`SyntheticRecord::named`].
pub struct NamedRecord<'a> {
    columns: &'a [&'a str],
    record: &'a SyntheticRecord,
}

impl Serialize for NamedRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.columns.iter().zip(&self.record.values))
    }
}

impl fmt::Display for SyntheticRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, ")")
    }
}
