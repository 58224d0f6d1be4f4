//! Conversion from generated values to MySQL parameters.

use chrono::{Datelike, Timelike};
use loadtest_generator::SyntheticValue;
use mysql_async::Value;

/// MySQL value wrapper for generated values.
#[derive(Debug, Clone, PartialEq)]
pub struct MySQLValue(pub Value);

impl MySQLValue {
    /// Get the inner mysql_async::Value.
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<SyntheticValue> for MySQLValue {
    fn from(value: SyntheticValue) -> Self {
        match value {
            SyntheticValue::Int(i) => MySQLValue(Value::Int(i)),
            SyntheticValue::Text(s) => MySQLValue(Value::Bytes(s.into_bytes())),
            SyntheticValue::DateTime(dt) => MySQLValue(Value::Date(
                dt.year() as u16,
                dt.month() as u8,
                dt.day() as u8,
                dt.hour() as u8,
                dt.minute() as u8,
                dt.second() as u8,
                dt.nanosecond() / 1000,
            )),
        }
    }
}
