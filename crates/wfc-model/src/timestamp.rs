//! Timestamp formatting shared by all output tables.

use chrono::NaiveDateTime;
use serde::Serializer;

/// Format used for every timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS`, dropping fractional seconds.
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Serializes an optional timestamp; `None` becomes an empty field.
pub fn serialize_optional<S>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) => serializer.serialize_str(&format_timestamp(ts)),
        None => serializer.serialize_none(),
    }
}
