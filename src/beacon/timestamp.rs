//! Fixed-format timestamps (`YYYY-MM-DD HH:MM:SS`).
//!
//! Also usable as a `#[serde(with = "timestamp")]` module.

use chrono::NaiveDateTime;
use serde::Serializer;

use crate::config::{DATE_FORMAT, TIMESTAMP_FORMAT};
use crate::error_handling::ParsingError;

/// Parses a `tstamp` value.
///
/// # Errors
///
/// Returns [`ParsingError::Timestamp`] if `s` is not `YYYY-MM-DD HH:MM:SS`.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, ParsingError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).map_err(|source| ParsingError::Timestamp {
        value: s.to_string(),
        source,
    })
}

/// `2023-01-15 08:00:00`
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// `2023-01-15`
pub fn format_date(dt: &NaiveDateTime) -> String {
    dt.format(DATE_FORMAT).to_string()
}

pub(super) fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&dt.format(TIMESTAMP_FORMAT))
}
