//! Field normalization.
//!
//! The API reports "no value" with the string sentinel `"NA"` instead of
//! `null` or an omitted key. Every optional field is passed through
//! [`normalize`] so the sentinel never leaves this module.

use crate::config::NOT_APPLICABLE;

/// Returns `true` if `value` is the API's "not applicable" sentinel.
pub fn is_not_applicable(value: &str) -> bool {
    value == NOT_APPLICABLE
}

/// Maps the sentinel and absent values to `None`.
///
/// Any other value, including the empty string, is returned unchanged.
pub fn normalize<S: AsRef<str>>(value: Option<S>) -> Option<S> {
    value.filter(|v| !is_not_applicable(v.as_ref()))
}
