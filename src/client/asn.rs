//! ASN extraction from free text.

use std::sync::LazyLock;

use regex::Regex;

/// A 2-8 digit run, the plausible range of a public ASN.
const ASN_PATTERN: &str = r"[0-9]{2,8}";

static ASN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ASN_PATTERN).expect("ASN_PATTERN is a valid regex"));

/// Extracts the ASN from an organization string such as
/// `"Acme Networks AS12345 Holdings"`.
///
/// Returns the first run of 2-8 ASCII digits, or `None` if there is none.
/// Runs longer than eight digits are split, so `"123456789"` yields
/// `12345678`.
pub fn extract_asn(text: &str) -> Option<u32> {
    ASN_RE
        .find_iter(text)
        .find_map(|m| m.as_str().parse().ok())
}
