//! Tolerant parsing for loosely-typed export fields
//!
//! Export cells frequently hold data in a stringly-encoded form: JSON arrays
//! serialized into a CSV cell, epoch timestamps as text, numbers with unit
//! suffixes. These helpers decode such fields and make every fallback an
//! explicit `None` rather than a suppressed error.

/// Decode a JSON array of strings embedded in a field.
///
/// Returns `None` for anything that is not a well-formed JSON array of
/// strings (invalid JSON, wrong element types, empty field).
pub fn parse_string_array(raw: &str) -> Option<Vec<String>> {
    serde_json::from_str(raw).ok()
}

/// Parse a leading integer from a string, stopping at the first non-digit.
///
/// Leading whitespace and a sign are accepted; `"12h"` yields 12. Returns
/// `None` when no digits are found at all.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end]
        .parse::<i64>()
        .ok()
        .map(|v| if negative { -v } else { v })
}
