//! Field access on raw provider entries

use serde_json::Value;

/// Non-empty text value of `field`.
///
/// AMap sends `[]` instead of `""` for absent values (`"district": []`), and
/// occasionally `null`; both read as `None`, as does a missing field.
#[must_use]
pub fn text_field<'a>(entry: &'a Value, field: &str) -> Option<&'a str> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

/// Administrative region code of a geocode, needed for weather lookups
#[must_use]
pub fn adcode(entry: &Value) -> Option<&str> {
    text_field(entry, "adcode")
}
