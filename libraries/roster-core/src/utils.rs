//! Stateless utility functions shared across the Roster crates.

use chrono::{DateTime, TimeZone};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

/// Maximum number of items a single listing call may return.
pub const MAX_ITEMS: usize = 100;

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT: u64 = 5000;

/// API version segment used in request paths.
pub const API_VERSION: &str = "v1";

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(EMAIL_PATTERN).unwrap();
}

/// Render a point in time as `YYYY-MM-DD`.
///
/// No timezone conversion is performed; the date is taken from the
/// timestamp's own offset.
pub fn format_date<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.format("%Y-%m-%d").to_string()
}

/// Arithmetic sum of a slice of numbers. Empty input yields `0.0`.
pub fn calculate_sum(numbers: &[f64]) -> f64 {
    numbers.iter().sum()
}

/// Structurally independent copy of a JSON value.
///
/// Walks the closed value union (null, bool, number, string, array, map)
/// recursively, so nested containers never share storage with the input.
pub fn deep_clone(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => Value::String(s.clone()),
        Value::Array(items) => Value::Array(items.iter().map(deep_clone).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), deep_clone(item)))
                .collect(),
        ),
    }
}

/// True iff `text` matches `local-part@domain.tld`.
///
/// Local part draws from `[A-Za-z0-9._%+-]`, domain from `[A-Za-z0-9.-]`,
/// and the top-level segment must be 2+ alphabetic characters. Anchored at
/// both ends.
pub fn validate_email(text: &str) -> bool {
    EMAIL_REGEX.is_match(text)
}

/// Strip every `<`, `>`, `&`, `"` and `'` from the input.
///
/// Characters are removed, not escaped; the relative order of everything
/// else is preserved.
pub fn sanitize_input(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '<' | '>' | '&' | '"' | '\''))
        .collect()
}
