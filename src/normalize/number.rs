//! European number parsing
//!
//! A comma is read as the decimal separator, never as a thousands
//! separator: `"1,234"` is `1.234`. Inputs that rely on digit grouping
//! therefore parse to a different magnitude or fail outright.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sign, digits and at most one decimal point after comma replacement
static DECIMAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)$").expect("Failed to compile decimal regex")
});

/// Parse a comma-decimal number
///
/// Surrounding whitespace is ignored. Returns `None` for empty input,
/// letters, exponents, or more than one separator.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = trimmed.replacen(',', ".", 1);
    if !DECIMAL_PATTERN.is_match(&normalized) {
        return None;
    }

    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}
