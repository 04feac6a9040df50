//! Application constants for csv_graph
//!
//! Default parser settings, inference thresholds and the date-acceptance
//! window used throughout the crate.

// =============================================================================
// Tabular Parser
// =============================================================================

/// Default field delimiter (European CSV exports use semicolons)
pub const DEFAULT_DELIMITER: u8 = b';';

// =============================================================================
// Column Type Inference
// =============================================================================

/// Number of leading non-empty values inspected per column
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// A column is a date column when strictly more than this share of the
/// sample looks like a date
pub const DEFAULT_DATE_THRESHOLD: f64 = 0.70;

/// A column is numeric when at least this share of the sample is numeric
pub const DEFAULT_NUMERIC_THRESHOLD: f64 = 0.70;

/// Characters whose presence makes a value a date candidate
pub const DATE_SEPARATORS: &[char] = &['-', '/', '.'];

/// Characters whose presence disqualifies a value from numeric counting
pub const NON_NUMERIC_MARKERS: &[char] = &['-', '/'];

// =============================================================================
// Date Normalization
// =============================================================================

/// Epoch timestamps must resolve to a year strictly after this one
pub const EPOCH_MIN_YEAR_EXCLUSIVE: i32 = 1900;

/// Epoch timestamps must resolve to a year strictly before this one
pub const EPOCH_MAX_YEAR_EXCLUSIVE: i32 = 3000;

/// Output format for calendar days (date-range inputs, reports)
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Output format for series timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Check whether a value carries one of the date separators
pub fn has_date_separator(value: &str) -> bool {
    value.contains(DATE_SEPARATORS)
}

/// Check whether a value carries a marker that rules out numeric counting
pub fn has_non_numeric_marker(value: &str) -> bool {
    value.contains(NON_NUMERIC_MARKERS)
}
