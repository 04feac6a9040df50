//! Configuration management and validation.
//!
//! Holds the parser delimiter and the inference sampling parameters. All
//! values default to the conventions of semicolon-delimited, comma-decimal
//! European CSV exports.

use crate::constants::{
    DEFAULT_DATE_THRESHOLD, DEFAULT_DELIMITER, DEFAULT_NUMERIC_THRESHOLD, DEFAULT_SAMPLE_SIZE,
};
use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Global configuration for table loading and column inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Field delimiter byte
    pub delimiter: u8,

    /// Leading non-empty values inspected per column
    pub sample_size: usize,

    /// Share of date-like samples a date column must exceed
    pub date_threshold: f64,

    /// Share of numeric samples a numeric column must reach
    pub numeric_threshold: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            sample_size: DEFAULT_SAMPLE_SIZE,
            date_threshold: DEFAULT_DATE_THRESHOLD,
            numeric_threshold: DEFAULT_NUMERIC_THRESHOLD,
        }
    }
}

impl GraphConfig {
    /// Use a different field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Inspect a different number of leading values per column
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Override both classification thresholds
    pub fn with_thresholds(mut self, date_threshold: f64, numeric_threshold: f64) -> Self {
        self.date_threshold = date_threshold;
        self.numeric_threshold = numeric_threshold;
        self
    }

    /// Reject settings the parser or the inference engine cannot honour
    pub fn validate(&self) -> Result<()> {
        if matches!(self.delimiter, b'"' | b'\n' | b'\r') {
            return Err(GraphError::configuration(format!(
                "delimiter {:?} cannot be a quote or line break",
                self.delimiter as char
            )));
        }

        if self.sample_size == 0 {
            return Err(GraphError::configuration("sample size must be at least 1"));
        }

        for (name, value) in [
            ("date threshold", self.date_threshold),
            ("numeric threshold", self.numeric_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GraphError::configuration(format!(
                    "{} must be within 0..=1, got {}",
                    name, value
                )));
            }
        }

        debug!(
            "Configuration valid: delimiter={:?}, sample_size={}, thresholds=({}, {})",
            self.delimiter as char, self.sample_size, self.date_threshold, self.numeric_threshold
        );
        Ok(())
    }
}
