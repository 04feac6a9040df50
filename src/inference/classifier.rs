//! Sample scoring and column kind resolution
//!
//! A sample is the row-order prefix of a column's non-empty values. Scoring
//! is pure, so a column's kind depends only on the values inside its sample.

use crate::config::GraphConfig;
use crate::constants::{has_date_separator, has_non_numeric_marker};
use crate::models::ColumnKind;
use crate::normalize::{parse_date, parse_number};

/// Counts gathered from one column sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleScores {
    /// Values inspected
    pub sample_size: usize,
    /// Values with a date separator that also parse as a date
    pub date_like: usize,
    /// Values without `-` or `/` that parse as a finite number
    pub numeric: usize,
}

impl SampleScores {
    /// Score every value of a sample
    pub fn score<S: AsRef<str>>(sample: &[S]) -> Self {
        let mut scores = SampleScores {
            sample_size: sample.len(),
            ..Default::default()
        };

        for value in sample {
            let text = value.as_ref().trim();
            if text.is_empty() {
                continue;
            }

            if has_date_separator(text) && parse_date(text).is_some() {
                scores.date_like += 1;
            }

            if !has_non_numeric_marker(text) && parse_number(text).is_some() {
                scores.numeric += 1;
            }
        }

        scores
    }

    pub fn date_ratio(&self) -> f64 {
        ratio(self.date_like, self.sample_size)
    }

    pub fn numeric_ratio(&self) -> f64 {
        ratio(self.numeric, self.sample_size)
    }

    /// Date columns must strictly exceed the threshold
    pub fn is_date_column(&self, threshold: f64) -> bool {
        self.sample_size > 0 && self.date_ratio() > threshold
    }

    /// Numeric columns must reach the threshold
    pub fn is_numeric_column(&self, threshold: f64) -> bool {
        self.sample_size > 0 && self.numeric_ratio() >= threshold
    }

    /// Resolve the kind, giving numbers priority when the date check fails
    pub fn resolve(&self, config: &GraphConfig) -> ColumnKind {
        let is_numeric = self.is_numeric_column(config.numeric_threshold);
        let is_date = self.is_date_column(config.date_threshold);

        if is_numeric && !is_date {
            ColumnKind::Number
        } else if is_date {
            ColumnKind::Date
        } else {
            ColumnKind::Text
        }
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Whether a sample describes a date column under the default threshold
pub fn is_date_column<S: AsRef<str>>(sample: &[S]) -> bool {
    SampleScores::score(sample).is_date_column(GraphConfig::default().date_threshold)
}

/// Whether a sample describes a numeric column under the default threshold
pub fn is_numeric_column<S: AsRef<str>>(sample: &[S]) -> bool {
    SampleScores::score(sample).is_numeric_column(GraphConfig::default().numeric_threshold)
}

/// Classify a sample
pub fn classify<S: AsRef<str>>(sample: &[S], config: &GraphConfig) -> ColumnKind {
    SampleScores::score(sample).resolve(config)
}
