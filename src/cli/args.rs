//! Command-line argument definitions
//!
//! Flags map onto [`GraphConfig`] and an inclusive [`DateRange`]; date
//! bounds accept `YYYY-MM-DD` or any layout the normalizer understands.

use crate::config::GraphConfig;
use crate::constants::DEFAULT_SAMPLE_SIZE;
use crate::filter::parse_range_bound;
use crate::models::DateRange;
use anyhow::{Result, bail};
use chrono::NaiveDateTime;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "csv-graph")]
#[command(about = "Infer column types of a CSV file and extract date-sorted time series")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the delimited text file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field delimiter (a single ASCII character)
    #[arg(short, long, default_value = ";", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Date column for the X axis (defaults to the first date column)
    #[arg(short = 'x', long = "x-column", value_name = "COLUMN")]
    pub x_column: Option<String>,

    /// Numeric column(s) for the Y axis; repeat the flag or separate with commas
    #[arg(short = 'y', long = "y-column", value_name = "COLUMN", value_delimiter = ',')]
    pub y_columns: Vec<String>,

    /// Earliest date to include (inclusive), e.g. 2024-03-01
    #[arg(long, value_name = "DATE")]
    pub start: Option<String>,

    /// Latest date to include (inclusive), e.g. 2024-03-31
    #[arg(long, value_name = "DATE")]
    pub end: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,

    /// Leading non-empty values inspected per column
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample_size: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable column and series report
    Summary,
    /// Long-format delimited series (series, x, y)
    Csv,
    /// JSON array of series
    Json,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Build the processing configuration from the flags
    pub fn to_config(&self) -> GraphConfig {
        GraphConfig::default()
            .with_delimiter(self.delimiter)
            .with_sample_size(self.sample_size)
    }

    /// Date range from `--start` / `--end`
    pub fn date_range(&self) -> Result<DateRange> {
        Ok(DateRange::new(
            parse_bound_arg("--start", self.start.as_deref())?,
            parse_bound_arg("--end", self.end.as_deref())?,
        ))
    }
}

fn parse_delimiter(value: &str) -> std::result::Result<u8, String> {
    let value = if value == "\\t" { "\t" } else { value };
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!(
            "delimiter must be a single ASCII character, got '{}'",
            value
        )),
    }
}

fn parse_bound_arg(flag: &str, value: Option<&str>) -> Result<Option<NaiveDateTime>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(text) => match parse_range_bound(text) {
            Some(instant) => Ok(Some(instant)),
            None => bail!("{} value '{}' is not a recognised date", flag, text),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::format_date;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["csv-graph", "data.csv"]);
        assert_eq!(args.delimiter, b';');
        assert_eq!(args.format, OutputFormat::Summary);
        assert_eq!(args.sample_size, 10);
        assert!(args.y_columns.is_empty());
        assert_eq!(args.get_log_level(), "info");
    }

    #[test]
    fn test_y_columns_accept_lists_and_repeats() {
        let args = Args::parse_from([
            "csv-graph", "data.csv", "-y", "Temp,Rain", "-y", "Wind", "-x", "Date",
        ]);
        assert_eq!(args.y_columns, vec!["Temp", "Rain", "Wind"]);
        assert_eq!(args.x_column.as_deref(), Some("Date"));
    }

    #[test]
    fn test_delimiter_parsing() {
        let args = Args::parse_from(["csv-graph", "data.csv", "-d", ","]);
        assert_eq!(args.delimiter, b',');

        let args = Args::parse_from(["csv-graph", "data.csv", "-d", "\\t"]);
        assert_eq!(args.delimiter, b'\t');

        assert!(Args::try_parse_from(["csv-graph", "data.csv", "-d", ";;"]).is_err());
    }

    #[test]
    fn test_date_range_flags() {
        let args = Args::parse_from([
            "csv-graph", "data.csv", "--start", "2024-03-01", "--end", "31.03.2024",
        ]);
        let range = args.date_range().unwrap();
        assert_eq!(range.start.map(|d| format_date(&d)), Some("2024-03-01".into()));
        assert_eq!(range.end.map(|d| format_date(&d)), Some("2024-03-31".into()));

        let args = Args::parse_from(["csv-graph", "data.csv", "--start", "soon"]);
        assert!(args.date_range().is_err());
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(
            Args::parse_from(["csv-graph", "f.csv", "-v"]).get_log_level(),
            "debug"
        );
        assert_eq!(
            Args::parse_from(["csv-graph", "f.csv", "-q"]).get_log_level(),
            "warn"
        );
        assert!(Args::try_parse_from(["csv-graph", "f.csv", "-q", "-v"]).is_err());
    }
}
