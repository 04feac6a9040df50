//! csv_graph Library
//!
//! Turns a delimited text table of unknown shape into typed columns and
//! date-sorted time series, without any schema.
//!
//! This library provides tools for:
//! - Parsing semicolon-delimited (or any single-byte delimited) text into a raw table
//! - Normalizing European comma-decimal numbers and several date layouts
//! - Inferring whether each column holds dates, numbers or free text
//! - Filtering rows by an inclusive, optionally open-ended date range
//! - Building one ordered point sequence per numeric column for charting
//! - Exporting series as delimited text or JSON
//!
//! ## Pipeline
//!
//! ```text
//!   raw text ──► table::parse_table ──► inference::infer_columns
//!                                            │
//!                     filter::DateRange ──►  series::build_series ──► export
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod filter;
pub mod inference;
pub mod models;
pub mod normalize;
pub mod series;
pub mod table;

// Re-export commonly used types
pub use config::GraphConfig;
pub use error::{GraphError, Result};
pub use filter::{date_bounds, in_range};
pub use inference::infer_columns;
pub use models::{
    Column, ColumnKind, ColumnValues, DateBounds, DateRange, RawCell, Row, Series, SeriesPoint,
    Table,
};
pub use normalize::{parse_date, parse_number};
pub use series::build_series;
pub use table::{load_table, parse_table};
