//! Column type inference for schema-free tables
//!
//! Every header of a [`Table`] becomes one typed [`Column`]. The kind is
//! decided from a fixed-size prefix sample of the column's non-empty values
//! (never a random sample, so results are reproducible) and then the whole
//! non-empty set is converted with the matching normalizer. Values that fail
//! to convert are dropped, so a column may hold fewer values than it has
//! non-empty cells.
//!
//! ## Usage
//!
//! ```rust
//! use csv_graph::inference::infer_columns;
//! use csv_graph::models::ColumnKind;
//! use csv_graph::table::parse_table;
//!
//! let table = parse_table("Date;Temp\n01.03.2024;3,5\n02.03.2024;4,0\n", b';').unwrap();
//! let columns = infer_columns(&table);
//!
//! assert_eq!(columns[0].kind(), ColumnKind::Date);
//! assert_eq!(columns[1].kind(), ColumnKind::Number);
//! ```

pub mod classifier;

#[cfg(test)]
mod tests;

pub use classifier::{SampleScores, classify, is_date_column, is_numeric_column};

use crate::config::GraphConfig;
use crate::models::{Column, ColumnKind, ColumnSummary, ColumnValues, Table};
use crate::normalize::{parse_date, parse_number};
use tracing::{debug, info};

/// Classifies table columns with a configurable sample size and thresholds
#[derive(Debug, Clone, Default)]
pub struct TypeInferrer {
    config: GraphConfig,
}

impl TypeInferrer {
    pub fn new(config: GraphConfig) -> Self {
        Self { config }
    }

    /// Infer one column per header, in header order
    pub fn infer(&self, table: &Table) -> Vec<Column> {
        let columns: Vec<Column> = table
            .headers
            .iter()
            .map(|header| self.infer_column(table, header))
            .collect();

        info!(
            "Inferred {} columns: {} date, {} number, {} text",
            columns.len(),
            count_kind(&columns, ColumnKind::Date),
            count_kind(&columns, ColumnKind::Number),
            count_kind(&columns, ColumnKind::Text)
        );
        columns
    }

    /// Classify and convert a single column
    pub fn infer_column(&self, table: &Table, header: &str) -> Column {
        let non_empty: Vec<&str> = table.non_empty_values(header).collect();
        if non_empty.is_empty() {
            debug!("Column '{}' has no values, treating as text", header);
            return Column::new(header, ColumnValues::Text(Vec::new()));
        }

        let sample_len = self.config.sample_size.min(non_empty.len());
        let scores = SampleScores::score(&non_empty[..sample_len]);
        let kind = scores.resolve(&self.config);

        debug!(
            "Column '{}': sample={}, date_ratio={:.2}, numeric_ratio={:.2} -> {}",
            header,
            scores.sample_size,
            scores.date_ratio(),
            scores.numeric_ratio(),
            kind
        );

        let values = match kind {
            ColumnKind::Number => {
                ColumnValues::Number(non_empty.iter().filter_map(|v| parse_number(v)).collect())
            }
            ColumnKind::Date => {
                ColumnValues::Date(non_empty.iter().filter_map(|v| parse_date(v)).collect())
            }
            ColumnKind::Text => {
                ColumnValues::Text(non_empty.iter().map(|v| v.to_string()).collect())
            }
        };

        if values.len() < non_empty.len() {
            debug!(
                "Column '{}': dropped {} of {} values that did not parse as {}",
                header,
                non_empty.len() - values.len(),
                non_empty.len(),
                kind
            );
        }

        Column::new(header, values)
    }
}

/// Infer columns with the default sample size and thresholds
pub fn infer_columns(table: &Table) -> Vec<Column> {
    TypeInferrer::default().infer(table)
}

/// Report kept and dropped value counts for each column
pub fn summarize_columns(table: &Table, columns: &[Column]) -> Vec<ColumnSummary> {
    columns
        .iter()
        .map(|column| {
            let non_empty = table.non_empty_values(column.name()).count();
            ColumnSummary {
                name: column.name().to_string(),
                kind: column.kind(),
                non_empty,
                parsed: column.len(),
                dropped: non_empty.saturating_sub(column.len()),
            }
        })
        .collect()
}

/// Columns of one kind, in column order
pub fn columns_of_kind(columns: &[Column], kind: ColumnKind) -> Vec<&Column> {
    columns.iter().filter(|c| c.kind() == kind).collect()
}

/// The first date column, used as the X axis when none is chosen
pub fn default_x_column(columns: &[Column]) -> Option<&Column> {
    columns.iter().find(|c| c.kind() == ColumnKind::Date)
}

fn count_kind(columns: &[Column], kind: ColumnKind) -> usize {
    columns.iter().filter(|c| c.kind() == kind).count()
}
