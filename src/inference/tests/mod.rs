//! Test utilities for column inference

use crate::models::{Row, Table};


/// Build a single-column table from raw cell texts (empty text is absent)
pub fn single_column(name: &str, values: &[&str]) -> Table {
    let rows = values
        .iter()
        .map(|value| [(name, *value)].into_iter().collect::<Row>())
        .collect();
    Table::new(vec![name.to_string()], rows)
}

/// Build a table from headers and row-major cell texts
pub fn table_from_rows(headers: &[&str], rows: &[&[&str]]) -> Table {
    let rows = rows
        .iter()
        .map(|cells| {
            headers
                .iter()
                .zip(cells.iter())
                .map(|(h, v)| (*h, *v))
                .collect::<Row>()
        })
        .collect();
    Table::new(headers.iter().map(|h| h.to_string()).collect(), rows)
}
