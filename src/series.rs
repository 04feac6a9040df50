//! Time series assembly from a date column and numeric columns.
//!
//! Rows are resolved against the X column, filtered by the date range and
//! stably sorted by instant. Each Y column then maps the shared sorted rows
//! to points independently, skipping rows whose Y cell does not parse, so
//! series built in one pass may differ in length.

use crate::error::{GraphError, Result};
use crate::models::{Column, ColumnKind, DateRange, Row, Series, SeriesPoint, Table};
use crate::normalize::{parse_date, parse_number};
use chrono::NaiveDateTime;
use tracing::debug;

/// Build one series per Y column, ordered like `y_names`
///
/// Fails with `InvalidSelection` when the X column is missing or not a date
/// column, or when any Y column is missing or not numeric. A selection that
/// leaves no points after filtering is a valid, empty result.
pub fn build_series<S: AsRef<str>>(
    table: &Table,
    columns: &[Column],
    x_name: &str,
    y_names: &[S],
    range: &DateRange,
) -> Result<Vec<Series>> {
    require_kind(columns, x_name, ColumnKind::Date)?;
    for y_name in y_names {
        require_kind(columns, y_name.as_ref(), ColumnKind::Number)?;
    }

    let mut rows: Vec<(NaiveDateTime, &Row)> = table
        .rows
        .iter()
        .filter_map(|row| {
            let instant = row.get(x_name).and_then(parse_date)?;
            range.contains(instant).then_some((instant, row))
        })
        .collect();

    // Stable: rows sharing an instant keep source order
    rows.sort_by_key(|(instant, _)| *instant);

    debug!(
        "Series on '{}': {} of {} rows in range",
        x_name,
        rows.len(),
        table.len()
    );

    let series = y_names
        .iter()
        .map(|y_name| {
            let label = y_name.as_ref();
            let points = rows
                .iter()
                .filter_map(|(x, row)| {
                    let y = row.get(label).and_then(parse_number)?;
                    Some(SeriesPoint { x: *x, y })
                })
                .collect();
            Series {
                label: label.to_string(),
                points,
            }
        })
        .collect();

    Ok(series)
}

fn require_kind(columns: &[Column], name: &str, expected: ColumnKind) -> Result<()> {
    let column = columns
        .iter()
        .find(|c| c.name() == name)
        .ok_or_else(|| GraphError::invalid_selection(name, "no such column"))?;

    if column.kind() != expected {
        return Err(GraphError::invalid_selection(
            name,
            format!("expected a {} column, found {}", expected, column.kind()),
        ));
    }
    Ok(())
}
