//! Core data structures and types for csv_graph.
//!
//! Defines the raw table produced by the parser, the typed columns produced
//! by inference, and the date range and series types consumed by charting.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single raw cell. Empty source text is normalized to `Absent` at the
/// parser boundary so downstream code never sees an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawCell {
    Present(String),
    #[default]
    Absent,
}

impl RawCell {
    /// Build a cell from source text
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            RawCell::Absent
        } else {
            RawCell::Present(text.to_string())
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawCell::Present(text) => Some(text),
            RawCell::Absent => None,
        }
    }
}

/// One data row: header name to raw cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: HashMap<String, RawCell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell, replacing any previous value for the same header
    pub fn insert(&mut self, header: impl Into<String>, cell: RawCell) {
        self.cells.insert(header.into(), cell);
    }

    /// Present text for a header, `None` when absent or unknown
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells.get(header).and_then(RawCell::as_str)
    }

    pub fn cell(&self, header: &str) -> &RawCell {
        static ABSENT: RawCell = RawCell::Absent;
        self.cells.get(header).unwrap_or(&ABSENT)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: AsRef<str>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (header, text) in iter {
            row.insert(header, RawCell::from_text(text.as_ref()));
        }
        row
    }
}

/// The parsed source table. Immutable once built; row order is source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_header(&self, header: &str) -> bool {
        self.headers.iter().any(|h| h == header)
    }

    /// Present values of one column in row order
    pub fn non_empty_values<'a>(&'a self, header: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rows.iter().filter_map(move |row| row.get(header))
    }
}

/// Inferred semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Number,
    Date,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Text => "text",
            ColumnKind::Number => "number",
            ColumnKind::Date => "date",
        };
        f.write_str(name)
    }
}

/// Typed values of a column; the variant fixes the column's kind
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Text(Vec<String>),
    Number(Vec<f64>),
    Date(Vec<NaiveDateTime>),
}

impl ColumnValues {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnValues::Text(_) => ColumnKind::Text,
            ColumnValues::Number(_) => ColumnKind::Number,
            ColumnValues::Date(_) => ColumnKind::Date,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Text(values) => values.len(),
            ColumnValues::Number(values) => values.len(),
            ColumnValues::Date(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A classified column. The kind cannot change after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: ColumnValues,
}

impl Column {
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.values.kind()
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parsed instants, when this is a date column
    pub fn dates(&self) -> Option<&[NaiveDateTime]> {
        match &self.values {
            ColumnValues::Date(values) => Some(values),
            _ => None,
        }
    }

    /// Parsed numbers, when this is a numeric column
    pub fn numbers(&self) -> Option<&[f64]> {
        match &self.values {
            ColumnValues::Number(values) => Some(values),
            _ => None,
        }
    }
}

/// Per-column report of what inference kept and dropped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnKind,
    pub non_empty: usize,
    pub parsed: usize,
    pub dropped: usize,
}

/// Optional inclusive date bounds. An inverted range is allowed and matches
/// nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

/// Earliest and latest instant of a date column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateBounds {
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
}

/// One chart point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: NaiveDateTime,
    pub y: f64,
}

/// One numeric column's points, ascending by `x`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
