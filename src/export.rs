//! Series export as delimited text or JSON.
//!
//! Delimited output is long format, one point per line: `series;x;y`. When
//! the delimiter is `;` the y value uses a decimal comma so the file reads
//! back the same way it was loaded.

use crate::constants::TIMESTAMP_FORMAT;
use crate::error::{GraphError, Result};
use crate::models::Series;
use std::io::Write;

/// Write every point of every series as one delimited record
pub fn write_series_csv<W: Write>(series: &[Series], writer: W, delimiter: u8) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    let export_err = |e: csv::Error| GraphError::export(e.to_string());

    csv_writer
        .write_record(["series", "x", "y"])
        .map_err(export_err)?;

    for s in series {
        for point in &s.points {
            let x = point.x.format(TIMESTAMP_FORMAT).to_string();
            let y = format_value(point.y, delimiter);
            csv_writer
                .write_record([s.label.as_str(), x.as_str(), y.as_str()])
                .map_err(export_err)?;
        }
    }

    csv_writer
        .flush()
        .map_err(|e| GraphError::export(e.to_string()))?;
    Ok(())
}

/// Render series as a pretty-printed JSON array
pub fn series_to_json(series: &[Series]) -> Result<String> {
    serde_json::to_string_pretty(series).map_err(|e| GraphError::export(e.to_string()))
}

fn format_value(value: f64, delimiter: u8) -> String {
    let text = value.to_string();
    if delimiter == b';' {
        text.replacen('.', ",", 1)
    } else {
        text
    }
}
