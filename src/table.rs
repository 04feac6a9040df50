//! Delimited text parsing into a raw [`Table`].
//!
//! The first record supplies the header names; every later record becomes a
//! [`Row`] keyed by header. Cells are never coerced here. Any structural
//! problem (unterminated quoted field, a record whose field count differs
//! from the header's) fails the whole load with `MalformedInput`.

use crate::error::{GraphError, Result};
use crate::models::{RawCell, Row, Table};
use std::path::Path;
use tracing::{debug, info, warn};

/// Parse delimited text with a header row into a table
pub fn parse_table(raw_text: &str, delimiter: u8) -> Result<Table> {
    let text = raw_text.strip_prefix('\u{feff}').unwrap_or(raw_text);

    if let Some(line) = find_unterminated_quote(text, delimiter) {
        return Err(GraphError::malformed(
            Some(line),
            "quoted field is never closed",
        ));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let header_record = reader.headers().map_err(csv_error)?.clone();
    let headers = unique_headers(header_record.iter());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;

        let mut row = Row::new();
        for (header, text) in header_record.iter().zip(record.iter()) {
            row.insert(header, RawCell::from_text(text));
        }
        rows.push(row);
    }

    debug!(
        "Parsed table: {} columns, {} rows (delimiter {:?})",
        headers.len(),
        rows.len(),
        delimiter as char
    );

    Ok(Table::new(headers, rows))
}

/// Read a file into memory and parse it as a table
pub async fn load_table(path: &Path, delimiter: u8) -> Result<Table> {
    info!("Loading table from {}", path.display());

    let bytes = tokio::fs::read(path).await?;
    let text = String::from_utf8(bytes).map_err(|e| {
        GraphError::malformed(None, format!("input is not valid UTF-8 ({})", e))
    })?;

    let table = parse_table(&text, delimiter)?;
    info!(
        "Loaded {} rows with {} columns from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

/// Collapse repeated header names, keeping the first position of each
fn unique_headers<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for name in names {
        if headers.iter().any(|h| h == name) {
            warn!("Duplicate header '{}': later values overwrite earlier ones", name);
            continue;
        }
        headers.push(name.to_string());
    }
    headers
}

fn csv_error(err: csv::Error) -> GraphError {
    let line = err.position().map(|pos| pos.line());
    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => GraphError::malformed(
            line,
            format!("found {} fields, expected {}", len, expected_len),
        ),
        csv::ErrorKind::Utf8 { err, .. } => {
            GraphError::malformed(line, format!("invalid UTF-8 in field: {}", err))
        }
        _ => GraphError::malformed(line, err.to_string()),
    }
}

/// Line on which a quoted field opens without ever being closed
///
/// A quote only opens a quoted field at the start of a field; `""` inside a
/// quoted field is an escaped quote.
fn find_unterminated_quote(text: &str, delimiter: u8) -> Option<u64> {
    let mut bytes = text.bytes().peekable();
    let mut line = 1u64;
    let mut opened_on = 0u64;
    let mut in_quotes = false;
    let mut at_field_start = true;

    while let Some(byte) = bytes.next() {
        if in_quotes {
            match byte {
                b'"' if bytes.peek() == Some(&b'"') => {
                    bytes.next();
                }
                b'"' => in_quotes = false,
                b'\n' => line += 1,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' if at_field_start => {
                in_quotes = true;
                opened_on = line;
                at_field_start = false;
            }
            b'\n' => {
                line += 1;
                at_field_start = true;
            }
            b'\r' => at_field_start = true,
            b if b == delimiter => at_field_start = true,
            _ => at_field_start = false,
        }
    }

    in_quotes.then_some(opened_on)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_semicolon_table() {
        let text = "Date;Temp;Station\n01.03.2024;3,5;north\n02.03.2024;4,0;south\n";
        let table = parse_table(text, b';').unwrap();

        assert_eq!(table.headers, vec!["Date", "Temp", "Station"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get("Temp"), Some("3,5"));
        assert_eq!(table.rows[1].get("Station"), Some("south"));
    }

    #[test]
    fn test_empty_cells_become_absent() {
        let table = parse_table("a;b\n1;\n;2\n", b';').unwrap();

        assert_eq!(table.rows[0].cell("b"), &RawCell::Absent);
        assert_eq!(table.rows[1].cell("a"), &RawCell::Absent);
        assert_eq!(table.rows[1].get("b"), Some("2"));
    }

    #[test]
    fn test_empty_lines_are_skipped() {
        let table = parse_table("a;b\n\n1;2\n\n3;4\n", b';').unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].get("a"), Some("3"));
    }

    #[test]
    fn test_cells_are_not_coerced() {
        let table = parse_table("n\n007\n", b';').unwrap();
        assert_eq!(table.rows[0].get("n"), Some("007"));
    }

    #[test]
    fn test_quoted_fields_keep_delimiters() {
        let table = parse_table("name;note\n\"a;b\";\"say \"\"hi\"\"\"\n", b';').unwrap();
        assert_eq!(table.rows[0].get("name"), Some("a;b"));
        assert_eq!(table.rows[0].get("note"), Some("say \"hi\""));
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let err = parse_table("a;b\n1;2\n1;2;3\n", b';').unwrap_err();
        match err {
            GraphError::MalformedInput { message } => {
                assert!(message.contains("line 3"), "unexpected message: {}", message);
                assert!(message.contains("found 3 fields, expected 2"));
            }
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_quote_is_malformed() {
        let err = parse_table("a;b\n1;\"open\n2;3\n", b';').unwrap_err();
        match err {
            GraphError::MalformedInput { message } => {
                assert!(message.starts_with("line 2"), "unexpected message: {}", message)
            }
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_literal_quote_inside_field_is_not_an_error() {
        let table = parse_table("size\n12\" pipe\n", b';').unwrap();
        assert_eq!(table.rows[0].get("size"), Some("12\" pipe"));
    }

    #[test]
    fn test_duplicate_headers_last_value_wins() {
        let table = parse_table("v;v;w\n1;2;3\n", b';').unwrap();
        assert_eq!(table.headers, vec!["v", "w"]);
        assert_eq!(table.rows[0].get("v"), Some("2"));
    }

    #[test]
    fn test_empty_input_gives_empty_table() {
        let table = parse_table("", b';').unwrap();
        assert!(table.headers.is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_comma_delimiter() {
        let table = parse_table("x,y\n1,2\n", b',').unwrap();
        assert_eq!(table.rows[0].get("y"), Some("2"));
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        let table = parse_table("\u{feff}Date;Temp\n01.03.2024;1\n", b';').unwrap();
        assert_eq!(table.headers[0], "Date");
    }

    #[tokio::test]
    async fn test_load_table_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Date;Temp").unwrap();
        writeln!(temp_file, "01.03.2024;3,5").unwrap();

        let table = load_table(temp_file.path(), b';').await.unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].get("Date"), Some("01.03.2024"));
    }

    #[tokio::test]
    async fn test_load_table_rejects_invalid_utf8() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"a;b\n\xff\xfe;1\n").unwrap();

        let err = load_table(temp_file.path(), b';').await.unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { .. }));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let err = load_table(Path::new("/nonexistent/table.csv"), b';')
            .await
            .unwrap_err();
        assert!(matches!(err, GraphError::Io(_)));
    }
}
