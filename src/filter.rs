//! Inclusive date-range filtering and date column bounds.

use crate::constants::DAY_FORMAT;
use crate::models::{Column, DateBounds, DateRange};
use crate::normalize::parse_date;
use chrono::{NaiveDate, NaiveDateTime};

/// Whether an instant lies inside the optional inclusive bounds
pub fn in_range(
    instant: NaiveDateTime,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> bool {
    if start.is_none() && end.is_none() {
        return true;
    }
    if start.is_some_and(|start| instant < start) {
        return false;
    }
    if end.is_some_and(|end| instant > end) {
        return false;
    }
    true
}

impl DateRange {
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }

    /// A range without bounds; matches every instant
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        in_range(instant, self.start, self.end)
    }

    /// Both bounds set with start after end; such a range matches nothing
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }
}

/// Earliest and latest value of a date column
///
/// `None` for a column without parsed values or one that is not a date column.
pub fn date_bounds(column: &Column) -> Option<DateBounds> {
    let dates = column.dates()?;
    let min = dates.iter().min()?;
    let max = dates.iter().max()?;
    Some(DateBounds {
        min: *min,
        max: *max,
    })
}

/// Parse a date-range bound as typed into a date input
///
/// Accepts `YYYY-MM-DD` (midnight) and every layout [`parse_date`] knows.
/// Empty input means "no bound".
pub fn parse_range_bound(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(text, DAY_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .or_else(|| parse_date(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColumnValues;

    fn day(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_unbounded_accepts_everything() {
        for instant in [day(1901, 1, 1), day(2024, 3, 1), day(2999, 12, 31)] {
            assert!(in_range(instant, None, None));
            assert!(DateRange::unbounded().contains(instant));
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let start = Some(day(2024, 3, 1));
        let end = Some(day(2024, 3, 31));

        assert!(in_range(day(2024, 3, 1), start, end));
        assert!(in_range(day(2024, 3, 31), start, end));
        assert!(!in_range(day(2024, 2, 29), start, end));
        assert!(!in_range(day(2024, 4, 1), start, end));
    }

    #[test]
    fn test_single_sided_bounds() {
        assert!(in_range(day(2030, 1, 1), Some(day(2024, 1, 1)), None));
        assert!(!in_range(day(2020, 1, 1), Some(day(2024, 1, 1)), None));
        assert!(in_range(day(2020, 1, 1), None, Some(day(2024, 1, 1))));
        assert!(!in_range(day(2030, 1, 1), None, Some(day(2024, 1, 1))));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let range = DateRange::new(Some(day(2024, 3, 31)), Some(day(2024, 3, 1)));
        assert!(range.is_inverted());

        for instant in [
            day(2024, 2, 1),
            day(2024, 3, 1),
            day(2024, 3, 15),
            day(2024, 3, 31),
            day(2024, 5, 1),
        ] {
            assert!(!range.contains(instant));
        }
    }

    #[test]
    fn test_date_bounds() {
        let column = Column::new(
            "Date",
            ColumnValues::Date(vec![day(2024, 3, 5), day(2024, 3, 1), day(2024, 3, 9)]),
        );
        let bounds = date_bounds(&column).unwrap();

        assert_eq!(bounds.min, day(2024, 3, 1));
        assert_eq!(bounds.max, day(2024, 3, 9));
    }

    #[test]
    fn test_date_bounds_absent_for_empty_or_non_date_columns() {
        let empty = Column::new("Date", ColumnValues::Date(Vec::new()));
        assert!(date_bounds(&empty).is_none());

        let numbers = Column::new("Temp", ColumnValues::Number(vec![1.0]));
        assert!(date_bounds(&numbers).is_none());
    }

    #[test]
    fn test_parse_range_bound() {
        assert_eq!(parse_range_bound("2024-03-01"), Some(day(2024, 3, 1)));
        assert_eq!(parse_range_bound("01.03.2024"), Some(day(2024, 3, 1)));
        assert_eq!(parse_range_bound(""), None);
        assert_eq!(parse_range_bound("not a date"), None);
    }
}
