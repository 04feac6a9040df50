//! Calendar instant parsing for the supported date layouts
//!
//! Layouts are tried in a fixed priority order and the first structural
//! match decides the outcome:
//!
//! 1. `D.M.YYYY H:M[:S]` (European, 24-hour time)
//! 2. `D.M.YYYY` (European, date only)
//! 3. `YYYY-MM-DD`
//! 4. `M/D/YYYY` (US)
//! 5. `YYYY-MM-DD[T ]HH:MM:SS...` (ISO date-time, optional fraction/offset)
//! 6. epoch milliseconds, accepted for years strictly inside 1900..3000
//!
//! Instants are wall-clock [`NaiveDateTime`] values. Inputs carrying a UTC
//! offset and epoch timestamps are converted to UTC.

use crate::constants::{DAY_FORMAT, EPOCH_MAX_YEAR_EXCLUSIVE, EPOCH_MIN_YEAR_EXCLUSIVE};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static EUROPEAN_WITH_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([0-9]{1,2})\.([0-9]{1,2})\.([0-9]{4})\s+([0-9]{1,2}):([0-9]{1,2})(?::([0-9]{1,2}))?$",
    )
    .expect("Failed to compile European date-time regex")
});

static EUROPEAN_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2})\.([0-9]{1,2})\.([0-9]{4})$")
        .expect("Failed to compile European date regex")
});

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Failed to compile ISO date regex")
});

static US_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$")
        .expect("Failed to compile US date regex")
});

static ISO_DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})[T ]([0-9]{2}:[0-9]{2}:[0-9]{2}.*)$")
        .expect("Failed to compile ISO date-time regex")
});

/// Parse a raw cell into a calendar instant
///
/// Returns `None` when no layout matches or the matched layout names an
/// impossible calendar value (month 13, 30 February, hour 24).
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = EUROPEAN_WITH_TIME.captures(text) {
        let date = NaiveDate::from_ymd_opt(group(&caps, 3)?, group(&caps, 2)?, group(&caps, 1)?)?;
        let second = match caps.get(6) {
            Some(_) => group(&caps, 6)?,
            None => 0,
        };
        return date.and_hms_opt(group(&caps, 4)?, group(&caps, 5)?, second);
    }

    if let Some(caps) = EUROPEAN_DATE.captures(text) {
        return NaiveDate::from_ymd_opt(group(&caps, 3)?, group(&caps, 2)?, group(&caps, 1)?)
            .and_then(|date| date.and_hms_opt(0, 0, 0));
    }

    if ISO_DATE.is_match(text) {
        return NaiveDate::parse_from_str(text, DAY_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0));
    }

    if let Some(caps) = US_DATE.captures(text) {
        return NaiveDate::from_ymd_opt(group(&caps, 3)?, group(&caps, 1)?, group(&caps, 2)?)
            .and_then(|date| date.and_hms_opt(0, 0, 0));
    }

    if let Some(caps) = ISO_DATE_TIME.captures(text) {
        return parse_iso_date_time(&caps[1], &caps[2]);
    }

    parse_epoch_millis(text)
}

/// Render an instant as its calendar day, `YYYY-MM-DD`
pub fn format_date(instant: &NaiveDateTime) -> String {
    instant.format(DAY_FORMAT).to_string()
}

fn group<T: std::str::FromStr>(caps: &Captures<'_>, index: usize) -> Option<T> {
    caps.get(index)?.as_str().parse().ok()
}

/// ISO date-time with optional fractional seconds and `Z`/`±HH:MM` offset
fn parse_iso_date_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    let candidate = format!("{}T{}", date, time);

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(&candidate) {
        return Some(with_offset.naive_utc());
    }

    NaiveDateTime::parse_from_str(&candidate, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

fn parse_epoch_millis(text: &str) -> Option<NaiveDateTime> {
    let millis = text.parse::<f64>().ok().filter(|value| value.is_finite())?;
    let instant = DateTime::from_timestamp_millis(millis.trunc() as i64)?.naive_utc();

    let year = instant.year();
    (year > EPOCH_MIN_YEAR_EXCLUSIVE && year < EPOCH_MAX_YEAR_EXCLUSIVE).then_some(instant)
}
