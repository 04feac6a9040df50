//! Test utilities for the value normalizers

use chrono::{NaiveDate, NaiveDateTime};


/// Midnight of a calendar day
pub fn day(year: i32, month: u32, day: u32) -> NaiveDateTime {
    at(year, month, day, 0, 0, 0)
}

/// A wall-clock instant
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}
