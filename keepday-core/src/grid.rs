//! Calendar grid construction.
//!
//! Pure builders for the month view (a trimmed 6-week grid) and the single
//! Sunday-anchored week strip. Both are plain functions of their input date,
//! so re-invoking with the same argument yields an identical sequence.

use chrono::{Datelike, Duration, NaiveDate};

/// One day slot in a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub date: NaiveDate,
    /// Whether the day belongs to the anchor month.
    pub in_month: bool,
    /// Stable lookup key, zero-padded "YYYY-MM-DD".
    pub key: String,
}

/// Lookup key for a day, matching `Cell::key`.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Build the display grid for the month containing `anchor`.
///
/// Starts on the Sunday on or before day 1 of the month, lays out 6 full
/// weeks (42 cells), then trims leading/trailing rows that contain no
/// in-month day. The result length is always a multiple of 7, between 28
/// and 42, and contains every day of the anchor month exactly once.
pub fn month_grid(anchor: NaiveDate) -> Vec<Cell> {
    let first = anchor.with_day(1).unwrap();
    let start_offset = first.weekday().num_days_from_sunday() as i64;
    let start = first - Duration::days(start_offset);

    let mut cells: Vec<Cell> = (0..42)
        .map(|i| {
            let date = start + Duration::days(i);
            Cell {
                date,
                in_month: date.year() == anchor.year() && date.month() == anchor.month(),
                key: day_key(date),
            }
        })
        .collect();

    while cells[..7].iter().all(|c| !c.in_month) {
        cells.drain(..7);
    }
    while cells[cells.len() - 7..].iter().all(|c| !c.in_month) {
        cells.truncate(cells.len() - 7);
    }

    cells
}

/// Build the 7-cell week strip for the week containing `any`.
///
/// Always starts on Sunday and may span two months; `in_month` is relative
/// to `any`'s month.
pub fn week_row(any: NaiveDate) -> Vec<Cell> {
    let start = any - Duration::days(any.weekday().num_days_from_sunday() as i64);

    (0..7)
        .map(|i| {
            let date = start + Duration::days(i);
            Cell {
                date,
                in_month: date.year() == any.year() && date.month() == any.month(),
                key: day_key(date),
            }
        })
        .collect()
}
