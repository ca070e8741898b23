//! D-day math.
//!
//! A D-day is the signed count of whole days between an event's date and
//! today. Both sides are calendar days (no time-of-day), so the difference
//! is free of partial-day artifacts.

use chrono::NaiveDate;

/// Signed day offset from `today` to `event`: positive for future days,
/// zero for today, negative for past days.
pub fn days_until(event: NaiveDate, today: NaiveDate) -> i64 {
    (event - today).num_days()
}

/// Display label for a D-day offset.
///
/// "D+n" only shows up in contexts that also display past events; the
/// upcoming window itself never holds a negative offset.
pub fn label(dday: i64) -> String {
    match dday {
        0 => "D-DAY".to_string(),
        n if n > 0 => format!("D-{n}"),
        n => format!("D+{}", -n),
    }
}
