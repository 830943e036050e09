use chrono::{Datelike, NaiveDate};

/// True on Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    date.weekday().num_days_from_monday() >= 5
}

/// Count Monday–Friday days in the inclusive range `[start, end]`.
///
/// Display only; the drag math never consults it. Returns 0 when `end`
/// precedes `start`.
pub fn working_days(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        return 0;
    }
    let total = (end - start).num_days() + 1;
    let full_weeks = total / 7;
    let mut count = full_weeks * 5;

    // Walk the leftover partial week.
    let mut date = start + chrono::Duration::days(full_weeks * 7);
    while date <= end {
        if !is_weekend(date) {
            count += 1;
        }
        date += chrono::Duration::days(1);
    }
    count
}
