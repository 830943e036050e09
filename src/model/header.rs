//! Date header generation for the timeline.
//!
//! [`generate`] turns a visible window into one [`DayCell`] per calendar day
//! plus the month groups used for the upper header row. [`week_groups`] is
//! the alternate ISO-week partition of the same cells.

use chrono::{Datelike, NaiveDate};

use super::calendar::is_weekend;

/// One calendar day column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Zero-based column index from the window start.
    pub column: usize,
    pub is_weekend: bool,
    pub is_today: bool,
}

impl DayCell {
    pub fn x(&self, day_width: f32) -> f32 {
        self.column as f32 * day_width
    }
}

/// A maximal run of days sharing the same (year, month).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGroup {
    pub year: i32,
    pub month: u32,
    pub first_day: NaiveDate,
    pub first_column: usize,
    pub day_count: usize,
}

impl MonthGroup {
    pub fn label(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }

    pub fn width(&self, day_width: f32) -> f32 {
        self.day_count as f32 * day_width
    }
}

/// A maximal run of days sharing the same ISO week (Monday start).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekGroup {
    pub iso_year: i32,
    pub week: u32,
    /// First day of the run inside the window (not necessarily a Monday).
    pub first_day: NaiveDate,
    pub first_column: usize,
    pub day_count: usize,
}

impl WeekGroup {
    pub fn label(&self) -> String {
        format!("W{:02} {}", self.week, self.iso_year)
    }

    pub fn width(&self, day_width: f32) -> f32 {
        self.day_count as f32 * day_width
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateHeaders {
    pub days: Vec<DayCell>,
    pub months: Vec<MonthGroup>,
}

impl DateHeaders {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Build the day cells and month groups for `[start, end]` inclusive.
///
/// `today` only drives the `is_today` flag. A reversed window yields empty
/// headers.
pub fn generate(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> DateHeaders {
    if start > end {
        return DateHeaders::default();
    }

    let days: Vec<DayCell> = start
        .iter_days()
        .take_while(|date| *date <= end)
        .enumerate()
        .map(|(column, date)| DayCell {
            date,
            column,
            is_weekend: is_weekend(date),
            is_today: date == today,
        })
        .collect();

    let months = runs(&days, |date| (date.year(), date.month()))
        .into_iter()
        .map(|((year, month), first, count)| MonthGroup {
            year,
            month,
            first_day: days[first].date,
            first_column: first,
            day_count: count,
        })
        .collect();

    DateHeaders { days, months }
}

/// Partition day cells into ISO-week runs.
pub fn week_groups(days: &[DayCell]) -> Vec<WeekGroup> {
    runs(days, |date| {
        let iso = date.iso_week();
        (iso.year(), iso.week())
    })
    .into_iter()
    .map(|((iso_year, week), first, count)| WeekGroup {
        iso_year,
        week,
        first_day: days[first].date,
        first_column: first,
        day_count: count,
    })
    .collect()
}

/// Pixel offset of `date` from the window start. Negative before the window.
pub fn offset_of(window_start: NaiveDate, date: NaiveDate, day_width: f32) -> f32 {
    (date - window_start).num_days() as f32 * day_width
}

/// Group consecutive cells by key, returning `(key, first_index, len)`.
fn runs<K: PartialEq>(days: &[DayCell], key: impl Fn(NaiveDate) -> K) -> Vec<(K, usize, usize)> {
    let mut out: Vec<(K, usize, usize)> = Vec::new();
    for (i, cell) in days.iter().enumerate() {
        let k = key(cell.date);
        match out.last_mut() {
            Some((last, _, len)) if *last == k => *len += 1,
            _ => out.push((k, i, 1)),
        }
    }
    out
}
