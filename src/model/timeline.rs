use chrono::NaiveDate;

use super::drag::BarGeometry;
use super::task::Task;
use super::tree::flatten;

pub const MIN_DAY_WIDTH: f32 = 8.0;
pub const MAX_DAY_WIDTH: f32 = 96.0;

/// The visible date window and its column width.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineViewport {
    /// The leftmost visible date.
    pub start: NaiveDate,
    /// The rightmost visible date (inclusive).
    pub end: NaiveDate,
    /// Pixels per day column.
    pub day_width: f32,
}

impl TimelineViewport {
    pub fn new(start: NaiveDate, end: NaiveDate, day_width: f32) -> Self {
        Self {
            start,
            end,
            day_width: day_width.clamp(MIN_DAY_WIDTH, MAX_DAY_WIDTH),
        }
    }

    /// Window covering every task in the forest, padded by `lead_days`
    /// before and `tail_days` after. `None` for an empty forest.
    pub fn fit_to_tasks(
        tasks: &[Task],
        lead_days: i64,
        tail_days: i64,
        day_width: f32,
    ) -> Option<Self> {
        let all = flatten(tasks);
        let min = all.iter().map(|t| t.start).min()?;
        let max = all.iter().map(|t| t.end).max()?;
        Some(Self::new(
            min - chrono::Duration::days(lead_days),
            max + chrono::Duration::days(tail_days),
            day_width,
        ))
    }

    /// Number of day columns in the inclusive window.
    pub fn day_count(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }

    /// Total width in pixels for the visible range.
    pub fn total_width(&self) -> f32 {
        self.day_count() as f32 * self.day_width
    }

    pub fn geometry(&self, bar_gap: f32) -> BarGeometry {
        BarGeometry::new(self.day_width, bar_gap)
    }

    /// Zoom in (wider day columns).
    pub fn zoom_in(&mut self) {
        self.day_width = (self.day_width * 1.2).min(MAX_DAY_WIDTH);
    }

    /// Zoom out (narrower day columns).
    pub fn zoom_out(&mut self) {
        self.day_width = (self.day_width / 1.2).max(MIN_DAY_WIDTH);
    }

    /// Scroll the window by a number of days.
    pub fn scroll_days(&mut self, days: i64) {
        self.start += chrono::Duration::days(days);
        self.end += chrono::Duration::days(days);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn width_covers_every_day_of_the_window() {
        let vp = TimelineViewport::new(d(2024, 1, 1), d(2024, 1, 31), 32.0);
        assert_eq!(vp.day_count(), 31);
        assert_eq!(vp.total_width(), 31.0 * 32.0);

        let inverted = TimelineViewport::new(d(2024, 2, 1), d(2024, 1, 1), 32.0);
        assert_eq!(inverted.total_width(), 0.0);
    }

    #[test]
    fn zoom_is_bounded() {
        let mut vp = TimelineViewport::new(d(2024, 1, 1), d(2024, 1, 31), 32.0);
        for _ in 0..50 {
            vp.zoom_in();
        }
        assert_eq!(vp.day_width, MAX_DAY_WIDTH);
        for _ in 0..50 {
            vp.zoom_out();
        }
        assert_eq!(vp.day_width, MIN_DAY_WIDTH);
    }

    #[test]
    fn scroll_moves_both_edges() {
        let mut vp = TimelineViewport::new(d(2024, 1, 1), d(2024, 1, 31), 32.0);
        vp.scroll_days(-7);
        assert_eq!((vp.start, vp.end), (d(2023, 12, 25), d(2024, 1, 24)));
        assert_eq!(vp.day_count(), 31);
    }

    #[test]
    fn fit_includes_nested_tasks() {
        let child = Task::new("late child", d(2024, 3, 1), d(2024, 3, 9));
        let root = Task::new("root", d(2024, 2, 1), d(2024, 2, 5)).with_children(vec![child]);
        let vp = TimelineViewport::fit_to_tasks(&[root], 7, 30, 32.0).unwrap();
        assert_eq!(vp.start, d(2024, 1, 25));
        assert_eq!(vp.end, d(2024, 4, 8));
        assert!(TimelineViewport::fit_to_tasks(&[], 7, 30, 32.0).is_none());
    }
}
