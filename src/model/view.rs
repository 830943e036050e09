//! The derived view: everything the grid and timeline draw, recomputed from
//! the task forest and the visible window whenever either changes.

use chrono::NaiveDate;

use super::drag::{BarGeometry, BarSpan};
use super::header::{self, DateHeaders, WeekGroup};
use super::task::Task;
use super::timeline::TimelineViewport;
use super::tree::{visible_rows, ExpandState, FlatRow};
use crate::config::LayoutConfig;

#[derive(Debug, Clone)]
pub struct ViewRow<'a> {
    pub row: FlatRow<'a>,
    /// Row index in the visible sequence.
    pub index: usize,
    /// Top of the bar, relative to the top of the timeline body.
    pub bar_top: f32,
    pub bar: BarSpan,
}

#[derive(Debug, Clone)]
pub struct GanttView<'a> {
    pub headers: DateHeaders,
    pub weeks: Vec<WeekGroup>,
    pub rows: Vec<ViewRow<'a>>,
    pub geometry: BarGeometry,
    pub total_width: f32,
    pub total_height: f32,
}

impl<'a> GanttView<'a> {
    pub fn build(
        tasks: &'a [Task],
        expand: &ExpandState,
        viewport: &TimelineViewport,
        layout: &LayoutConfig,
        today: NaiveDate,
    ) -> Self {
        let headers = header::generate(viewport.start, viewport.end, today);
        let weeks = header::week_groups(&headers.days);
        let geometry = viewport.geometry(layout.bar_gap);

        let rows: Vec<ViewRow<'a>> = visible_rows(tasks, expand)
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                let bar = geometry.position(row.task, viewport.start);
                ViewRow {
                    row,
                    index,
                    bar_top: index as f32 * layout.row_height + layout.bar_top_offset,
                    bar,
                }
            })
            .collect();

        Self {
            total_width: viewport.total_width(),
            total_height: rows.len() as f32 * layout.row_height,
            headers,
            weeks,
            rows,
            geometry,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn rows_stack_by_row_height() {
        let tasks = vec![
            Task::new("A", d(2024, 1, 10), d(2024, 1, 12))
                .with_id("a")
                .with_children(vec![Task::new("B", d(2024, 1, 2), d(2024, 1, 2)).with_id("b")]),
        ];
        let vp = TimelineViewport::new(d(2024, 1, 1), d(2024, 1, 31), 32.0);
        let layout = LayoutConfig::default();
        let view = GanttView::build(&tasks, &ExpandState::new(), &vp, &layout, d(2024, 1, 15));

        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].bar_top, 8.0);
        assert_eq!(view.rows[1].bar_top, 49.0);
        assert_eq!(view.rows[0].bar, BarSpan { left: 288.0, width: 92.0 });
        assert_eq!(view.rows[1].bar, BarSpan { left: 32.0, width: 28.0 });
        assert_eq!(view.total_width, 31.0 * 32.0);
        assert_eq!(view.total_height, 82.0);
        assert!(view.headers.days[14].is_today);
    }

    #[test]
    fn empty_forest_has_headers_but_no_rows() {
        let vp = TimelineViewport::new(d(2024, 1, 1), d(2024, 1, 7), 32.0);
        let view = GanttView::build(
            &[],
            &ExpandState::new(),
            &vp,
            &LayoutConfig::default(),
            d(2024, 1, 1),
        );
        assert!(view.is_empty());
        assert_eq!(view.headers.days.len(), 7);
        assert_eq!(view.total_height, 0.0);
    }
}
