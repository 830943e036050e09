use chrono::{Duration, NaiveDate};
use plan_gantt::config::LayoutConfig;
use plan_gantt::model::header::{generate, week_groups};
use plan_gantt::model::tree::flatten;
use plan_gantt::model::{BarGeometry, BarSpan, ExpandState, GanttView, Task, TimelineViewport};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn task(id: &str) -> Task {
    Task::new(id, d(2024, 1, 10), d(2024, 1, 12)).with_id(id)
}

#[test]
fn header_lengths_match_inclusive_day_count() {
    let start = d(2023, 11, 20);
    let today = d(2024, 1, 1);
    for extra in [0i64, 1, 10, 45, 400] {
        let end = start + Duration::days(extra);
        let headers = generate(start, end, today);
        let expected = (extra + 1) as usize;
        assert_eq!(headers.days.len(), expected);
        assert_eq!(headers.months.iter().map(|m| m.day_count).sum::<usize>(), expected);
        assert_eq!(week_groups(&headers.days).iter().map(|w| w.day_count).sum::<usize>(), expected);
    }
}

#[test]
fn three_level_tree_flattens_in_preorder() {
    let tasks = vec![task("A").with_children(vec![task("B"), task("C").with_children(vec![task("D")])])];
    let order: Vec<&str> = flatten(&tasks).iter().map(|t| t.id.as_str()).collect();
    assert_eq!(order, vec!["A", "B", "C", "D"]);
}

#[test]
fn reference_bar_position() {
    let span = BarGeometry::new(32.0, 4.0).position(&task("T"), d(2024, 1, 1));
    assert_eq!(span, BarSpan { left: 288.0, width: 92.0 });
}

#[test]
fn view_keeps_grid_and_timeline_rows_aligned_when_collapsed() {
    let tasks = vec![
        task("A").with_children(vec![task("B"), task("C").with_children(vec![task("D")])]),
        task("E"),
    ];
    let vp = TimelineViewport::new(d(2024, 1, 1), d(2024, 1, 31), 32.0);
    let layout = LayoutConfig::default();
    let mut expand = ExpandState::new();
    expand.set_expanded("C", false);

    let view = GanttView::build(&tasks, &expand, &vp, &layout, d(2024, 1, 2));
    let ids: Vec<&str> = view.rows.iter().map(|r| r.row.task.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C", "E"]);
    let tops: Vec<f32> = view.rows.iter().map(|r| r.bar_top).collect();
    assert_eq!(tops, vec![8.0, 49.0, 90.0, 131.0]);
    assert_eq!(view.rows[3].row.wbs, "2");
}

#[test]
fn view_is_rebuilt_from_current_data() {
    let mut tasks = vec![task("A")];
    let vp = TimelineViewport::new(d(2024, 1, 1), d(2024, 1, 31), 32.0);
    let layout = LayoutConfig::default();
    let expand = ExpandState::new();

    let before = GanttView::build(&tasks, &expand, &vp, &layout, d(2024, 1, 2)).rows[0].bar;
    tasks[0].start = d(2024, 1, 11);
    let after = GanttView::build(&tasks, &expand, &vp, &layout, d(2024, 1, 2)).rows[0].bar;
    assert_eq!(before.left + 32.0, after.left);
    assert_eq!(before.width - 32.0, after.width);
}
