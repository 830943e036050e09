use chrono::{Duration, NaiveDate};
use plan_gantt::model::{BarGeometry, DateRange, DragRole, Task};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

const DAY_WIDTH: f32 = 32.0;

fn ranges() -> Vec<(NaiveDate, NaiveDate)> {
    vec![
        (d(2024, 1, 10), d(2024, 1, 12)),
        (d(2024, 2, 28), d(2024, 3, 1)),
        (d(2023, 12, 31), d(2023, 12, 31)),
        (d(2024, 6, 1), d(2024, 8, 15)),
    ]
}

#[test]
fn zero_delta_is_identity_for_every_role() {
    let g = BarGeometry::default();
    for (s, e) in ranges() {
        for role in DragRole::all() {
            assert_eq!(g.apply_drag(s, e, *role, 0.0), None);
        }
    }
}

#[test]
fn move_preserves_duration_for_whole_day_deltas() {
    let g = BarGeometry::default();
    for (s, e) in ranges() {
        for k in [-40i64, -3, -1, 1, 2, 17, 365] {
            let r = g
                .apply_drag(s, e, DragRole::Move, k as f32 * DAY_WIDTH)
                .expect("non-zero delta");
            assert_eq!(
                r,
                DateRange { start: s + Duration::days(k), end: e + Duration::days(k) }
            );
            assert_eq!(r.end - r.start, e - s);
        }
    }
}

#[test]
fn resize_end_never_inverts() {
    let g = BarGeometry::default();
    for (s, e) in ranges() {
        for k in [-1000i64, -100, -3, -1, 1, 5] {
            let r = g.apply_drag(s, e, DragRole::ResizeEnd, k as f32 * DAY_WIDTH).unwrap();
            assert_eq!(r.start, s);
            assert!(r.end >= r.start);
        }
        let r = g.apply_drag(s, e, DragRole::ResizeEnd, -1000.0 * DAY_WIDTH).unwrap();
        assert_eq!(r, DateRange { start: s, end: s });
    }
}

#[test]
fn resize_start_never_inverts() {
    let g = BarGeometry::default();
    for (s, e) in ranges() {
        for k in [-5i64, -1, 1, 3, 100, 1000] {
            let r = g.apply_drag(s, e, DragRole::ResizeStart, k as f32 * DAY_WIDTH).unwrap();
            assert_eq!(r.end, e);
            assert!(r.start <= r.end);
        }
        let r = g.apply_drag(s, e, DragRole::ResizeStart, 1000.0 * DAY_WIDTH).unwrap();
        assert_eq!(r, DateRange { start: e, end: e });
    }
}

#[test]
fn left_grows_with_start_date() {
    let g = BarGeometry::default();
    let window_start = d(2024, 1, 1);
    let mut last = f32::NEG_INFINITY;
    for offset in -10..40 {
        let start = window_start + Duration::days(offset);
        let task = Task::new("T", start, start + Duration::days(2));
        let left = g.position(&task, window_start).left;
        assert!(left > last, "left must increase with start date");
        last = left;
    }
}

#[test]
fn partial_day_drag_snaps_to_nearest_day() {
    let g = BarGeometry::default();
    let r = g
        .apply_drag(d(2024, 1, 10), d(2024, 1, 12), DragRole::Move, 40.0)
        .unwrap();
    assert_eq!(r, DateRange { start: d(2024, 1, 11), end: d(2024, 1, 13) });

    let r = g
        .apply_drag(d(2024, 1, 10), d(2024, 1, 12), DragRole::Move, -70.0)
        .unwrap();
    assert_eq!(r, DateRange { start: d(2024, 1, 8), end: d(2024, 1, 10) });
}
