use chrono::NaiveDate;
use plan_gantt::app::GanttApp;
use plan_gantt::config::Settings;
use plan_gantt::model::{BarGeometry, DragPayload, DragRole, GanttAction, Project, Task};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn app() -> GanttApp {
    let mut project = Project::new("Test");
    project.tasks = vec![
        Task::new("Phase", d(2024, 1, 10), d(2024, 1, 20))
            .with_id("phase")
            .with_children(vec![Task::new("Step", d(2024, 1, 10), d(2024, 1, 12)).with_id("step")]),
    ];
    GanttApp::with_project(project, Settings::default(), d(2024, 1, 1))
}

#[test]
fn window_fits_tasks_on_start() {
    let app = app();
    assert_eq!(app.viewport.start, d(2024, 1, 3));
    assert_eq!(app.viewport.end, d(2024, 2, 19));
    assert_eq!(app.viewport.day_width, 32.0);
}

#[test]
fn empty_plan_gets_window_around_today() {
    let app = GanttApp::with_project(Project::new("Empty"), Settings::default(), d(2024, 5, 10));
    assert_eq!(app.viewport.start, d(2024, 5, 3));
    assert_eq!(app.viewport.end, d(2024, 6, 9));
}

#[test]
fn finished_drag_updates_the_store() {
    let mut app = app();
    let step = app.project.find("step").unwrap().clone();
    let update = DragPayload::new(&step, DragRole::ResizeEnd)
        .finish(64.0, &BarGeometry::default())
        .unwrap();
    app.handle_action(GanttAction::UpdateDates(update), d(2024, 1, 1));

    let step = app.project.find("step").unwrap();
    assert_eq!((step.start, step.end), (d(2024, 1, 10), d(2024, 1, 14)));
    // parent is not adjusted
    let phase = app.project.find("phase").unwrap();
    assert_eq!((phase.start, phase.end), (d(2024, 1, 10), d(2024, 1, 20)));
    assert!(app.status_message.contains("Step"));
}

#[test]
fn add_subtask_selects_it_and_expands_parent() {
    let mut app = app();
    app.expand.set_expanded("phase", false);
    app.handle_action(GanttAction::Add { parent_id: Some("phase".into()) }, d(2024, 1, 1));

    let selected = app.selected_task.clone().unwrap();
    let phase = app.project.find("phase").unwrap();
    assert_eq!(phase.sub_tasks.last().unwrap().id, selected);
    assert!(app.expand.is_expanded("phase"));
}

#[test]
fn deleting_parent_clears_selected_child() {
    let mut app = app();
    app.handle_action(GanttAction::Select("step".into()), d(2024, 1, 1));
    app.handle_action(GanttAction::Delete("phase".into()), d(2024, 1, 1));
    assert!(app.project.is_empty());
    assert_eq!(app.selected_task, None);
}

#[test]
fn unknown_task_reports_error_without_panicking() {
    let mut app = app();
    app.handle_action(GanttAction::Delete("ghost".into()), d(2024, 1, 1));
    assert_eq!(app.status_message, "Task not found: ghost");
    assert_eq!(app.project.task_count(), 2);
}

#[test]
fn toggle_and_collapse_all() {
    let mut app = app();
    app.handle_action(GanttAction::ToggleExpand("phase".into()), d(2024, 1, 1));
    assert!(!app.expand.is_expanded("phase"));
    app.set_all_expanded(true);
    assert!(app.expand.is_expanded("phase"));
}

#[test]
fn unusable_settings_are_replaced_with_defaults() {
    let mut settings = Settings::default();
    settings.lead_days = 9_000_000_000_000_000;
    settings.layout.row_height = 0.0;
    let app = GanttApp::with_project(Project::new("Empty"), settings, d(2024, 5, 10));
    assert_eq!(app.settings, Settings::default());
    assert_eq!(app.viewport.start, d(2024, 5, 3));
}
