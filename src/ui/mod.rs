pub mod dialogs;
pub mod gantt_grid;
pub mod gantt_timeline;
pub mod task_editor;
pub mod theme;
pub mod toolbar;

/// Hours without a trailing `.0` for whole values.
pub fn format_hours(hours: f32) -> String {
    if hours.fract() == 0.0 {
        format!("{:.0}", hours)
    } else {
        format!("{:.1}", hours)
    }
}
