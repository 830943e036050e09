use crate::config::LayoutConfig;
use crate::model::calendar::working_days;
use crate::model::{GanttAction, Task, ViewRow};
use crate::ui::{format_hours, theme};
use egui::{Align, Align2, Color32, Painter, Pos2, Rect, RichText, Rounding, Sense, Stroke, Ui, Vec2};
use egui_phosphor::regular as icons;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Wbs,
    ProjectCase,
    Name,
    Description,
    Assignees,
    Priority,
    Status,
    Start,
    End,
    Days,
    Est,
    Used,
    Remaining,
}

struct ColumnDef {
    kind: Column,
    title: &'static str,
    width: f32,
    align: Align,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef { kind: Column::Wbs, title: "WBS", width: 48.0, align: Align::Center },
    ColumnDef { kind: Column::ProjectCase, title: "Project Case", width: 96.0, align: Align::Min },
    ColumnDef { kind: Column::Name, title: "Task Name", width: 192.0, align: Align::Min },
    ColumnDef { kind: Column::Description, title: "Description", width: 192.0, align: Align::Min },
    ColumnDef { kind: Column::Assignees, title: "Assigned To", width: 128.0, align: Align::Min },
    ColumnDef { kind: Column::Priority, title: "Priority", width: 96.0, align: Align::Min },
    ColumnDef { kind: Column::Status, title: "Status", width: 112.0, align: Align::Min },
    ColumnDef { kind: Column::Start, title: "Start", width: 96.0, align: Align::Center },
    ColumnDef { kind: Column::End, title: "End", width: 96.0, align: Align::Center },
    ColumnDef { kind: Column::Days, title: "Days", width: 80.0, align: Align::Max },
    ColumnDef { kind: Column::Est, title: "EST", width: 80.0, align: Align::Max },
    ColumnDef { kind: Column::Used, title: "USED", width: 80.0, align: Align::Max },
    ColumnDef { kind: Column::Remaining, title: "REM", width: 80.0, align: Align::Max },
];

const CELL_PADDING: f32 = 8.0;

fn grid_width() -> f32 {
    COLUMNS.iter().map(|c| c.width).sum()
}

/// Render the task grid (left panel). Rows come from the shared view so
/// they line up with the timeline; `scroll_y` is the shared vertical offset.
pub fn show_gantt_grid(
    rows: &[ViewRow<'_>],
    selected_task: Option<&str>,
    layout: &LayoutConfig,
    scroll_y: &mut f32,
    ui: &mut Ui,
) -> GanttAction {
    let mut action = GanttAction::None;
    let width = grid_width();

    egui::ScrollArea::horizontal()
        .id_salt("grid_h")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.spacing_mut().item_spacing = Vec2::ZERO;
            draw_column_headers(ui, width, layout);

            if rows.is_empty() {
                action = show_empty_state(ui);
                return;
            }

            let output = egui::ScrollArea::vertical()
                .id_salt("grid_rows")
                .auto_shrink([false, false])
                .vertical_scroll_offset(*scroll_y)
                .show(ui, |ui| {
                    for view_row in rows {
                        let row_action = draw_row(ui, view_row, selected_task, layout, width);
                        action = std::mem::take(&mut action).or(row_action);
                    }
                });
            *scroll_y = output.state.offset.y;
        });

    action
}

fn draw_column_headers(ui: &mut Ui, width: f32, layout: &LayoutConfig) {
    let (rect, _) =
        ui.allocate_exact_size(Vec2::new(width, layout.header_height()), Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, theme::BG_HEADER);
    painter.line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let mut x = rect.left();
    for col in COLUMNS {
        let cell = Rect::from_min_size(Pos2::new(x, rect.top()), Vec2::new(col.width, rect.height()));
        cell_text(&painter, cell, col.title, col.align, theme::font_header(), theme::TEXT_PRIMARY);
        painter.line_segment(
            [cell.right_top(), cell.right_bottom()],
            Stroke::new(1.0, theme::BORDER_SUBTLE),
        );
        x += col.width;
    }
}

fn draw_row(
    ui: &mut Ui,
    view_row: &ViewRow<'_>,
    selected_task: Option<&str>,
    layout: &LayoutConfig,
    width: f32,
) -> GanttAction {
    let mut action = GanttAction::None;
    let row = &view_row.row;
    let task = row.task;
    let is_selected = selected_task == Some(task.id.as_str());

    let (rect, response) = ui.allocate_exact_size(Vec2::new(width, layout.row_height), Sense::click());
    let painter = ui.painter_at(rect);

    let row_bg = if is_selected {
        theme::BG_SELECTED
    } else if response.hovered() {
        theme::BG_ROW_HOVER
    } else if view_row.index % 2 == 0 {
        theme::BG_PANEL
    } else {
        theme::BG_DARK
    };
    painter.rect_filled(rect, 0.0, row_bg);
    painter.line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(0.5, theme::BORDER_SUBTLE),
    );

    let mut toggle_clicked = false;
    let mut x = rect.left();
    for col in COLUMNS {
        let cell = Rect::from_min_size(Pos2::new(x, rect.top()), Vec2::new(col.width, rect.height()));
        match col.kind {
            Column::Name => {
                let indent = row.depth as f32 * theme::INDENT_PER_LEVEL;
                if row.has_children {
                    let toggle_rect = Rect::from_center_size(
                        Pos2::new(cell.left() + CELL_PADDING + indent + 7.0, cell.center().y),
                        Vec2::splat(18.0),
                    );
                    let toggle = ui.interact(
                        toggle_rect,
                        ui.make_persistent_id(("grid-toggle", &task.id)),
                        Sense::click(),
                    );
                    if toggle.hovered() {
                        painter.rect_filled(toggle_rect, Rounding::same(3.0), theme::BG_ROW_HOVER);
                    }
                    let icon = if row.expanded { icons::CARET_DOWN } else { icons::CARET_RIGHT };
                    painter.text(
                        toggle_rect.center(),
                        Align2::CENTER_CENTER,
                        icon,
                        theme::font_cell(),
                        theme::TEXT_SECONDARY,
                    );
                    if toggle.clicked() {
                        toggle_clicked = true;
                        action = GanttAction::ToggleExpand(task.id.clone());
                    }
                }
                let name_cell = Rect::from_min_max(
                    Pos2::new(cell.left() + indent + 20.0, cell.top()),
                    cell.max,
                );
                cell_text(&painter, name_cell, &task.name, Align::Min, theme::font_cell(), theme::TEXT_PRIMARY);
            }
            Column::Priority => {
                badge(&painter, cell, task.priority.label(), theme::priority_color(task.priority));
            }
            Column::Status => {
                badge(&painter, cell, task.status.label(), theme::status_color(task.status));
            }
            Column::Remaining => {
                let remaining = task.remaining_hours();
                let color = if remaining < 0.0 { theme::TEXT_NEGATIVE } else { theme::TEXT_PRIMARY };
                cell_text(&painter, cell, &format_hours(remaining), col.align, theme::font_header(), color);
            }
            kind => {
                let text = plain_cell(kind, task, &row.wbs);
                cell_text(&painter, cell, &text, col.align, theme::font_cell(), theme::TEXT_SECONDARY);
            }
        }
        painter.line_segment(
            [cell.right_top(), cell.right_bottom()],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
        x += col.width;
    }

    if response.clicked() && !toggle_clicked {
        action = GanttAction::Select(task.id.clone());
    }

    response.context_menu(|ui| {
        if ui.button(format!("{}  Add Task", icons::PLUS)).clicked() {
            action = GanttAction::Add { parent_id: None };
            ui.close_menu();
        }
        if ui.button(format!("{}  Add Subtask", icons::PLUS)).clicked() {
            action = GanttAction::Add { parent_id: Some(task.id.clone()) };
            ui.close_menu();
        }
        ui.separator();
        let delete = egui::Button::new(
            RichText::new(format!("{}  Delete Task", icons::TRASH)).color(theme::TEXT_NEGATIVE),
        );
        if ui.add(delete).clicked() {
            action = GanttAction::Delete(task.id.clone());
            ui.close_menu();
        }
    });

    action
}

fn plain_cell(kind: Column, task: &Task, wbs: &str) -> String {
    match kind {
        Column::Wbs => wbs.to_string(),
        Column::ProjectCase => task.project_case.clone(),
        Column::Description => task.description.clone(),
        Column::Assignees => task.assignee_list(),
        Column::Start => task.start.format("%d-%b-%y").to_string(),
        Column::End => task.end.format("%d-%b-%y").to_string(),
        Column::Days => working_days(task.start, task.end).to_string(),
        Column::Est => format_hours(task.est_hours),
        Column::Used => format_hours(task.used_hours),
        Column::Name | Column::Priority | Column::Status | Column::Remaining => String::new(),
    }
}

/// Single-line text clipped to its cell.
fn cell_text(
    painter: &Painter,
    cell: Rect,
    text: &str,
    align: Align,
    font: egui::FontId,
    color: Color32,
) {
    let inner = cell.shrink2(Vec2::new(CELL_PADDING, 0.0));
    let (pos, anchor) = match align {
        Align::Min => (inner.left_center(), Align2::LEFT_CENTER),
        Align::Center => (inner.center(), Align2::CENTER_CENTER),
        Align::Max => (inner.right_center(), Align2::RIGHT_CENTER),
    };
    painter
        .with_clip_rect(inner)
        .text(pos, anchor, text, font, color);
}

fn badge(painter: &Painter, cell: Rect, text: &str, color: Color32) {
    let galley = painter.layout_no_wrap(text.to_string(), theme::font_badge(), Color32::WHITE);
    let size = galley.size() + Vec2::new(12.0, 4.0);
    let rect = Rect::from_min_size(
        Pos2::new(cell.left() + CELL_PADDING, cell.center().y - size.y / 2.0),
        size,
    );
    let clipped = painter.with_clip_rect(cell.shrink(2.0));
    clipped.rect_filled(rect, Rounding::same(size.y / 2.0), color.gamma_multiply(0.85));
    clipped.galley(rect.min + Vec2::new(6.0, 2.0), galley, Color32::WHITE);
}

fn show_empty_state(ui: &mut Ui) -> GanttAction {
    let mut action = GanttAction::None;
    ui.add_space(32.0);
    ui.horizontal(|ui| {
        ui.add_space(24.0);
        ui.vertical(|ui| {
            ui.spacing_mut().item_spacing.y = 6.0;
            ui.label(RichText::new("No tasks yet").strong().size(15.0).color(theme::TEXT_PRIMARY));
            ui.label(
                RichText::new("Add a task to start planning.")
                    .size(12.0)
                    .color(theme::TEXT_DIM),
            );
            let btn = egui::Button::new(
                RichText::new(format!("{}  Add Task", icons::PLUS)).color(Color32::WHITE).size(12.0),
            )
            .fill(theme::ACCENT)
            .rounding(Rounding::same(5.0));
            if ui.add_sized([140.0, 30.0], btn).clicked() {
                action = GanttAction::Add { parent_id: None };
            }
        });
    });
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn grid_is_as_wide_as_its_columns() {
        assert_eq!(grid_width(), 1376.0);
    }

    #[test]
    fn plain_cells_format_dates_and_hours() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        let mut task = Task::new("Build", start, end);
        task.est_hours = 40.0;
        task.used_hours = 12.5;
        assert_eq!(plain_cell(Column::Start, &task, "1"), "10-Jan-24");
        assert_eq!(plain_cell(Column::End, &task, "1"), "16-Jan-24");
        assert_eq!(plain_cell(Column::Days, &task, "1"), "5");
        assert_eq!(plain_cell(Column::Est, &task, "1"), "40");
        assert_eq!(plain_cell(Column::Used, &task, "1"), "12.5");
        assert_eq!(plain_cell(Column::Wbs, &task, "2.1"), "2.1");
    }
}
