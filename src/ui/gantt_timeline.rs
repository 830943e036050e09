use crate::config::{HeaderMode, LayoutConfig};
use crate::model::calendar::working_days;
use crate::model::{BarGeometry, DragRole, DragTracker, GanttAction, GanttView, Task, ViewRow};
use crate::ui::{format_hours, theme};
use egui::{
    Align2, Color32, Id, Painter, Pos2, Rect, Response, RichText, Rounding, Sense, Stroke, Ui, Vec2,
};
use egui_phosphor::regular as icons;

/// Narrowest strip of a bar body that stays grabbable for moving.
const MIN_BODY_GRAB: f32 = 6.0;

fn drag_tracker_id() -> Id {
    Id::new("gantt-drag-tracker")
}

fn load_tracker(ui: &Ui) -> DragTracker {
    ui.ctx()
        .data(|d| d.get_temp::<DragTracker>(drag_tracker_id()))
        .unwrap_or_default()
}

fn store_tracker(ui: &Ui, tracker: DragTracker) {
    ui.ctx().data_mut(|d| d.insert_temp(drag_tracker_id(), tracker));
}

/// Render the timeline (central panel): date header, day grid and task bars.
pub fn show_gantt_timeline(
    view: &GanttView<'_>,
    selected_task: Option<&str>,
    layout: &LayoutConfig,
    header_mode: HeaderMode,
    scroll_y: &mut f32,
    ui: &mut Ui,
) -> GanttAction {
    let mut action = GanttAction::None;
    let width = view.total_width.max(ui.available_width());

    egui::ScrollArea::horizontal()
        .id_salt("timeline_h")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.spacing_mut().item_spacing = Vec2::ZERO;

            let (header_rect, _) =
                ui.allocate_exact_size(Vec2::new(width, layout.header_height()), Sense::hover());
            draw_timeline_header(&ui.painter_at(header_rect), header_rect, view, header_mode, layout);

            let output = egui::ScrollArea::vertical()
                .id_salt("timeline_rows")
                .auto_shrink([false, false])
                .vertical_scroll_offset(*scroll_y)
                .show(ui, |ui| {
                    let height = view.total_height.max(ui.available_height());
                    let (body_rect, _) =
                        ui.allocate_exact_size(Vec2::new(width, height), Sense::hover());
                    let painter = ui.painter_at(body_rect);

                    draw_day_grid(&painter, body_rect, view, layout);

                    if view.is_empty() {
                        painter.text(
                            Pos2::new(body_rect.left() + 24.0, body_rect.top() + 40.0),
                            Align2::LEFT_CENTER,
                            "No tasks to schedule",
                            theme::font_header(),
                            theme::TEXT_DIM,
                        );
                        let button_rect = Rect::from_min_size(
                            Pos2::new(body_rect.left() + 24.0, body_rect.top() + 60.0),
                            Vec2::new(140.0, 30.0),
                        );
                        let add = egui::Button::new(
                            RichText::new(format!("{}  Add Task", icons::PLUS))
                                .color(Color32::WHITE)
                                .size(12.0),
                        )
                        .fill(theme::ACCENT)
                        .rounding(Rounding::same(5.0));
                        if ui.put(button_rect, add).clicked() {
                            action = GanttAction::Add { parent_id: None };
                        }
                        return;
                    }

                    for row in &view.rows {
                        let bar_action =
                            draw_task_bar(ui, &painter, body_rect.min, row, &view.geometry, selected_task, layout);
                        action = std::mem::take(&mut action).or(bar_action);
                    }
                });
            *scroll_y = output.state.offset.y;
        });

    action
}

fn draw_timeline_header(
    painter: &Painter,
    rect: Rect,
    view: &GanttView<'_>,
    header_mode: HeaderMode,
    layout: &LayoutConfig,
) {
    let day_width = view.geometry.day_width;
    let row_h = layout.header_row_height;
    painter.rect_filled(rect, 0.0, theme::BG_HEADER);

    // Upper row: month or ISO-week groups
    let groups: Vec<(usize, f32, String)> = match header_mode {
        HeaderMode::Months => view
            .headers
            .months
            .iter()
            .map(|m| (m.first_column, m.width(day_width), m.label()))
            .collect(),
        HeaderMode::Weeks => view
            .weeks
            .iter()
            .map(|w| (w.first_column, w.width(day_width), w.label()))
            .collect(),
    };
    for (first_column, group_width, label) in groups {
        let group_rect = Rect::from_min_size(
            Pos2::new(rect.left() + first_column as f32 * day_width, rect.top()),
            Vec2::new(group_width, row_h),
        );
        painter.line_segment(
            [group_rect.right_top(), group_rect.right_bottom()],
            Stroke::new(1.0, theme::BORDER_SUBTLE),
        );
        painter.with_clip_rect(group_rect).text(
            group_rect.center(),
            Align2::CENTER_CENTER,
            label,
            theme::font_header(),
            theme::TEXT_PRIMARY,
        );
    }
    painter.line_segment(
        [
            Pos2::new(rect.left(), rect.top() + row_h),
            Pos2::new(rect.right(), rect.top() + row_h),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    // Lower row: one cell per day
    for day in &view.headers.days {
        let cell = Rect::from_min_size(
            Pos2::new(rect.left() + day.x(day_width), rect.top() + row_h),
            Vec2::new(day_width, row_h),
        );
        if day.is_weekend {
            painter.rect_filled(cell, 0.0, theme::BG_WEEKEND);
        }
        painter.line_segment(
            [cell.right_top(), cell.right_bottom()],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );

        let label = day.date.format("%-d").to_string();
        if day.is_today {
            let radius = (row_h / 2.0 - 2.0).min(day_width / 2.0);
            painter.circle_filled(cell.center(), radius, theme::TODAY);
            painter.text(cell.center(), Align2::CENTER_CENTER, label, theme::font_sub(), Color32::WHITE);
        } else if day_width >= 18.0 {
            let color = if day.is_weekend { theme::TEXT_DIM } else { theme::TEXT_SECONDARY };
            painter.text(cell.center(), Align2::CENTER_CENTER, label, theme::font_sub(), color);
        }
    }
    painter.line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_day_grid(painter: &Painter, body: Rect, view: &GanttView<'_>, layout: &LayoutConfig) {
    painter.rect_filled(body, 0.0, theme::BG_DARK);
    let day_width = view.geometry.day_width;

    for day in &view.headers.days {
        let x = body.left() + day.x(day_width);
        if day.is_weekend {
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(x, body.top()), Vec2::new(day_width, body.height())),
                0.0,
                theme::BG_WEEKEND,
            );
        }
        painter.line_segment(
            [Pos2::new(x + day_width, body.top()), Pos2::new(x + day_width, body.bottom())],
            Stroke::new(0.5, theme::GRID_LINE),
        );
        if day.is_today {
            let cx = x + day_width / 2.0;
            painter.line_segment(
                [Pos2::new(cx, body.top()), Pos2::new(cx, body.bottom())],
                Stroke::new(1.5, theme::TODAY.gamma_multiply(0.6)),
            );
        }
    }

    let mut y = body.top() + layout.row_height;
    while y <= body.bottom() {
        painter.line_segment(
            [Pos2::new(body.left(), y), Pos2::new(body.right(), y)],
            Stroke::new(0.5, theme::GRID_LINE),
        );
        y += layout.row_height;
    }
}

fn draw_task_bar(
    ui: &mut Ui,
    painter: &Painter,
    origin: Pos2,
    row: &ViewRow<'_>,
    geometry: &BarGeometry,
    selected_task: Option<&str>,
    layout: &LayoutConfig,
) -> GanttAction {
    let mut action = GanttAction::None;
    let task = row.row.task;
    let is_selected = selected_task == Some(task.id.as_str());

    let left = origin.x + row.bar.left;
    let top = origin.y + row.bar_top;
    let bar_rect = Rect::from_min_max(
        Pos2::new(left, top),
        Pos2::new((origin.x + row.bar.right()).max(left + 2.0), top + layout.bar_height),
    );
    let handle_w = handle_width(bar_rect.width());
    let left_handle = Rect::from_min_max(
        bar_rect.min,
        Pos2::new(bar_rect.left() + handle_w, bar_rect.bottom()),
    );
    let right_handle = Rect::from_min_max(
        Pos2::new(bar_rect.right() - handle_w, bar_rect.top()),
        bar_rect.max,
    );

    // Handles are registered after the body so they win the hit test.
    let bar_response = ui.interact(
        bar_rect,
        ui.make_persistent_id(("task-bar", &task.id)),
        Sense::click_and_drag(),
    );
    let left_response = ui.interact(
        left_handle,
        ui.make_persistent_id(("task-resize-start", &task.id)),
        Sense::drag(),
    );
    let right_response = ui.interact(
        right_handle,
        ui.make_persistent_id(("task-resize-end", &task.id)),
        Sense::drag(),
    );

    for (role, response) in [
        (DragRole::Move, &bar_response),
        (DragRole::ResizeStart, &left_response),
        (DragRole::ResizeEnd, &right_response),
    ] {
        let drag_action = track_drag(ui, task, role, response, geometry);
        action = action.or(drag_action);
    }

    if bar_response.clicked() {
        action = action.or(GanttAction::Select(task.id.clone()));
    }

    // Live feedback follows the raw pointer delta; dates only change when
    // the gesture ends.
    let live = load_tracker(ui).live(&task.id);
    let shown = match live {
        Some((role, delta_x)) => preview_rect(bar_rect, role, delta_x),
        None => bar_rect,
    };

    let rounding = Rounding::same(theme::BAR_ROUNDING);
    if live.is_some() {
        painter.rect_stroke(bar_rect, rounding, Stroke::new(1.0, theme::BORDER_SUBTLE));
    }
    painter.rect_filled(shown.translate(Vec2::new(1.0, 2.0)), rounding, Color32::from_black_alpha(35));
    let fill = if live.is_some() { theme::BAR_DRAGGING } else { theme::BAR_FILL };
    painter.rect_filled(shown, rounding, fill);

    if is_selected {
        painter.rect_stroke(
            shown.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    if shown.width() > 30.0 {
        let clipped = painter.with_clip_rect(shown.shrink2(Vec2::new(8.0, 0.0)));
        clipped.text(
            Pos2::new(shown.left() + 8.0, shown.center().y),
            Align2::LEFT_CENTER,
            &task.name,
            theme::font_bar(),
            theme::TEXT_ON_BAR,
        );
        clipped.text(
            Pos2::new(shown.right() - 8.0, shown.center().y),
            Align2::RIGHT_CENTER,
            hours_label(task),
            theme::font_bar(),
            Color32::from_white_alpha(200),
        );
    }

    let hovering = bar_response.hovered() || left_response.hovered() || right_response.hovered();
    if left_response.hovered() || right_response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
    } else if bar_response.hovered() && live.is_none() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
    }

    if (is_selected || hovering) && live.is_none() {
        let handle_h = bar_rect.height() * 0.55;
        let handle_y = bar_rect.center().y - handle_h / 2.0;
        for x in [bar_rect.left() + 1.5, bar_rect.right() - 5.5] {
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(x, handle_y), Vec2::new(4.0, handle_h)),
                Rounding::same(2.0),
                theme::HANDLE_COLOR,
            );
        }
    }

    if hovering && live.is_none() {
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            ui.layer_id(),
            Id::new(("task-tip", &task.id)),
            |ui| {
                ui.strong(&task.name);
                ui.label(format!(
                    "{} → {}",
                    task.start.format("%d-%b-%y"),
                    task.end.format("%d-%b-%y"),
                ));
                ui.label(format!("Working days: {}", working_days(task.start, task.end)));
                ui.label(format!(
                    "Hours: {} used / {} estimated",
                    format_hours(task.used_hours),
                    format_hours(task.est_hours)
                ));
            },
        );
    }

    action
}

/// Begin / follow / finish a drag for one role of one bar. Returns an
/// update action only on the frame the gesture ends with a non-zero
/// day delta.
fn track_drag(
    ui: &Ui,
    task: &Task,
    role: DragRole,
    response: &Response,
    geometry: &BarGeometry,
) -> GanttAction {
    if !(response.drag_started() || response.dragged() || response.drag_stopped()) {
        return GanttAction::None;
    }
    let mut tracker = load_tracker(ui);
    let mut action = GanttAction::None;

    if response.drag_started() {
        let origin_x = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos())
            .map(|p| p.x)
            .unwrap_or(0.0);
        tracing::debug!(task = %task.id, role = role.key(), "drag started");
        tracker.begin(task, role, origin_x);
    }

    if response.dragged() && tracker.is_active() {
        if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            tracing::debug!(task = %task.id, role = role.key(), "drag cancelled");
            if let Some(update) = tracker.cancel(geometry) {
                action = GanttAction::UpdateDates(update);
            }
        } else {
            let icon = if role == DragRole::Move {
                egui::CursorIcon::Grabbing
            } else {
                egui::CursorIcon::ResizeHorizontal
            };
            ui.ctx().set_cursor_icon(icon);
            if let Some(pointer) = response.interact_pointer_pos() {
                tracker.update(pointer.x);
            }
        }
    }

    if response.drag_stopped() {
        if let Some(update) = tracker.finish(&task.id, role, geometry) {
            tracing::debug!(task = %task.id, role = role.key(), "drag finished");
            action = GanttAction::UpdateDates(update);
        }
    }

    store_tracker(ui, tracker);
    action
}

/// Width of each resize handle, leaving at least [`MIN_BODY_GRAB`] of the
/// body between them.
fn handle_width(bar_width: f32) -> f32 {
    theme::HANDLE_WIDTH
        .min((bar_width - MIN_BODY_GRAB) / 2.0)
        .max(0.0)
}

/// Where to draw a bar while it is being dragged.
fn preview_rect(bar: Rect, role: DragRole, delta_x: f32) -> Rect {
    match role {
        DragRole::Move => bar.translate(Vec2::new(delta_x, 0.0)),
        DragRole::ResizeStart => Rect::from_min_max(
            Pos2::new((bar.left() + delta_x).min(bar.right() - 2.0), bar.top()),
            bar.max,
        ),
        DragRole::ResizeEnd => Rect::from_min_max(
            bar.min,
            Pos2::new((bar.right() + delta_x).max(bar.left() + 2.0), bar.bottom()),
        ),
    }
}

fn hours_label(task: &Task) -> String {
    format!(
        "({}/{}h)",
        format_hours(task.used_hours),
        format_hours(task.est_hours)
    )
}
