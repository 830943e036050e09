use crate::model::calendar::working_days;
use crate::model::{Task, TaskPriority, TaskStatus};
use crate::ui::{format_hours, theme};
use egui::{Color32, Id, RichText, Ui};
use egui_phosphor::regular as icons;

/// Actions the editor can request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Changed,
    Close,
    AddSubtask(String),
    Delete(String),
}

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(10.0).color(theme::TEXT_DIM).strong());
}

/// Parse a comma-separated assignee list, dropping blanks.
pub fn parse_assignees(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render the editor for the selected task (right panel).
pub fn show_task_editor(task: &mut Task, ui: &mut Ui) -> EditorAction {
    let mut action = EditorAction::None;
    let task_id = task.id.clone();

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Edit Task").strong().size(13.0).color(theme::TEXT_PRIMARY));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let close = ui.add(egui::Button::new(RichText::new(icons::X).color(theme::TEXT_DIM)).frame(false));
            if close.on_hover_text("Close editor").clicked() {
                action = EditorAction::Close;
            }
        });
    });
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(6.0),
        inner_margin: egui::Margin::same(10.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;
        let full = ui.available_width();

        field_label(ui, "Name");
        if ui
            .add_sized([full, 24.0], egui::TextEdit::singleline(&mut task.name))
            .changed()
        {
            action = EditorAction::Changed;
        }

        field_label(ui, "Project Case");
        if ui
            .add_sized([full, 24.0], egui::TextEdit::singleline(&mut task.project_case))
            .changed()
        {
            action = EditorAction::Changed;
        }

        field_label(ui, "Description");
        if ui
            .add_sized(
                [full, 56.0],
                egui::TextEdit::multiline(&mut task.description).desired_rows(3),
            )
            .changed()
        {
            action = EditorAction::Changed;
        }

        // Free-text buffer so a trailing comma survives while typing.
        field_label(ui, "Assigned To");
        let buffer_id = Id::new(("assignees-edit", &task_id));
        let mut buffer = ui
            .data(|d| d.get_temp::<String>(buffer_id))
            .unwrap_or_else(|| task.assignee_list());
        let resp = ui.add_sized(
            [full, 24.0],
            egui::TextEdit::singleline(&mut buffer).hint_text("Comma separated"),
        );
        if resp.changed() {
            task.assignees = parse_assignees(&buffer);
            action = EditorAction::Changed;
        }
        if resp.has_focus() {
            ui.data_mut(|d| d.insert_temp(buffer_id, buffer));
        } else {
            ui.data_mut(|d| d.remove::<String>(buffer_id));
        }

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                field_label(ui, "Priority");
                egui::ComboBox::from_id_salt("priority_combo")
                    .selected_text(task.priority.label())
                    .width(110.0)
                    .show_ui(ui, |ui| {
                        for p in TaskPriority::all() {
                            if ui.selectable_value(&mut task.priority, *p, p.label()).changed() {
                                action = EditorAction::Changed;
                            }
                        }
                    });
            });
            ui.vertical(|ui| {
                field_label(ui, "Status");
                egui::ComboBox::from_id_salt("status_combo")
                    .selected_text(task.status.label())
                    .width(110.0)
                    .show_ui(ui, |ui| {
                        for s in TaskStatus::all() {
                            if ui.selectable_value(&mut task.status, *s, s.label()).changed() {
                                action = EditorAction::Changed;
                            }
                        }
                    });
            });
        });

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                field_label(ui, "Start");
                let resp = ui.add(egui_extras::DatePickerButton::new(&mut task.start).id_salt("dp_start"));
                if resp.changed() {
                    if task.start > task.end {
                        task.end = task.start;
                    }
                    action = EditorAction::Changed;
                }
            });
            ui.vertical(|ui| {
                field_label(ui, "End");
                let resp = ui.add(egui_extras::DatePickerButton::new(&mut task.end).id_salt("dp_end"));
                if resp.changed() {
                    if task.end < task.start {
                        task.start = task.end;
                    }
                    action = EditorAction::Changed;
                }
            });
        });
        ui.label(
            RichText::new(format!("{} working days", working_days(task.start, task.end)))
                .size(11.0)
                .color(theme::TEXT_SECONDARY),
        );

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                field_label(ui, "Estimated");
                let resp = ui.add(
                    egui::DragValue::new(&mut task.est_hours)
                        .range(0.0..=100_000.0)
                        .speed(0.5)
                        .suffix(" h"),
                );
                if resp.changed() {
                    action = EditorAction::Changed;
                }
            });
            ui.vertical(|ui| {
                field_label(ui, "Used");
                let resp = ui.add(
                    egui::DragValue::new(&mut task.used_hours)
                        .range(0.0..=100_000.0)
                        .speed(0.5)
                        .suffix(" h"),
                );
                if resp.changed() {
                    action = EditorAction::Changed;
                }
            });
            ui.vertical(|ui| {
                field_label(ui, "Remaining");
                let remaining = task.remaining_hours();
                let color = if remaining < 0.0 { theme::TEXT_NEGATIVE } else { theme::TEXT_PRIMARY };
                ui.label(RichText::new(format!("{} h", format_hours(remaining))).color(color));
            });
        });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let add = egui::Button::new(
                RichText::new(format!("{}  Add Subtask", icons::PLUS)).color(Color32::WHITE),
            )
            .fill(theme::ACCENT)
            .rounding(egui::Rounding::same(4.0));
            if ui.add(add).clicked() {
                action = EditorAction::AddSubtask(task_id.clone());
            }
            let delete = egui::Button::new(
                RichText::new(format!("{}  Delete", icons::TRASH)).color(theme::TEXT_NEGATIVE),
            );
            if ui.add(delete).clicked() {
                action = EditorAction::Delete(task_id.clone());
            }
        });
    });

    action
}
