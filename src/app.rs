use chrono::{Duration, NaiveDate};

use crate::config::{HeaderMode, Settings};
use crate::model::tree::flatten;
use crate::model::{ExpandState, GanttAction, GanttView, Project, Task, TaskPriority, TaskStatus, TimelineViewport};
use crate::ui;
use crate::ui::task_editor::EditorAction;

/// Main application state.
pub struct GanttApp {
    pub project: Project,
    pub settings: Settings,
    pub viewport: TimelineViewport,
    pub expand: ExpandState,
    pub selected_task: Option<String>,
    /// Vertical offset shared by the grid and the timeline.
    pub row_scroll: f32,
    pub show_about: bool,
    pub status_message: String,
}

impl GanttApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let today = chrono::Local::now().date_naive();
        Self::with_project(Self::sample_project(today), Settings::load(), today)
    }

    /// Build the app around an existing plan, fitting the window to it.
    pub fn with_project(project: Project, settings: Settings, today: NaiveDate) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "using default settings");
                Settings::default()
            }
        };
        let viewport = TimelineViewport::fit_to_tasks(
            &project.tasks,
            settings.lead_days,
            settings.tail_days,
            settings.layout.day_width,
        )
        .unwrap_or_else(|| {
            TimelineViewport::new(
                today - Duration::days(settings.lead_days),
                today + Duration::days(settings.tail_days),
                settings.layout.day_width,
            )
        });

        Self {
            project,
            settings,
            viewport,
            expand: ExpandState::new(),
            selected_task: None,
            row_scroll: 0.0,
            show_about: false,
            status_message: "Ready".to_string(),
        }
    }

    /// Generate a sample plan for demonstration.
    pub fn sample_project(today: NaiveDate) -> Project {
        let day = |offset: i64| today + Duration::days(offset);
        let mut project = Project::new("Website Relaunch");

        let mut kickoff = Task::new("Kickoff workshop", day(-6), day(-5));
        kickoff.project_case = "WEB-01".into();
        kickoff.description = "Align goals and scope".into();
        kickoff.assignees = vec!["Maria".into(), "Jonas".into()];
        kickoff.status = TaskStatus::Completed;
        kickoff.est_hours = 12.0;
        kickoff.used_hours = 14.0;

        let mut requirements = Task::new("Requirements", day(-4), day(3));
        requirements.project_case = "WEB-01".into();
        requirements.description = "Collect stakeholder input".into();
        requirements.assignees = vec!["Jonas".into()];
        requirements.status = TaskStatus::InProgress;
        requirements.priority = TaskPriority::High;
        requirements.est_hours = 40.0;
        requirements.used_hours = 22.0;

        let mut discovery = Task::new("Discovery", day(-6), day(3))
            .with_children(vec![kickoff, requirements]);
        discovery.project_case = "WEB-01".into();
        discovery.status = TaskStatus::InProgress;
        discovery.est_hours = 52.0;
        discovery.used_hours = 36.0;

        let mut wireframes = Task::new("Wireframes", day(4), day(10));
        wireframes.project_case = "WEB-02".into();
        wireframes.assignees = vec!["Lea".into()];
        wireframes.est_hours = 32.0;

        let mut visual = Task::new("Visual design", day(11), day(20));
        visual.project_case = "WEB-02".into();
        visual.assignees = vec!["Lea".into(), "Sam".into()];
        visual.priority = TaskPriority::High;
        visual.est_hours = 60.0;

        let mut review = Task::new("Design review", day(21), day(21));
        review.project_case = "WEB-02".into();
        review.assignees = vec!["Maria".into()];
        review.priority = TaskPriority::Critical;
        review.est_hours = 4.0;

        let mut design = Task::new("Design", day(4), day(21))
            .with_children(vec![wireframes, visual.with_children(vec![review])]);
        design.project_case = "WEB-02".into();
        design.est_hours = 96.0;

        let mut build = Task::new("Implementation", day(18), day(45));
        build.project_case = "WEB-03".into();
        build.description = "Frontend and CMS integration".into();
        build.assignees = vec!["Sam".into(), "Ola".into()];
        build.status = TaskStatus::OnHold;
        build.est_hours = 180.0;

        project.tasks = vec![discovery, design, build];
        project
    }

    // --- Store actions ---

    /// Apply one action from the grid, timeline, toolbar or editor.
    pub fn handle_action(&mut self, action: GanttAction, today: NaiveDate) {
        match action {
            GanttAction::None => {}
            GanttAction::Select(id) => {
                self.selected_task = Some(id);
            }
            GanttAction::ToggleExpand(id) => {
                let expanded = self.expand.toggle(&id);
                tracing::debug!(task = %id, expanded, "toggled row");
            }
            GanttAction::UpdateDates(update) => match self.project.update_dates(&update) {
                Ok(()) => {
                    let name = self
                        .project
                        .find(&update.task_id)
                        .map(|t| t.name.clone())
                        .unwrap_or_default();
                    tracing::info!(task = %update.task_id, start = %update.start, end = %update.end, "task rescheduled");
                    self.status_message = format!(
                        "Updated '{}' ({} → {})",
                        name,
                        update.start.format("%Y-%m-%d"),
                        update.end.format("%Y-%m-%d")
                    );
                }
                Err(e) => self.report_error(e),
            },
            GanttAction::Add { parent_id } => {
                match self.project.add_task(parent_id.as_deref(), today) {
                    Ok(id) => {
                        if let Some(parent) = &parent_id {
                            self.expand.set_expanded(parent, true);
                        }
                        tracing::info!(task = %id, parent = ?parent_id, "task added");
                        self.status_message = if parent_id.is_some() {
                            "Subtask added".to_string()
                        } else {
                            "Task added".to_string()
                        };
                        self.selected_task = Some(id);
                    }
                    Err(e) => self.report_error(e),
                }
            }
            GanttAction::Delete(id) => match self.project.delete_task(&id) {
                Ok(removed) => {
                    let selected_removed = self
                        .selected_task
                        .as_deref()
                        .is_some_and(|sel| flatten(std::slice::from_ref(&removed)).iter().any(|t| t.id == sel));
                    if selected_removed {
                        self.selected_task = None;
                    }
                    self.expand.retain_existing(&self.project.tasks);
                    tracing::info!(task = %id, "task deleted");
                    self.status_message = format!("Deleted '{}'", removed.name);
                }
                Err(e) => self.report_error(e),
            },
        }
    }

    fn report_error(&mut self, e: crate::Error) {
        tracing::warn!(error = %e, "action failed");
        self.status_message = e.to_string();
    }

    // --- View operations ---

    pub fn set_all_expanded(&mut self, expanded: bool) {
        for task in flatten(&self.project.tasks) {
            if task.has_children() {
                self.expand.set_expanded(&task.id, expanded);
            }
        }
    }

    pub fn zoom(&mut self, zoom_in: bool) {
        if zoom_in {
            self.viewport.zoom_in();
        } else {
            self.viewport.zoom_out();
        }
        if self.viewport.day_width != self.settings.layout.day_width {
            self.settings.layout.day_width = self.viewport.day_width;
            self.settings.save();
        }
    }

    pub fn set_header_mode(&mut self, mode: HeaderMode) {
        if self.settings.header_mode != mode {
            self.settings.header_mode = mode;
            self.settings.save();
        }
    }

    pub fn fit_viewport(&mut self) {
        if let Some(vp) = TimelineViewport::fit_to_tasks(
            &self.project.tasks,
            self.settings.lead_days,
            self.settings.tail_days,
            self.viewport.day_width,
        ) {
            self.viewport = vp;
        }
    }
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);
        let today = chrono::Local::now().date_naive();
        let mut pending = GanttAction::None;

        let no_text_focus = ctx.memory(|m| m.focused().is_none());
        if no_text_focus {
            if ctx.input(|i| i.key_pressed(egui::Key::Delete)) {
                if let Some(id) = self.selected_task.clone() {
                    pending = GanttAction::Delete(id);
                }
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Escape) && !i.pointer.any_down()) && !self.show_about {
                self.selected_task = None;
            }
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            let action = ui::toolbar::show_toolbar(self, ui);
            pending = std::mem::take(&mut pending).or(action);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Tasks: {}", self.project.task_count()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        ui.label(
                            egui::RichText::new(format!("Day width: {:.0}px", self.viewport.day_width))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Right panel: editor for the selected task
        if let Some(sel_id) = self.selected_task.clone() {
            let mut editor_action = EditorAction::None;
            egui::SidePanel::right("editor_panel")
                .default_width(ui::theme::EDITOR_PANEL_WIDTH)
                .resizable(true)
                .frame(
                    egui::Frame::default()
                        .fill(ui::theme::BG_PANEL)
                        .inner_margin(egui::Margin::same(8.0))
                        .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
                )
                .show(ctx, |ui| {
                    if let Some(task) = self.project.find_mut(&sel_id) {
                        editor_action = ui::task_editor::show_task_editor(task, ui);
                    }
                });
            match editor_action {
                EditorAction::None => {}
                EditorAction::Changed => {
                    self.project.touch();
                    self.status_message = "Task updated".to_string();
                }
                EditorAction::Close => self.selected_task = None,
                EditorAction::AddSubtask(parent) => {
                    pending = GanttAction::Add { parent_id: Some(parent) };
                }
                EditorAction::Delete(id) => pending = GanttAction::Delete(id),
            }
        }

        // Derived view, rebuilt every frame from the current tree and window.
        let view = GanttView::build(
            &self.project.tasks,
            &self.expand,
            &self.viewport,
            &self.settings.layout,
            today,
        );
        let selected = self.selected_task.as_deref();

        // Left panel: task grid
        let mut grid_action = GanttAction::None;
        egui::SidePanel::left("grid_panel")
            .default_width(720.0)
            .min_width(240.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                grid_action = ui::gantt_grid::show_gantt_grid(
                    &view.rows,
                    selected,
                    &self.settings.layout,
                    &mut self.row_scroll,
                    ui,
                );
            });

        // Central panel: timeline
        let mut timeline_action = GanttAction::None;
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            timeline_action = ui::gantt_timeline::show_gantt_timeline(
                &view,
                selected,
                &self.settings.layout,
                self.settings.header_mode,
                &mut self.row_scroll,
                ui,
            );
        });
        drop(view);

        let action = pending.or(grid_action).or(timeline_action);
        self.handle_action(action, today);

        // Dialogs
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
