use crate::app::GanttApp;
use crate::config::HeaderMode;
use crate::model::GanttAction;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top toolbar / menu bar. Store mutations are returned as an
/// action; view changes are applied directly.
pub fn show_toolbar(app: &mut GanttApp, ui: &mut Ui) -> GanttAction {
    let mut action = GanttAction::None;

    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  Plan  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{}  Add Task", icons::PLUS)).clicked() {
                action = GanttAction::Add { parent_id: None };
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Expand All").clicked() {
                app.set_all_expanded(true);
                ui.close_menu();
            }
            if ui.button("  Collapse All").clicked() {
                app.set_all_expanded(false);
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui.button("  Zoom In").clicked() {
                app.zoom(true);
                ui.close_menu();
            }
            if ui.button("  Zoom Out").clicked() {
                app.zoom(false);
                ui.close_menu();
            }
            if ui.button("  Fit to Tasks").clicked() {
                app.fit_viewport();
                ui.close_menu();
            }
            ui.separator();
            ui.label(RichText::new("Header").small().weak());
            for (mode, label) in [(HeaderMode::Months, "Months"), (HeaderMode::Weeks, "Weeks")] {
                if ui.radio(app.settings.header_mode == mode, label).clicked() {
                    app.set_header_mode(mode);
                    ui.close_menu();
                }
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();

        if ui.button(icons::CARET_LEFT).on_hover_text("Back one week").clicked() {
            app.viewport.scroll_days(-7);
        }
        if ui.button(icons::CARET_RIGHT).on_hover_text("Forward one week").clicked() {
            app.viewport.scroll_days(7);
        }
        if ui.button(icons::MAGNIFYING_GLASS_MINUS).on_hover_text("Zoom out").clicked() {
            app.zoom(false);
        }
        if ui.button(icons::MAGNIFYING_GLASS_PLUS).on_hover_text("Zoom in").clicked() {
            app.zoom(true);
        }
        if ui.button(icons::CORNERS_OUT).on_hover_text("Fit to tasks").clicked() {
            app.fit_viewport();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(&app.project.name).size(11.0).weak());
        });
    });

    action
}
