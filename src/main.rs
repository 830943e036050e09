#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use plan_gantt::app::GanttApp;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> eframe::Result<()> {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 800.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Plan Gantt"),
        ..Default::default()
    };

    eframe::run_native(
        "Plan Gantt",
        options,
        Box::new(|cc| Ok(Box::new(GanttApp::new(cc)))),
    )
}
