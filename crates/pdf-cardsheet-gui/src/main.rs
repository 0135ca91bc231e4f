#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

mod app;
mod logger;
mod preview;
mod state;
mod ui_components;
mod worker;

fn main() -> anyhow::Result<()> {
    let logger = logger::AppLogger::new(500);
    if let Err(e) = logger.clone().init() {
        eprintln!("Failed to install logger: {e}");
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let tokio_handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_title("Card Sheet"),
        ..Default::default()
    };

    eframe::run_native(
        "Card Sheet",
        options,
        Box::new(move |cc| Ok(Box::new(app::CardSheetApp::new(cc, tokio_handle, logger)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
