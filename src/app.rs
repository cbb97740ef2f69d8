use crate::config::config::*;
use crate::config::settings::{self, Settings};
use crate::ui::viewer::PortfolioApp;

pub fn run() {
    let settings = settings::load().unwrap_or_else(|e| {
        tracing::warn!("could not read settings, using defaults: {e}");
        Settings::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = PortfolioApp::new(settings);
            app.init(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    );

    if let Err(e) = result {
        tracing::error!("could not start the application: {e}");
        std::process::exit(1);
    }
}
