//! Gobang GUI
//!
//! A graphical interface for playing five-in-a-row against the engine or
//! another player. Log verbosity follows `RUST_LOG` (default `info`).

use gobang::ui::GobangApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([720.0, 560.0])
            .with_title("Gobang"),
        ..Default::default()
    };

    eframe::run_native(
        "Gobang",
        options,
        Box::new(|cc| Ok(Box::new(GobangApp::new(cc)))),
    )
}
