#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe_annotate::{AnnotateApp, EditorConfig, Mode};

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init(); // Log to stderr (if you run with RUST_LOG=debug).

    // Optional JSON config as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => match EditorConfig::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(err) => {
                log::error!("Ignoring config {}: {}", path, err);
                EditorConfig::default()
            }
        },
        None => EditorConfig::default(),
    };

    // The draw canvas starts in freehand mode unless asked for lines
    let draw_mode = match std::env::var("ANNOTATE_DRAW_MODE").as_deref() {
        Ok("lines") => Mode::Lines,
        _ => Mode::Freehand,
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Annotate")
            .with_inner_size([1320.0, 760.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "eframe_annotate",
        native_options,
        Box::new(move |cc| Ok(Box::new(AnnotateApp::new(cc, config, draw_mode)))),
    )
}
