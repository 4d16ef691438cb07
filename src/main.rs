#![warn(clippy::all, rust_2018_idioms)]

use std::path::PathBuf;

use screen_note::ScreenNoteApp;

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    // An optional settings JSON file; otherwise eframe storage is used.
    let settings_path = std::env::args_os().nth(1).map(PathBuf::from);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Screen Note")
            .with_transparent(true)
            .with_decorations(false)
            .with_always_on_top()
            .with_maximized(true),
        ..Default::default()
    };

    eframe::run_native(
        "screen_note",
        native_options,
        Box::new(|cc| Ok(Box::new(ScreenNoteApp::new(cc, settings_path)))),
    )
}
