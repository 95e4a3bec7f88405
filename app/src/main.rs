mod app;
mod notice;
mod preview;
mod ui;

use app::ClassifierApp;
use onnx_backend::OnnxLoader;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(app::WINDOW_TITLE)
            .with_inner_size(app::WINDOW_SIZE),
        ..Default::default()
    };
    eframe::run_native(
        app::WINDOW_TITLE,
        native_options,
        Box::new(|_cc| Ok(Box::new(ClassifierApp::new(OnnxLoader::new())))),
    )
}
