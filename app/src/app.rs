use crate::notice::Notice;
use crate::preview;
use crate::ui;

use eframe::egui;
use eframe::{App, Frame};
use retina::{ModelLoader, Session};
use std::path::PathBuf;

pub const WINDOW_TITLE: &str = "Diabetes Eye Classifier";
pub const WINDOW_SIZE: [f32; 2] = [400.0, 300.0];
/// The selected image is scaled to fit inside this region.
pub const PREVIEW_SIZE: [u32; 2] = [360, 180];

/// The main application struct.
/// It owns the classifier session and the few bits of state the UI needs on top.
pub struct ClassifierApp<L: ModelLoader> {
    // --- Core State ---
    pub session: Session<L>,

    // --- UI State ---
    /// Decoded preview waiting to be uploaded as a texture on the next frame.
    pub pending_preview: Option<egui::ColorImage>,
    /// The texture currently shown under the buttons.
    pub preview: Option<egui::TextureHandle>,
    /// The open modal notice, if any. Controls are disabled while it is shown.
    pub notice: Option<Notice>,
}

impl<L: ModelLoader> ClassifierApp<L> {
    pub fn new(loader: L) -> Self {
        Self {
            session: Session::new(loader),
            pending_preview: None,
            preview: None,
            notice: None,
        }
    }

    /// Handles the outcome of the "Load Model" dialog. `None` means it was cancelled.
    pub fn load_model(&mut self, path: Option<PathBuf>) {
        let Some(path) = path else {
            return;
        };
        self.notice = Some(match self.session.load_model(&path) {
            Ok(()) => Notice::model_loaded(),
            Err(e) => Notice::from_error(&e),
        });
    }

    /// Handles the outcome of the "Select Image" dialog and refreshes the preview.
    pub fn select_image(&mut self, path: Option<PathBuf>) {
        let Some(path) = path else {
            return;
        };
        self.pending_preview = preview::load_preview(&path, PREVIEW_SIZE);
        self.preview = None;
        self.session.select_image(path);
    }

    /// Runs the classifier and reports the result, or why it could not run.
    pub fn classify(&mut self) {
        self.notice = Some(match self.session.classify() {
            Ok(prediction) => Notice::prediction(prediction),
            Err(e) => Notice::from_error(&e),
        });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

impl<L: ModelLoader> App for ClassifierApp<L> {
    /// The main update loop, called by eframe on every frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if let Some(image) = self.pending_preview.take() {
            self.preview = Some(ctx.load_texture(
                "selected-image",
                image,
                egui::TextureOptions::LINEAR,
            ));
        }
        ui::draw_central_panel(self, ctx);
        ui::draw_notice(self, ctx);
    }
}
