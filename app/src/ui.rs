use crate::app::{ClassifierApp, PREVIEW_SIZE};
use crate::notice::NoticeLevel;

use eframe::egui::{self, Color32};
use retina::{IMAGE_EXTENSIONS, MODEL_EXTENSIONS, ModelLoader};

/// Draws the buttons, the session status and the image preview.
pub fn draw_central_panel<L: ModelLoader>(app: &mut ClassifierApp<L>, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        // A notice is modal: nothing else reacts until it is dismissed.
        ui.add_enabled_ui(app.notice.is_none(), |ui| {
            ui.vertical_centered_justified(|ui| {
                if ui.button("Load Model").clicked() {
                    let path = rfd::FileDialog::new()
                        .set_title("Load Model")
                        .add_filter("Model Files", MODEL_EXTENSIONS)
                        .pick_file();
                    app.load_model(path);
                }
                if ui.button("Select Image").clicked() {
                    let path = rfd::FileDialog::new()
                        .set_title("Select Image")
                        .add_filter("Image Files", IMAGE_EXTENSIONS)
                        .pick_file();
                    app.select_image(path);
                }
                if ui.button("Classify").clicked() {
                    app.classify();
                }
            });
        });

        ui.separator();
        ui.label(app.session.state().description());
        ui.separator();

        ui.centered_and_justified(|ui| {
            if let Some(texture) = &app.preview {
                let region = egui::vec2(PREVIEW_SIZE[0] as f32, PREVIEW_SIZE[1] as f32);
                ui.add(
                    egui::Image::from_texture(egui::load::SizedTexture::from_handle(texture))
                        .fit_to_exact_size(region),
                );
            }
        });
    });
}

/// Draws the open notice, if any, as a centred window with an OK button.
pub fn draw_notice<L: ModelLoader>(app: &mut ClassifierApp<L>, ctx: &egui::Context) {
    let Some(notice) = &app.notice else {
        return;
    };

    let color = match notice.level {
        NoticeLevel::Info => Color32::LIGHT_BLUE,
        NoticeLevel::Warning => Color32::YELLOW,
        NoticeLevel::Error => Color32::LIGHT_RED,
    };

    let mut dismissed = false;
    egui::Window::new(egui::RichText::new(notice.title.as_str()).color(color))
        .id(egui::Id::new("notice"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(notice.text.as_str());
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    if dismissed {
        app.dismiss_notice();
    }
}
