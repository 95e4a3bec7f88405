use std::path::Path;

use eframe::egui;
use retina::preprocess;

/// Decodes `path` and shrinks it to fit `max_size`, keeping aspect ratio.
///
/// Returns `None` if the file is not a readable image; the preview area then
/// stays empty, same as a label given a broken pixmap.
pub fn load_preview(path: &Path, max_size: [u32; 2]) -> Option<egui::ColorImage> {
    let image = match preprocess::load_image(path) {
        Ok(image) => image,
        Err(e) => {
            log::warn!("no preview: {e}");
            return None;
        }
    };
    let thumbnail = image.thumbnail(max_size[0], max_size[1]).to_rgba8();
    let size = [thumbnail.width() as usize, thumbnail.height() as usize];
    Some(egui::ColorImage::from_rgba_unmultiplied(
        size,
        thumbnail.as_raw(),
    ))
}
