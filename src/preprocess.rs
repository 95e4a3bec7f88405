//! Image loading and conversion to model input tensors.

use std::path::Path;

use image::DynamicImage;
use ndarray::Array4;

use crate::config::{ClassifierConfig, TensorLayout};
use crate::error::SessionError;

/// Decodes the image file at `path`. The format is picked from the extension
/// and falls back to sniffing the content.
///
/// # Errors
///
/// Returns `SessionError::ImageLoad` if the file cannot be read or decoded.
pub fn load_image(path: &Path) -> Result<DynamicImage, SessionError> {
    image::ImageReader::open(path)
        .map_err(image::ImageError::IoError)
        .and_then(|reader| reader.with_guessed_format().map_err(image::ImageError::IoError))
        .and_then(|reader| reader.decode())
        .map_err(|source| SessionError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })
}

/// Converts an image into a batch of one, ready for `Model::predict`.
///
/// The image is converted to RGB and stretched to the configured input size
/// without preserving aspect ratio. Each channel value is divided by
/// `config.pixel_scale`, so the default configuration yields values in `[0, 1]`.
pub fn image_to_tensor(image: &DynamicImage, config: &ClassifierConfig) -> Array4<f32> {
    let rgb = image.to_rgb8();
    let resized = image::imageops::resize(
        &rgb,
        config.input_width,
        config.input_height,
        config.interpolation.filter_type(),
    );

    let scale = config.pixel_scale;
    let mut tensor = Array4::<f32>::zeros(config.input_shape());
    for (x, y, pixel) in resized.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        for (c, &value) in pixel.0.iter().enumerate() {
            let value = value as f32 / scale;
            match config.layout {
                TensorLayout::Nhwc => tensor[[0, y, x, c]] = value,
                TensorLayout::Nchw => tensor[[0, c, y, x]] = value,
            }
        }
    }
    tensor
}

/// `load_image` followed by `image_to_tensor`.
pub fn load_tensor(path: &Path, config: &ClassifierConfig) -> Result<Array4<f32>, SessionError> {
    let image = load_image(path)?;
    log::debug!(
        "decoded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image_to_tensor(&image, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    #[test]
    fn test_default_tensor_is_nhwc_224() {
        let tensor = image_to_tensor(&solid(640, 480, [0, 0, 0]), &ClassifierConfig::default());
        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
    }

    #[test]
    fn test_values_are_scaled_into_unit_range() {
        let config = ClassifierConfig::default().with_input_size(4, 4);
        let tensor = image_to_tensor(&solid(8, 8, [255, 0, 51]), &config);

        assert_abs_diff_eq!(tensor[[0, 2, 1, 0]], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(tensor[[0, 2, 1, 1]], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(tensor[[0, 2, 1, 2]], 0.2, epsilon = 1e-6);
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_nchw_layout_puts_channels_first() {
        let config = ClassifierConfig::default()
            .with_input_size(2, 3)
            .with_layout(TensorLayout::Nchw);
        let tensor = image_to_tensor(&solid(2, 3, [255, 0, 0]), &config);

        assert_eq!(tensor.shape(), &[1, 3, 3, 2]);
        assert_abs_diff_eq!(tensor[[0, 0, 2, 1]], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(tensor[[0, 1, 2, 1]], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_alpha_channel_is_dropped() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 255, 0, 10])));
        let config = ClassifierConfig::default().with_input_size(4, 4);
        let tensor = image_to_tensor(&rgba, &config);

        assert_eq!(tensor.shape(), &[1, 4, 4, 3]);
        assert_abs_diff_eq!(tensor[[0, 0, 0, 1]], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_resize_keeps_halves_apart() {
        // Left half black, right half white; nearest-neighbour must not blend them.
        let mut img = RgbImage::new(8, 2);
        for (x, _, pixel) in img.enumerate_pixels_mut() {
            *pixel = if x < 4 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) };
        }
        let config = ClassifierConfig::default().with_input_size(4, 1);
        let tensor = image_to_tensor(&DynamicImage::ImageRgb8(img), &config);

        assert_abs_diff_eq!(tensor[[0, 0, 0, 0]], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(tensor[[0, 0, 3, 0]], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_load_tensor_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fundus.png");
        solid(30, 20, [255, 255, 255]).save(&path).unwrap();

        let tensor = load_tensor(&path, &ClassifierConfig::default()).unwrap();
        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
        assert_abs_diff_eq!(tensor[[0, 100, 100, 1]], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_load_image_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.jpg");
        let result = load_image(&path);
        assert!(matches!(result, Err(SessionError::ImageLoad { .. })));
    }

    #[test]
    fn test_load_image_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let result = load_image(&path);
        assert!(matches!(result, Err(SessionError::ImageLoad { .. })));
    }
}
