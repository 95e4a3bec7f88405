use image::imageops::FilterType;

use crate::error::ConfigError;

/// Width of the square input the bundled retinopathy model was trained on.
pub const INPUT_WIDTH: u32 = 224;
/// Height of the model input.
pub const INPUT_HEIGHT: u32 = 224;
/// Scores strictly above this value are classified as positive.
pub const DECISION_THRESHOLD: f64 = 0.5;
/// 8-bit pixel values are divided by this to land in [0, 1].
pub const PIXEL_SCALE: f32 = 255.0;

/// File extensions accepted by the "Load Model" dialog.
pub const MODEL_EXTENSIONS: &[&str] = &["onnx"];
/// File extensions accepted by the "Select Image" dialog.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Memory layout of the 4-D input tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub enum TensorLayout {
    /// `[batch, height, width, channels]`, the Keras convention.
    #[default]
    Nhwc,
    /// `[batch, channels, height, width]`, the PyTorch convention.
    Nchw,
}

/// Resampling filter used when resizing to the model input size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Interpolation {
    #[default]
    Nearest,
    Triangle,
    CatmullRom,
    Lanczos3,
}

impl Interpolation {
    pub fn filter_type(self) -> FilterType {
        match self {
            Interpolation::Nearest => FilterType::Nearest,
            Interpolation::Triangle => FilterType::Triangle,
            Interpolation::CatmullRom => FilterType::CatmullRom,
            Interpolation::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// The assumptions a session makes about the model it drives.
///
/// The defaults match a Keras binary classifier with a single sigmoid output
/// that takes `224x224` RGB input scaled into `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct ClassifierConfig {
    pub input_width: u32,
    pub input_height: u32,
    pub threshold: f64,
    pub pixel_scale: f32,
    pub layout: TensorLayout,
    pub interpolation: Interpolation,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            input_width: INPUT_WIDTH,
            input_height: INPUT_HEIGHT,
            threshold: DECISION_THRESHOLD,
            pixel_scale: PIXEL_SCALE,
            layout: TensorLayout::default(),
            interpolation: Interpolation::default(),
        }
    }
}

impl ClassifierConfig {
    pub fn with_input_size(mut self, width: u32, height: u32) -> Self {
        self.input_width = width;
        self.input_height = height;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_pixel_scale(mut self, pixel_scale: f32) -> Self {
        self.pixel_scale = pixel_scale;
        self
    }

    pub fn with_layout(mut self, layout: TensorLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Shape of the batched input tensor for the configured layout.
    pub fn input_shape(&self) -> [usize; 4] {
        let (h, w) = (self.input_height as usize, self.input_width as usize);
        match self.layout {
            TensorLayout::Nhwc => [1, h, w, 3],
            TensorLayout::Nchw => [1, 3, h, w],
        }
    }

    /// Checks that the configuration describes a usable model input.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroInputSize` if either input dimension is 0.
    /// Returns `ConfigError::ThresholdOutOfRange` if the threshold is NaN or outside `[0, 1]`.
    /// Returns `ConfigError::InvalidPixelScale` if the pixel scale is not a positive finite number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_width == 0 || self.input_height == 0 {
            return Err(ConfigError::ZeroInputSize {
                width: self.input_width,
                height: self.input_height,
            });
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.threshold));
        }
        if !self.pixel_scale.is_finite() || self.pixel_scale <= 0.0 {
            return Err(ConfigError::InvalidPixelScale(self.pixel_scale));
        }
        Ok(())
    }
}
