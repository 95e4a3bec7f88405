use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by an inference backend.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The file could not be opened or is not a model the backend understands.
    #[error("failed to load model from {}: {message}", .path.display())]
    Load { path: PathBuf, message: String },
    /// The forward pass itself failed.
    #[error("inference failed: {0}")]
    Inference(String),
    /// The model ran but produced no score to threshold.
    #[error("model produced an empty output tensor")]
    EmptyOutput,
}

impl ModelError {
    pub fn load(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        ModelError::Load {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Invalid `ClassifierConfig` values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("input size must be non-zero, got {width}x{height}")]
    ZeroInputSize { width: u32, height: u32 },
    #[error("decision threshold must lie in [0, 1], got {0}")]
    ThresholdOutOfRange(f64),
    #[error("pixel scale must be a positive number, got {0}")]
    InvalidPixelScale(f32),
}

/// Errors returned by `Session` operations.
///
/// Each one aborts only the action that produced it; the session stays usable.
#[derive(Debug, Error)]
pub enum SessionError {
    /// `classify` was called before any model was loaded.
    #[error("Please load a model first.")]
    NoModel,
    /// `classify` was called before any image was selected.
    #[error("Please select an image first.")]
    NoImage,
    #[error(transparent)]
    ModelLoad(ModelError),
    #[error("failed to read image {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Inference(ModelError),
    #[error("invalid classifier configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl SessionError {
    /// True for the missing-model and missing-image cases, which are user
    /// mistakes rather than failures.
    pub fn is_precondition(&self) -> bool {
        matches!(self, SessionError::NoModel | SessionError::NoImage)
    }
}
