//! Core of the retina classifier: a session holding one loaded model and one
//! selected image, and the preprocessing that turns the image into the
//! tensor the model expects.
//!
//! UI code lives in the `retina-app` crate and inference backends in
//! `backends/*`; nothing in here depends on either.

// Include submodules
mod config;
mod error;
mod model;
pub mod preprocess;
mod prediction;
mod session;

// Re-export types from submodules
pub use config::{
    ClassifierConfig, DECISION_THRESHOLD, IMAGE_EXTENSIONS, INPUT_HEIGHT, INPUT_WIDTH,
    Interpolation, MODEL_EXTENSIONS, PIXEL_SCALE, TensorLayout,
};
pub use error::{ConfigError, ModelError, SessionError};
pub use model::{Model, ModelLoader};
pub use prediction::{NEGATIVE_LABEL, POSITIVE_LABEL, Prediction};
pub use session::{Session, SessionState};
