use std::path::Path;

use ndarray::Array4;

use crate::error::ModelError;

/// A loaded binary classifier.
pub trait Model {
    /// Runs one forward pass and returns the single output score.
    ///
    /// `input` is a batch of one image, already resized and scaled.
    /// Implementations read the first element of the first output, so a model
    /// with a `[1, 1]` sigmoid head yields its class-membership likelihood.
    fn predict(&mut self, input: &Array4<f32>) -> Result<f64, ModelError>;
}

/// Deserializes models from files. One implementation per inference backend.
pub trait ModelLoader {
    type Model: Model;

    /// Loads the model stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Load` if the file is missing or not a recognized model format.
    fn load(&self, path: &Path) -> Result<Self::Model, ModelError>;
}
