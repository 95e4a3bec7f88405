use std::path::{Path, PathBuf};

use crate::config::ClassifierConfig;
use crate::error::SessionError;
use crate::model::{Model, ModelLoader};
use crate::prediction::Prediction;
use crate::preprocess;

/// Which of the two inputs a session currently has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    ModelOnly,
    ImageOnly,
    Ready,
}

impl SessionState {
    pub fn description(self) -> &'static str {
        match self {
            SessionState::Empty => "No model or image selected",
            SessionState::ModelOnly => "Model loaded, no image selected",
            SessionState::ImageOnly => "Image selected, no model loaded",
            SessionState::Ready => "Ready to classify",
        }
    }
}

struct LoadedModel<M> {
    model: M,
    path: PathBuf,
}

/// Holds the current model and image selection for one classification workflow.
///
/// The session owns its model exclusively. Loading a new one drops the old
/// handle, so a later `classify` can never reach a stale model.
///
/// # Type Parameters
///
/// * `L`: The backend used to deserialize model files (e.g., `onnx_backend::OnnxLoader`).
pub struct Session<L: ModelLoader> {
    loader: L,
    config: ClassifierConfig,
    model: Option<LoadedModel<L::Model>>,
    image_path: Option<PathBuf>,
}

impl<L: ModelLoader> Session<L> {
    /// Creates an empty session using the default classifier configuration.
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            config: ClassifierConfig::default(),
            model: None,
            image_path: None,
        }
    }

    /// Creates an empty session with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidConfig` if `config.validate()` fails.
    pub fn with_config(loader: L, config: ClassifierConfig) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            loader,
            config,
            model: None,
            image_path: None,
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        match (self.model.is_some(), self.image_path.is_some()) {
            (false, false) => SessionState::Empty,
            (true, false) => SessionState::ModelOnly,
            (false, true) => SessionState::ImageOnly,
            (true, true) => SessionState::Ready,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == SessionState::Ready
    }

    /// Path of the model currently loaded, if any.
    pub fn model_path(&self) -> Option<&Path> {
        self.model.as_ref().map(|loaded| loaded.path.as_path())
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }

    /// Loads a model file and makes it the session's model.
    ///
    /// The file is handed straight to the backend; nothing is checked locally.
    /// If loading fails the previously loaded model, if any, stays in place.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ModelLoad` with the backend's error.
    pub fn load_model(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        let model = self.loader.load(path).map_err(|e| {
            log::error!("{e}");
            SessionError::ModelLoad(e)
        })?;

        log::info!("loaded model {}", path.display());
        self.model = Some(LoadedModel {
            model,
            path: path.to_path_buf(),
        });
        Ok(())
    }

    /// Records the image to classify next, replacing any earlier selection.
    ///
    /// The file is not opened here. An empty path clears the selection.
    pub fn select_image(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if path.as_os_str().is_empty() {
            log::debug!("cleared image selection");
            self.image_path = None;
        } else {
            log::info!("selected image {}", path.display());
            self.image_path = Some(path);
        }
    }

    /// Classifies the selected image with the loaded model.
    ///
    /// Reads the image from disk, converts it to the configured input tensor,
    /// runs a single prediction and thresholds the score. The session state is
    /// left unchanged, so the call can be repeated.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoModel` if no model is loaded, checked before the image.
    /// Returns `SessionError::NoImage` if no image is selected.
    /// Returns `SessionError::ImageLoad` if the selected file cannot be decoded.
    /// Returns `SessionError::Inference` if the model fails to produce a score.
    pub fn classify(&mut self) -> Result<Prediction, SessionError> {
        let Some(loaded) = self.model.as_mut() else {
            log::warn!("classify requested without a model");
            return Err(SessionError::NoModel);
        };
        let Some(image_path) = self.image_path.as_deref() else {
            log::warn!("classify requested without an image");
            return Err(SessionError::NoImage);
        };

        let input = preprocess::load_tensor(image_path, &self.config)?;
        log::debug!("input tensor shape {:?}", input.shape());

        let score = loaded.model.predict(&input).map_err(|e| {
            log::error!("{e}");
            SessionError::Inference(e)
        })?;
        let prediction = Prediction::from_score(score, self.config.threshold);
        log::debug!("score {score} against threshold {}", self.config.threshold);
        log::info!("{} -> {prediction}", image_path.display());
        Ok(prediction)
    }
}
