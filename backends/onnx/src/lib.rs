//! ONNX Runtime backend for the retina session.
//!
//! Keras `.h5` classifiers are exported to ONNX (e.g. with `tf2onnx`) and the
//! exported graph keeps the Keras NHWC input layout.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use ndarray::Array4;
use ort::environment::Environment;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::Tensor;
use retina::{Model, ModelError, ModelLoader};

/// ONNX Runtime allows one environment per process; every loader shares it.
static ENVIRONMENT: Mutex<Option<Environment>> = Mutex::new(None);

fn shared_environment() -> ort::Result<Environment> {
    let mut slot = ENVIRONMENT.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(environment) = slot.as_ref() {
        return Ok(environment.clone());
    }
    let environment = ort::init().with_name("retina").build()?;
    *slot = Some(environment.clone());
    Ok(environment)
}

/// Builds `OnnxModel`s from `.onnx` files.
#[derive(Debug, Clone)]
pub struct OnnxLoader {
    intra_threads: usize,
}

impl Default for OnnxLoader {
    fn default() -> Self {
        Self { intra_threads: 1 }
    }
}

impl OnnxLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of threads ONNX Runtime may use inside one operator.
    pub fn with_intra_threads(mut self, threads: usize) -> Self {
        self.intra_threads = threads.max(1);
        self
    }
}

impl ModelLoader for OnnxLoader {
    type Model = OnnxModel;

    fn load(&self, path: &Path) -> Result<OnnxModel, ModelError> {
        log::info!("Loading ONNX model from: {}", path.display());

        let environment = shared_environment()
            .map_err(|e| ModelError::load(path, format!("failed to create environment: {e}")))?;
        let session = Session::builder(&environment)
            .map_err(|e| ModelError::load(path, format!("failed to create session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::load(path, format!("failed to set optimization: {e}")))?
            .with_intra_threads(self.intra_threads)
            .map_err(|e| ModelError::load(path, format!("failed to set thread count: {e}")))?
            .commit_from_file(path)
            .map_err(|e| ModelError::load(path, e))?;

        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| ModelError::load(path, "model declares no outputs"))?;

        log::debug!(
            "model inputs {:?}, first output {output_name}",
            session.inputs().iter().map(|i| i.name()).collect::<Vec<_>>()
        );

        Ok(OnnxModel {
            session,
            output_name,
        })
    }
}

/// A loaded ONNX Runtime session with a single score output.
pub struct OnnxModel {
    session: Session,
    output_name: String,
}

impl Model for OnnxModel {
    fn predict(&mut self, input: &Array4<f32>) -> Result<f64, ModelError> {
        let shape = input.shape().to_vec();
        let data: Vec<f32> = input.iter().copied().collect();
        let input_tensor = Tensor::from_array((shape, data))
            .map_err(|e| ModelError::Inference(format!("tensor error: {e}")))?;

        let outputs = self
            .session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let output = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| ModelError::Inference(format!("missing output {}", self.output_name)))?;

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| ModelError::Inference(format!("extract error: {e}")))?;

        data.first()
            .map(|&score| f64::from(score))
            .ok_or(ModelError::EmptyOutput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use image::{DynamicImage, Rgb, RgbImage};
    use retina::{Prediction, Session as ClassifierSession};
    use std::path::PathBuf;

    /// A one-node graph: `score = ReduceMax(input)` with keepdims, so the
    /// output is `[1, 1, 1, 1]` holding the brightest scaled pixel value.
    fn max_score_model() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/max_score.onnx")
    }

    #[test]
    fn test_predict_returns_first_output_element() {
        let mut model = OnnxLoader::new().load(&max_score_model()).unwrap();

        let mut input = Array4::<f32>::from_elem((1, 4, 4, 3), 0.25);
        input[[0, 2, 1, 0]] = 0.75;
        assert_abs_diff_eq!(model.predict(&input).unwrap(), 0.75, epsilon = 1e-6);

        let input = Array4::<f32>::from_elem((1, 224, 224, 3), 0.1);
        assert_abs_diff_eq!(model.predict(&input).unwrap(), 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_session_classifies_with_onnx_model() {
        let dir = tempfile::tempdir().unwrap();
        let bright = dir.path().join("bright.png");
        let dark = dir.path().join("dark.png");
        DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 30, Rgb([255, 255, 255])))
            .save(&bright)
            .unwrap();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 30, Rgb([20, 40, 60])))
            .save(&dark)
            .unwrap();

        let mut session = ClassifierSession::new(OnnxLoader::new());
        session.load_model(max_score_model()).unwrap();

        session.select_image(&bright);
        assert_eq!(session.classify().unwrap(), Prediction::Positive);

        session.select_image(&dark);
        assert_eq!(session.classify().unwrap(), Prediction::Negative);
    }

    #[test]
    fn test_loaders_share_one_environment() {
        let first = OnnxLoader::new().load(&max_score_model());
        let second = OnnxLoader::new().with_intra_threads(2).load(&max_score_model());
        assert!(first.is_ok());
        assert!(second.is_ok());
    }

    #[test]
    fn test_missing_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.onnx");
        let result = OnnxLoader::new().load(&path);
        assert!(matches!(result, Err(ModelError::Load { .. })));
    }

    #[test]
    fn test_garbage_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.onnx");
        std::fs::write(&path, b"HDF5 weights, not a protobuf graph").unwrap();

        match OnnxLoader::new().load(&path) {
            Err(ModelError::Load { path: reported, .. }) => assert_eq!(reported, path),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("garbage file loaded as a model"),
        }
    }

    #[test]
    fn test_thread_count_has_a_floor() {
        let loader = OnnxLoader::new().with_intra_threads(0);
        assert_eq!(loader.intra_threads, 1);
    }
}
