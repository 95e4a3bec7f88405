use retina::{Prediction, SessionError};

/// Severity of a notice, picks the title colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message shown in a modal window until the user dismisses it.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub text: String,
}

impl Notice {
    fn new(level: NoticeLevel, title: &str, text: impl Into<String>) -> Self {
        Self {
            level,
            title: title.to_string(),
            text: text.into(),
        }
    }

    pub fn model_loaded() -> Self {
        Self::new(NoticeLevel::Info, "Model Loaded", "Model loaded successfully.")
    }

    pub fn prediction(prediction: Prediction) -> Self {
        Self::new(
            NoticeLevel::Info,
            "Prediction",
            format!("Prediction: {prediction}"),
        )
    }

    /// Missing model or image become warnings, everything else an error.
    pub fn from_error(error: &SessionError) -> Self {
        let level = if error.is_precondition() {
            NoticeLevel::Warning
        } else {
            NoticeLevel::Error
        };
        Self::new(level, "Error", error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retina::ModelError;

    #[test]
    fn test_prediction_text() {
        let notice = Notice::prediction(Prediction::Positive);
        assert_eq!(notice.title, "Prediction");
        assert_eq!(notice.text, "Prediction: Positive (Diabetic Retinopathy)");

        let notice = Notice::prediction(Prediction::Negative);
        assert_eq!(notice.text, "Prediction: Negative (No Diabetic Retinopathy)");
    }

    #[test]
    fn test_precondition_errors_are_warnings() {
        let notice = Notice::from_error(&SessionError::NoModel);
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.text, "Please load a model first.");

        let notice = Notice::from_error(&SessionError::NoImage);
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.text, "Please select an image first.");
    }

    #[test]
    fn test_load_failure_is_an_error() {
        let err = SessionError::ModelLoad(ModelError::load("bad.onnx", "not a model"));
        let notice = Notice::from_error(&err);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.text.contains("bad.onnx"));
    }
}
