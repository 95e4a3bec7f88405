use std::fmt::{Display, Formatter};

pub const POSITIVE_LABEL: &str = "Positive (Diabetic Retinopathy)";
pub const NEGATIVE_LABEL: &str = "Negative (No Diabetic Retinopathy)";

/// Outcome of classifying one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Prediction {
    Positive,
    Negative,
}

impl Prediction {
    /// Maps a model score to a label.
    ///
    /// The comparison is strict: a score equal to `threshold` is negative.
    /// A NaN score never exceeds the threshold and is therefore negative too.
    pub fn from_score(score: f64, threshold: f64) -> Self {
        if score > threshold {
            Prediction::Positive
        } else {
            Prediction::Negative
        }
    }

    pub fn is_positive(self) -> bool {
        self == Prediction::Positive
    }

    pub fn label(self) -> &'static str {
        match self {
            Prediction::Positive => POSITIVE_LABEL,
            Prediction::Negative => NEGATIVE_LABEL,
        }
    }
}

impl Display for Prediction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
