//! Binary post classification labels and the classifier seam.

use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassLabel {
    NonSuicidal,
    Suicidal,
}

impl ClassLabel {
    /// Map the classifier's raw class index (`0` or `1`) to a label.
    pub fn from_class(class: usize) -> Result<Self, ClassifierError> {
        match class {
            0 => Ok(ClassLabel::NonSuicidal),
            1 => Ok(ClassLabel::Suicidal),
            other => Err(ClassifierError::UnknownClass(other)),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ClassLabel::NonSuicidal => "Non-suicidal Post",
            ClassLabel::Suicidal => "Suicidal Post",
        }
    }
}

/// Outcome of classifying one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: ClassLabel,
    /// Probability of `label` when the model can produce one.
    pub confidence: Option<f64>,
}

/// Text classifier: normalization followed by a pretrained model.
///
/// `normalize` is exposed separately because the same function must be
/// applied to training data and to inference input.
pub trait TextClassifier: Send + Sync {
    fn normalize(&self, text: &str) -> String;

    fn classify(&self, text: &str) -> Result<Prediction, ClassifierError>;
}
