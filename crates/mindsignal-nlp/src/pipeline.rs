use std::path::Path;

use mindsignal_core::classification::{ClassLabel, Prediction, TextClassifier};
use mindsignal_core::error::ClassifierError;

use crate::error::NlpError;
use crate::model::ModelArtifact;
use crate::normalize::TextNormalizer;
use crate::vectorizer::TfidfVectorizer;

pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const MODEL_FILE: &str = "model.json";

/// normalize → vectorize → classify.
pub struct SuicideClassifier {
    normalizer: TextNormalizer,
    vectorizer: TfidfVectorizer,
    model: ModelArtifact,
}

impl SuicideClassifier {
    pub fn new(
        normalizer: TextNormalizer,
        vectorizer: TfidfVectorizer,
        model: ModelArtifact,
    ) -> Result<Self, NlpError> {
        model.validate()?;
        if vectorizer.width() != model.width() {
            return Err(NlpError::ArtifactMismatch {
                vectorizer: vectorizer.width(),
                model: model.width(),
            });
        }
        Ok(Self {
            normalizer,
            vectorizer,
            model,
        })
    }

    /// Load `vectorizer.json` and `model.json` from `dir`.
    pub fn load(dir: &Path) -> Result<Self, NlpError> {
        let vectorizer = TfidfVectorizer::load(&dir.join(VECTORIZER_FILE))?;
        let model = ModelArtifact::load(&dir.join(MODEL_FILE))?;
        Self::new(TextNormalizer::english(), vectorizer, model)
    }

    pub fn predict(&self, text: &str) -> Result<Prediction, NlpError> {
        let normalized = self.normalizer.normalize(text);
        let features = self.vectorizer.transform(&normalized);
        let outcome = self.model.predict(&features);
        let label = ClassLabel::from_class(outcome.class)
            .map_err(|e| NlpError::Artifact(e.to_string()))?;

        tracing::debug!(
            tokens = normalized.split_whitespace().count(),
            active_features = features.entries().len(),
            ?label,
            probability = outcome.probability,
            "text classified"
        );

        Ok(Prediction {
            label,
            confidence: Some(outcome.probability),
        })
    }
}

impl TextClassifier for SuicideClassifier {
    fn normalize(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }

    fn classify(&self, text: &str) -> Result<Prediction, ClassifierError> {
        Ok(self.predict(text)?)
    }
}
