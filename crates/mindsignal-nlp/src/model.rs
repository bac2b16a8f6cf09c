//! Pretrained binary classifiers over TF-IDF rows.

use std::path::Path;

use serde::Deserialize;

use crate::error::NlpError;
use crate::vectorizer::FeatureVector;

/// On-disk form of a fitted binary classifier. Class `1` is the positive
/// (suicidal) class.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    MultinomialNb {
        class_log_prior: [f64; 2],
        feature_log_prob: [Vec<f64>; 2],
    },
    LogisticRegression {
        coef: Vec<f64>,
        intercept: f64,
    },
}

/// Predicted class index and its probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProbability {
    pub class: usize,
    pub probability: f64,
}

impl ModelArtifact {
    pub fn load(path: &Path) -> Result<Self, NlpError> {
        let contents = std::fs::read_to_string(path).map_err(|source| NlpError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: ModelArtifact = serde_json::from_str(&contents)?;
        model.validate()?;
        tracing::info!(
            path = %path.display(),
            kind = model.kind(),
            width = model.width(),
            "classifier model loaded"
        );
        Ok(model)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::MultinomialNb { .. } => "multinomial_nb",
            ModelArtifact::LogisticRegression { .. } => "logistic_regression",
        }
    }

    /// Number of features the model expects.
    pub fn width(&self) -> usize {
        match self {
            ModelArtifact::MultinomialNb {
                feature_log_prob, ..
            } => feature_log_prob[0].len(),
            ModelArtifact::LogisticRegression { coef, .. } => coef.len(),
        }
    }

    pub fn validate(&self) -> Result<(), NlpError> {
        if self.width() == 0 {
            return Err(NlpError::Artifact("model has no features".to_string()));
        }
        if let ModelArtifact::MultinomialNb {
            feature_log_prob, ..
        } = self
            && feature_log_prob[0].len() != feature_log_prob[1].len()
        {
            return Err(NlpError::Artifact(format!(
                "feature_log_prob rows differ in length ({} vs {})",
                feature_log_prob[0].len(),
                feature_log_prob[1].len()
            )));
        }
        Ok(())
    }

    /// Most likely class. Exact ties go to class `0`.
    pub fn predict(&self, x: &FeatureVector) -> ClassProbability {
        match self {
            ModelArtifact::MultinomialNb {
                class_log_prior,
                feature_log_prob,
            } => {
                let jll0 = class_log_prior[0] + x.dot(&feature_log_prob[0]);
                let jll1 = class_log_prior[1] + x.dot(&feature_log_prob[1]);
                let class = usize::from(jll1 > jll0);

                // Softmax over the two joint log-likelihoods.
                let max = jll0.max(jll1);
                let e0 = (jll0 - max).exp();
                let e1 = (jll1 - max).exp();
                let p1 = e1 / (e0 + e1);
                ClassProbability {
                    class,
                    probability: if class == 1 { p1 } else { 1.0 - p1 },
                }
            }
            ModelArtifact::LogisticRegression { coef, intercept } => {
                let z = x.dot(coef) + intercept;
                let p1 = 1.0 / (1.0 + (-z).exp());
                let class = usize::from(z > 0.0);
                ClassProbability {
                    class,
                    probability: if class == 1 { p1 } else { 1.0 - p1 },
                }
            }
        }
    }
}
