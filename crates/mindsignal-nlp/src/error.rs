use std::path::PathBuf;

use mindsignal_core::error::ClassifierError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NlpError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed artifact: {0}")]
    Artifact(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("vectorizer width {vectorizer} does not match model width {model}")]
    ArtifactMismatch { vectorizer: usize, model: usize },
}

impl From<NlpError> for ClassifierError {
    fn from(e: NlpError) -> Self {
        match e {
            NlpError::ArtifactMismatch { vectorizer, model } => ClassifierError::FeatureWidth {
                expected: model,
                actual: vectorizer,
            },
            other => ClassifierError::Artifact(other.to_string()),
        }
    }
}
