use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {kind} '{value}': {reason}")]
    InvalidTarget {
        kind: TargetKind,
        value: String,
        reason: String,
    },
}

/// What a rejected name was meant to identify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Forum,
    User,
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::Forum => f.write_str("forum name"),
            TargetKind::User => f.write_str("username"),
        }
    }
}

/// Failure reported by an embedding service.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding model not loaded: {0}")]
    ModelLoad(String),

    #[error("tokenization failed: {0}")]
    Tokenization(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("embedding dimension mismatch (expected {expected}, got {actual})")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("embedding service returned an empty vector")]
    EmptyVector,
}

/// Failure reported by a text classification service.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier artifacts unavailable: {0}")]
    Artifact(String),

    #[error("classifier produced unknown class {0}")]
    UnknownClass(usize),

    #[error("feature vector width {actual} does not match model width {expected}")]
    FeatureWidth { expected: usize, actual: usize },
}
