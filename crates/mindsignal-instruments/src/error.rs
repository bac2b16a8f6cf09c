use mindsignal_core::error::EmbeddingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("no documents to score")]
    EmptyInput,

    #[error("embedding service failed: {0}")]
    Embedding(#[from] EmbeddingError),
}
