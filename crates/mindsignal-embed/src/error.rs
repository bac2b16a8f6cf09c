use std::path::PathBuf;

use mindsignal_core::error::EmbeddingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("model file missing: {0}")]
    MissingFile(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid model config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("candle error: {0}")]
    Candle(#[from] candle_core::Error),
}

impl From<EmbedError> for EmbeddingError {
    fn from(e: EmbedError) -> Self {
        match e {
            EmbedError::Tokenizer(msg) => EmbeddingError::Tokenization(msg),
            EmbedError::Candle(err) => EmbeddingError::Inference(err.to_string()),
            other => EmbeddingError::ModelLoad(other.to_string()),
        }
    }
}
