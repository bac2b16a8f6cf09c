//! Embedding vectors and the embedding service seam.

use serde::{Deserialize, Serialize};

use crate::error::EmbeddingError;

/// A fixed-length vector produced by an [`Embedder`]. Two embeddings are
/// only comparable when they came from the same model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn l2_norm(&self) -> f32 {
        self.0.iter().map(|x| x * x).sum::<f32>().sqrt()
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// Text embedding service.
///
/// Implementations are shared across concurrent request handlers, so they
/// must be `Send + Sync`, and for a fixed model and input they must return
/// the same vector every time.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Cosine similarity in `[-1, 1]`.
///
/// Returns `0.0` when either vector has zero norm. Callers are expected to
/// have checked that both vectors share a dimension; extra trailing
/// components of the longer vector are ignored.
pub fn cosine_similarity(a: &Embedding, b: &Embedding) -> f32 {
    let dot: f32 = a.0.iter().zip(&b.0).map(|(x, y)| x * y).sum();
    let norm_a = a.l2_norm();
    let norm_b = b.l2_norm();

    if norm_a < f32::EPSILON || norm_b < f32::EPSILON {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}
