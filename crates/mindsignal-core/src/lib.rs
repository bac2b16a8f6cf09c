//! mindsignal-core
//!
//! Pure domain types shared by every other crate: forum posts and target
//! names, embeddings and the embedding service seam, classifier labels and
//! the classifier seam. No network or model dependency.

pub mod classification;
pub mod embedding;
pub mod error;
pub mod models;
pub mod targets;
