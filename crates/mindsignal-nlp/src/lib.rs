//! mindsignal-nlp
//!
//! Text normalization and the bag-of-words post classifier. The vectorizer
//! and model weights are exported from the training environment as JSON
//! artifacts and loaded read-only at startup.

pub mod error;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod stopwords;
pub mod vectorizer;
