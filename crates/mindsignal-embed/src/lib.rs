//! mindsignal-embed
//!
//! Local sentence embeddings with a BERT-family model (all-MiniLM-L6-v2 by
//! default): mean pooling over the attention mask, then L2 normalization.

pub mod error;
pub mod pooling;
pub mod sentence;
