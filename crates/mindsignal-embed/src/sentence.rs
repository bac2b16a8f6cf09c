use std::path::{Path, PathBuf};

use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config, DTYPE};
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};
use tracing::{debug, info};

use mindsignal_core::embedding::{Embedder, Embedding};
use mindsignal_core::error::EmbeddingError;

use crate::error::EmbedError;
use crate::pooling::{l2_normalize_rows, mean_pool};

pub const CONFIG_FILE: &str = "config.json";
pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const WEIGHTS_FILE: &str = "model.safetensors";

/// Longer inputs are truncated; matches the sentence-transformers default
/// for all-MiniLM-L6-v2.
pub const MAX_TOKENS: usize = 256;

/// Sentence embedding model loaded from a local directory containing
/// `config.json`, `tokenizer.json` and `model.safetensors`.
pub struct SentenceEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
}

impl SentenceEmbedder {
    pub fn load(model_dir: &Path) -> Result<Self, EmbedError> {
        Self::load_on(model_dir, default_device()?)
    }

    pub fn load_on(model_dir: &Path, device: Device) -> Result<Self, EmbedError> {
        let config_path = require(model_dir, CONFIG_FILE)?;
        let tokenizer_path = require(model_dir, TOKENIZER_FILE)?;
        let weights_path = require(model_dir, WEIGHTS_FILE)?;

        let config_json = std::fs::read_to_string(&config_path).map_err(|source| EmbedError::Io {
            path: config_path.clone(),
            source,
        })?;
        let config: Config = serde_json::from_str(&config_json)?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| EmbedError::Tokenizer(e.to_string()))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| EmbedError::Tokenizer(e.to_string()))?;
        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            ..Default::default()
        }));

        // SAFETY: the weights file is opened read-only and not modified
        // while the model is alive.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DTYPE, &device)? };
        let model = BertModel::load(vb, &config)?;

        info!(model_dir = %model_dir.display(), device = ?device, "sentence embedder loaded");

        Ok(Self {
            model,
            tokenizer,
            device,
        })
    }

    /// Embed a batch of texts, one unit-length row per input.
    pub fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let inputs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let encodings = self
            .tokenizer
            .encode_batch(inputs, true)
            .map_err(|e| EmbedError::Tokenizer(e.to_string()))?;

        let mut ids = Vec::with_capacity(encodings.len());
        let mut masks = Vec::with_capacity(encodings.len());
        for encoding in &encodings {
            ids.push(Tensor::new(encoding.get_ids(), &self.device)?);
            masks.push(Tensor::new(encoding.get_attention_mask(), &self.device)?);
        }
        let input_ids = Tensor::stack(&ids, 0)?;
        let attention_mask = Tensor::stack(&masks, 0)?;
        let token_type_ids = input_ids.zeros_like()?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled = l2_normalize_rows(&mean_pool(&hidden, &attention_mask)?)?;

        debug!(batch = texts.len(), dims = ?pooled.dims(), "batch embedded");

        Ok(pooled.to_vec2::<f32>()?)
    }
}

impl Embedder for SentenceEmbedder {
    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        self.encode(&[text.to_string()])?
            .pop()
            .map(Embedding::new)
            .ok_or(EmbeddingError::EmptyVector)
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError> {
        Ok(self
            .encode(texts)?
            .into_iter()
            .map(Embedding::new)
            .collect())
    }
}

fn require(dir: &Path, file: &str) -> Result<PathBuf, EmbedError> {
    let path = dir.join(file);
    if path.is_file() {
        Ok(path)
    } else {
        Err(EmbedError::MissingFile(path))
    }
}

#[cfg(feature = "metal")]
fn default_device() -> Result<Device, EmbedError> {
    Ok(Device::new_metal(0)?)
}

#[cfg(not(feature = "metal"))]
fn default_device() -> Result<Device, EmbedError> {
    Ok(Device::Cpu)
}
