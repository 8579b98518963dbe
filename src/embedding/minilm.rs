//! MiniLM embedder via Candle
//!
//! Loads `sentence-transformers/all-MiniLM-L6-v2` (384-dim) from the
//! HuggingFace Hub and runs it locally on CPU. Mean pooling over the
//! attention mask, then L2 normalisation, matching the sentence-transformers
//! reference behaviour so document and query vectors share one space.

use anyhow::{anyhow, Context};
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use hf_hub::{api::sync::Api, Repo, RepoType};
use std::sync::Arc;
use tokenizers::Tokenizer;

use crate::embedding::{check_input, l2_normalize, Embedder, EMBEDDING_DIM};
use crate::errors::{AssistantError, Result};

const MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Embedding engine backed by MiniLM (downloads model on first use)
pub struct MiniLmEmbedder {
    model: Arc<BertModel>,
    tokenizer: Arc<Tokenizer>,
    device: Device,
}

impl MiniLmEmbedder {
    pub fn new() -> Result<Self> {
        Self::load().map_err(|e| AssistantError::Embedding(e.to_string()))
    }

    fn load() -> anyhow::Result<Self> {
        let device = Device::Cpu;

        let api = Api::new().context("Failed to create HuggingFace API client")?;
        let repo = api.repo(Repo::new(MODEL_ID.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .context("Failed to download model config")?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .context("Failed to download tokenizer")?;
        let weights_path = repo
            .get("model.safetensors")
            .context("Failed to download model weights")?;

        let config_contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&config_contents).context("Failed to parse model config")?;

        let tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer: {}", e))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], candle_core::DType::F32, &device)
                .context("Failed to load model weights")?
        };

        let model = BertModel::load(vb, &config).context("Failed to create BERT model")?;

        Ok(Self {
            model: Arc::new(model),
            tokenizer: Arc::new(tokenizer),
            device,
        })
    }

    fn forward(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow!("Tokenization failed: {}", e))?;

        let ids = encoding.get_ids().to_vec();
        let mask = encoding.get_attention_mask().to_vec();
        let len = ids.len();

        let token_ids = Tensor::from_vec(ids, (1, len), &self.device)?;
        let attention_mask = Tensor::from_vec(mask, (1, len), &self.device)?;

        let embeddings = self.model.forward(&token_ids, &attention_mask, None)?;
        let pooled = Self::mean_pool(&embeddings, &attention_mask)?;

        let mut vector = pooled.to_vec2::<f32>()?.pop().unwrap_or_default();
        l2_normalize(&mut vector);
        Ok(vector)
    }

    /// Mean pooling with attention mask
    fn mean_pool(embeddings: &Tensor, attention_mask: &Tensor) -> anyhow::Result<Tensor> {
        let mask_expanded = attention_mask
            .unsqueeze(2)?
            .expand(embeddings.shape())?
            .to_dtype(embeddings.dtype())?;

        let sum_embeddings = (embeddings * &mask_expanded)?.sum(1)?;
        let sum_mask = mask_expanded.sum(1)?.clamp(1e-9, f64::MAX)?;

        Ok(sum_embeddings.broadcast_div(&sum_mask)?)
    }
}

impl Embedder for MiniLmEmbedder {
    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        check_input(text)?;
        self.forward(text)
            .map_err(|e| AssistantError::Embedding(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Integration test - requires model download
    fn test_embedding_dimension() {
        let embedder = MiniLmEmbedder::new().expect("Failed to create embedder");
        let v = embedder.encode("Hello world").expect("Failed to embed");
        assert_eq!(v.len(), EMBEDDING_DIM);
    }

    #[test]
    #[ignore] // Integration test - requires model download
    fn test_embedding_deterministic() {
        let embedder = MiniLmEmbedder::new().expect("Failed to create embedder");
        let a = embedder.encode("overdraft fee").expect("Failed to embed");
        let b = embedder.encode("overdraft fee").expect("Failed to embed");
        assert_eq!(a, b);
    }

    #[test]
    #[ignore] // Integration test - requires model download
    fn test_unit_norm() {
        let embedder = MiniLmEmbedder::new().expect("Failed to create embedder");
        let v = embedder.encode("dispute process").expect("Failed to embed");
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }
}
