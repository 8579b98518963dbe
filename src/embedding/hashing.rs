//! Feature-hashing embedder
//!
//! Offline-safe stand-in for the transformer model: hashes unigrams and
//! bigrams into a fixed 384-dim vector and L2-normalises. No model files,
//! no network, fully deterministic. Retrieval quality is rough but ranking
//! is stable, which is what the pipeline tests need.

use crate::embedding::{check_input, l2_normalize, Embedder, EMBEDDING_DIM};
use crate::errors::Result;
use std::hash::Hasher;
use twox_hash::XxHash64;

#[derive(Debug, Clone, Copy, Default)]
pub struct HashingEmbedder;

impl HashingEmbedder {
    pub fn new() -> Self {
        Self
    }

    fn hash_token(token: &str, seed: u64) -> u64 {
        let mut hasher = XxHash64::with_seed(seed);
        hasher.write(token.as_bytes());
        hasher.finish()
    }

    fn accumulate(v: &mut [f32], token: &str, weight: f32) {
        let h = Self::hash_token(token, 0);
        let idx = (h as usize) % EMBEDDING_DIM;
        // Second hash decides the sign so common tokens don't all pile up
        // positive mass in their bucket
        let sign = if Self::hash_token(token, 1) & 1 == 0 {
            1.0
        } else {
            -1.0
        };
        v[idx] += sign * weight;
    }
}

impl Embedder for HashingEmbedder {
    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        check_input(text)?;

        let tokens: Vec<String> = text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
            .collect();

        let mut v = vec![0.0f32; EMBEDDING_DIM];
        for token in &tokens {
            Self::accumulate(&mut v, token, 1.0);
        }
        // Bigrams keep word order from collapsing: "wire transfer" and
        // "transfer wire" land in different buckets
        for pair in tokens.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            Self::accumulate(&mut v, &bigram, 0.5);
        }

        l2_normalize(&mut v);
        Ok(v)
    }
}
