//! External generation collaborator
//!
//! The core depends only on the narrow `Generator` contract; the HTTP
//! implementation talks to any OpenAI-compatible chat completions endpoint.

pub mod client;

pub use client::OpenAiGenerator;

use crate::errors::Result;
use async_trait::async_trait;

/// Black-box text generation: prompt in, text out, may fail or time out
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str, temperature: f32, max_tokens: u32) -> Result<String>;
}
