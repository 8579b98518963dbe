//! Text embedding for similarity search
//!
//! Documents and queries must be encoded by the same embedder instance;
//! similarity ranking is meaningless across embedding spaces. Both
//! implementations are pure functions of the input text.

pub mod hashing;
pub mod minilm;

pub use hashing::HashingEmbedder;
pub use minilm::MiniLmEmbedder;

use crate::errors::{AssistantError, Result};

/// Embedding dimension shared by both implementations
pub const EMBEDDING_DIM: usize = 384;

/// Inputs beyond this length are rejected rather than silently truncated
pub const MAX_INPUT_CHARS: usize = 8_192;

/// Maps text to a fixed-dimension vector
pub trait Embedder: Send + Sync {
    /// Encode text into a vector of `dimension()` floats.
    ///
    /// Errors on empty or over-limit input; callers skip or truncate, never
    /// substitute an empty vector.
    fn encode(&self, text: &str) -> Result<Vec<f32>>;

    fn dimension(&self) -> usize {
        EMBEDDING_DIM
    }
}

/// Shared input validation for embedder implementations
pub(crate) fn check_input(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(AssistantError::Embedding(
            "cannot embed empty text".to_string(),
        ));
    }
    let len = text.chars().count();
    if len > MAX_INPUT_CHARS {
        return Err(AssistantError::Embedding(format!(
            "input of {} chars exceeds limit of {}",
            len, MAX_INPUT_CHARS
        )));
    }
    Ok(())
}

/// L2-normalise a vector in place; zero vectors are left untouched
pub(crate) fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
