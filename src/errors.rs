//! Error types for the bankbuddy assistant
//!
//! One enum covers the whole pipeline so callers can match on the failure
//! class (configuration, ingestion, retrieval, generation) without digging
//! through wrapped sources.

use thiserror::Error;

/// Main error type for the assistant
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Missing credential, missing source documents, invalid settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// A document source failed to load or parse
    #[error("Ingestion error for '{document}': {reason}")]
    Ingestion { document: String, reason: String },

    /// Chunker parameter violations (overlap must stay below size)
    #[error("Invalid chunking parameters: size={size}, overlap={overlap}")]
    InvalidChunking { size: usize, overlap: usize },

    /// Embedding failures (empty input, over-limit input, model errors)
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Vector index contract violations
    #[error("Index error: {0}")]
    Index(String),

    /// Embedding or search failure during retrieval
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// External generation collaborator failure
    #[error("Generation error: {0}")]
    Generation(String),

    /// Request state machine violations
    #[error("Invalid request transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;

impl From<anyhow::Error> for AssistantError {
    fn from(err: anyhow::Error) -> Self {
        AssistantError::Config(err.to_string())
    }
}
