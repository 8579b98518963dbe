//! bankbuddy - Banking Support Assistant
//!
//! Routes natural-language customer queries either to a retrieval-augmented
//! generation path over a private document corpus, or to domain action
//! agents that call backend tools and phrase the result in natural language.
//!
//! # Architecture
//!
//! - Ingestion pipeline: documents → chunker → embedder → vector index
//! - Per query: router → (retrieval engine | action agent) → composer

pub mod errors;
pub mod config;
pub mod telemetry;

pub mod ingest;
pub mod embedding;
pub mod index;
pub mod rag;

pub mod routing;
pub mod tools;
pub mod agents;

pub mod generation;
pub mod compose;
pub mod orchestrator;

pub mod cli;

// Re-export commonly used types
pub use errors::{AssistantError, Result};
pub use orchestrator::Orchestrator;
pub use routing::Route;
