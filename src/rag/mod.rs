//! Retrieval-augmented generation pipeline
//!
//! Composes the embedder and vector index into two operations: `ingest`
//! (documents → chunks → vectors → collection) and `retrieve` (query →
//! top-k attributed passages).

pub mod engine;

pub use engine::{IngestReport, RetrievalEngine, DEFAULT_TOP_K};
