//! Document ingestion: loading and chunking
//!
//! Loading is an external-collaborator seam (`DocumentLoader`); parsing of
//! richer formats (PDF) plugs in behind it. Chunking splits loaded text into
//! overlapping fixed-size windows that the retrieval engine embeds.

pub mod chunker;
pub mod loader;

pub use chunker::{Chunk, TextChunker};
pub use loader::{Document, DocumentLoader, TextFileLoader};
