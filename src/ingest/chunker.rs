//! Fixed-size overlapping text chunker
//!
//! Splits a document into character windows of `size` with `overlap` shared
//! characters between neighbours. Deterministic: same document and parameters
//! always yield the same chunk sequence.

use crate::errors::{AssistantError, Result};
use crate::ingest::loader::Document;

/// Default chunk window, in characters
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Default overlap with the preceding chunk, in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

/// Bounded substring of a source document, the unit of retrieval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub source: String,
}

/// Overlapping window splitter
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    size: usize,
    overlap: usize,
}

impl TextChunker {
    /// Create a chunker. `overlap` must be strictly less than `size`, else
    /// the window would never advance.
    pub fn new(size: usize, overlap: usize) -> Result<Self> {
        if size == 0 || overlap >= size {
            return Err(AssistantError::InvalidChunking { size, overlap });
        }
        Ok(Self { size, overlap })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split a document into ordered chunks. The last chunk may be shorter
    /// than `size` but is always longer than `overlap`, so stripping the
    /// leading overlap from every chunk after the first reconstructs the
    /// document text exactly.
    pub fn split(&self, document: &Document) -> Vec<Chunk> {
        let chars: Vec<char> = document.text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let step = self.size - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + self.size).min(chars.len());
            chunks.push(Chunk {
                text: chars[start..end].iter().collect(),
                source: document.source.clone(),
            });

            if end == chars.len() {
                break;
            }
            start += step;
        }

        chunks
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self {
            size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

/// Rebuild the original text from a chunk sequence by dropping the declared
/// overlap from every chunk after the first. Inverse of `split`.
pub fn reconstruct(chunks: &[Chunk], overlap: usize) -> String {
    let mut out = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        if i == 0 {
            out.push_str(&chunk.text);
        } else {
            out.extend(chunk.text.chars().skip(overlap));
        }
    }
    out
}
