//! Document loading seam
//!
//! The retrieval engine treats loading as an abstract capability it does not
//! implement; `TextFileLoader` covers plain-text sources, richer parsers
//! implement the same trait.

use crate::errors::{AssistantError, Result};
use std::path::Path;

/// A loaded source document: raw text plus a source identifier.
///
/// Immutable once loaded; the ingestion pipeline discards it after chunking.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub source: String,
}

impl Document {
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }
}

/// Loads a document from a file path
pub trait DocumentLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Document>;
}

/// Plain-text file loader. Attribution uses the file basename, so retrieval
/// output reads `[Source: fee_schedule.txt]` rather than a full path.
#[derive(Debug, Default)]
pub struct TextFileLoader;

impl DocumentLoader for TextFileLoader {
    fn load(&self, path: &Path) -> Result<Document> {
        let text = std::fs::read_to_string(path).map_err(|e| AssistantError::Ingestion {
            document: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Document::new(text, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_text_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Overdraft fee: $35 per item.").unwrap();

        let loader = TextFileLoader;
        let doc = loader.load(file.path()).unwrap();
        assert!(doc.text.contains("Overdraft fee"));
        assert!(!doc.source.contains('/'));
    }

    #[test]
    fn test_load_missing_file() {
        let loader = TextFileLoader;
        let err = loader.load(Path::new("/nonexistent/fees.txt")).unwrap_err();
        match err {
            AssistantError::Ingestion { document, .. } => {
                assert!(document.contains("fees.txt"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
