//! Retrieval engine: ingestion and similarity retrieval
//!
//! Owns the vector index for the process lifetime. Ingestion rebuilds the
//! collection wholesale (drop, recreate, bulk insert) under the write lock,
//! so concurrent retrievals see either the old complete collection or the
//! new complete one, never a half-populated state. Re-ingesting replaces,
//! never merges.

use crate::embedding::Embedder;
use crate::errors::Result;
use crate::index::{IndexEntry, VectorIndex};
use crate::ingest::{DocumentLoader, TextChunker};
use crate::telemetry::{TelemetryCollector, TelemetryEvent};
use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::Instant;

/// Default number of passages retrieved per query
pub const DEFAULT_TOP_K: usize = 3;

/// Outcome of one ingestion run
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Sources that loaded and chunked successfully
    pub documents: usize,
    /// Total entries inserted into the fresh collection
    pub chunks: usize,
    /// Sources or chunks skipped, with the reason
    pub skipped: Vec<String>,
}

/// Embedder + vector index behind one ingest/retrieve surface
pub struct RetrievalEngine {
    embedder: Arc<dyn Embedder>,
    index: RwLock<VectorIndex>,
    chunker: TextChunker,
    collection: String,
    telemetry: TelemetryCollector,
}

impl RetrievalEngine {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        chunker: TextChunker,
        collection: impl Into<String>,
        telemetry: TelemetryCollector,
    ) -> Self {
        Self {
            embedder,
            index: RwLock::new(VectorIndex::new()),
            chunker,
            collection: collection.into(),
            telemetry,
        }
    }

    /// Ingest document sources into a freshly rebuilt collection.
    ///
    /// A source that fails to load, or a chunk the embedder rejects, is
    /// skipped and reported rather than aborting the run. Ids are dense and
    /// sequential within the run.
    pub fn ingest(&self, paths: &[impl AsRef<Path>], loader: &dyn DocumentLoader) -> Result<IngestReport> {
        let mut report = IngestReport::default();
        let mut entries: Vec<IndexEntry> = Vec::new();

        for path in paths {
            let document = match loader.load(path.as_ref()) {
                Ok(doc) => doc,
                Err(e) => {
                    report.skipped.push(e.to_string());
                    continue;
                }
            };

            for chunk in self.chunker.split(&document) {
                match self.embedder.encode(&chunk.text) {
                    Ok(vector) => entries.push(IndexEntry {
                        id: entries.len() as u64,
                        vector,
                        text: chunk.text,
                        source: chunk.source,
                    }),
                    Err(e) => report
                        .skipped
                        .push(format!("chunk of '{}': {}", chunk.source, e)),
                }
            }
            report.documents += 1;
        }

        report.chunks = entries.len();

        // Swap the collection in one critical section
        {
            let mut index = self.index.write().unwrap();
            index.drop_collection(&self.collection);
            index.create_collection(&self.collection, self.embedder.dimension())?;
            index.insert(&self.collection, entries)?;
        }

        self.telemetry.record(TelemetryEvent::DocumentsIngested {
            documents: report.documents,
            chunks: report.chunks,
            skipped: report.skipped.len(),
            timestamp: Instant::now(),
        });

        Ok(report)
    }

    /// Retrieve the top-k passages for a query as an attributed context
    /// string. No matching entries, or a query the embedder rejects, yields
    /// an empty string: "no evidence", not an error.
    pub fn retrieve(&self, query: &str, top_k: usize) -> String {
        let query_vector = match self.embedder.encode(query) {
            Ok(v) => v,
            Err(_) => {
                self.record_retrieval(0);
                return String::new();
            }
        };

        let hits = {
            let index = self.index.read().unwrap();
            match index.search(&self.collection, &query_vector, top_k) {
                Ok(hits) => hits,
                Err(_) => {
                    self.record_retrieval(0);
                    return String::new();
                }
            }
        };

        self.record_retrieval(hits.len());

        hits.iter()
            .map(|hit| format!("[Source: {}] {}", hit.entry.source, hit.entry.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Number of entries currently in the collection
    pub fn collection_len(&self) -> usize {
        self.index
            .read()
            .unwrap()
            .collection_len(&self.collection)
            .unwrap_or(0)
    }

    /// Persist the index to its single local file
    pub fn persist(&self, path: &Path) -> Result<()> {
        self.index.read().unwrap().save(path)
    }

    /// Replace the in-memory index with one previously persisted
    pub fn restore(&self, path: &Path) -> Result<()> {
        let loaded = VectorIndex::load(path)?;
        *self.index.write().unwrap() = loaded;
        Ok(())
    }

    fn record_retrieval(&self, hits: usize) {
        self.telemetry.record(TelemetryEvent::ContextRetrieved {
            hits,
            timestamp: Instant::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingEmbedder;
    use crate::ingest::TextFileLoader;
    use std::io::Write;
    use tempfile::TempDir;

    fn engine() -> RetrievalEngine {
        RetrievalEngine::new(
            Arc::new(HashingEmbedder::new()),
            TextChunker::new(120, 20).unwrap(),
            "banking_docs",
            TelemetryCollector::new(),
        )
    }

    fn write_doc(dir: &TempDir, name: &str, text: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", text).unwrap();
        path
    }

    #[test]
    fn test_ingest_and_retrieve_with_attribution() {
        let dir = TempDir::new().unwrap();
        let fees = write_doc(
            &dir,
            "fee_schedule.txt",
            "The overdraft fee is $35 per item. International wire transfers \
             cost $45 outbound and $15 inbound. Monthly maintenance is $12.",
        );

        let engine = engine();
        let report = engine.ingest(&[fees], &TextFileLoader).unwrap();
        assert_eq!(report.documents, 1);
        assert!(report.chunks >= 1);
        assert_eq!(engine.collection_len(), report.chunks);

        let context = engine.retrieve("What is the overdraft fee?", 3);
        assert!(context.contains("[Source: fee_schedule.txt]"));
        assert!(context.contains("overdraft"));
    }

    #[test]
    fn test_retrieve_empty_collection_returns_empty_string() {
        let engine = engine();
        assert_eq!(engine.retrieve("anything at all", 3), "");
    }

    #[test]
    fn test_retrieve_rejected_query_returns_empty_string() {
        let engine = engine();
        assert_eq!(engine.retrieve("", 3), "");
    }

    #[test]
    fn test_ingest_is_idempotent_not_additive() {
        let dir = TempDir::new().unwrap();
        let doc = write_doc(&dir, "kyc.txt", &"Identity documents required. ".repeat(30));

        let engine = engine();
        let first = engine.ingest(&[&doc], &TextFileLoader).unwrap();
        let second = engine.ingest(&[&doc], &TextFileLoader).unwrap();

        assert_eq!(first.chunks, second.chunks);
        assert_eq!(engine.collection_len(), second.chunks);
    }

    #[test]
    fn test_reingest_replaces_previous_document_set() {
        let dir = TempDir::new().unwrap();
        let fees = write_doc(&dir, "fees.txt", &"Fee text here. ".repeat(30));
        let kyc = write_doc(&dir, "kyc.txt", "KYC needs a passport.");

        let engine = engine();
        engine.ingest(&[&fees], &TextFileLoader).unwrap();
        engine.ingest(&[&kyc], &TextFileLoader).unwrap();

        let context = engine.retrieve("What does KYC need?", 5);
        assert!(!context.contains("fees.txt"));
        assert!(context.contains("kyc.txt"));
    }

    #[test]
    fn test_missing_source_is_skipped_with_warning() {
        let dir = TempDir::new().unwrap();
        let good = write_doc(&dir, "good.txt", "Dispute resolution takes ten days.");
        let missing = dir.path().join("missing.txt");

        let engine = engine();
        let report = engine.ingest(&[good, missing], &TextFileLoader).unwrap();
        assert_eq!(report.documents, 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].contains("missing.txt"));
    }

    #[test]
    fn test_persist_and_restore() {
        let dir = TempDir::new().unwrap();
        let doc = write_doc(&dir, "dispute.txt", "File disputes within 60 days.");

        let original = engine();
        original.ingest(&[&doc], &TextFileLoader).unwrap();
        let index_path = dir.path().join("index.json");
        original.persist(&index_path).unwrap();

        let fresh = engine();
        assert_eq!(fresh.retrieve("dispute deadline", 3), "");
        fresh.restore(&index_path).unwrap();
        assert!(fresh.retrieve("dispute deadline", 3).contains("dispute.txt"));
    }
}
