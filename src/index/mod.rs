//! In-memory vector index
//!
//! Explicitly constructed store of (id, vector, text, source) entries grouped
//! into named collections. Similarity metric is cosine, fixed for the life of
//! the index; ranking ties are broken by lowest insertion id so repeated
//! searches return identical orderings. Persists to a single local JSON file.

use crate::errors::{AssistantError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// One indexed chunk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexEntry {
    pub id: u64,
    pub vector: Vec<f32>,
    pub text: String,
    pub source: String,
}

/// A search result: the matching entry and its cosine similarity
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub entry: IndexEntry,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Collection {
    dimension: usize,
    entries: Vec<IndexEntry>,
}

/// Vector store over named collections
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VectorIndex {
    collections: BTreeMap<String, Collection>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a named collection. Errors if the name already exists; drop it
    /// first for a clean rebuild.
    pub fn create_collection(&mut self, name: &str, dimension: usize) -> Result<()> {
        if self.collections.contains_key(name) {
            return Err(AssistantError::Index(format!(
                "collection '{}' already exists",
                name
            )));
        }
        self.collections.insert(
            name.to_string(),
            Collection {
                dimension,
                entries: Vec::new(),
            },
        );
        Ok(())
    }

    /// Drop a collection. Idempotent.
    pub fn drop_collection(&mut self, name: &str) {
        self.collections.remove(name);
    }

    pub fn has_collection(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// Number of entries in a collection, or None if it doesn't exist
    pub fn collection_len(&self, name: &str) -> Option<usize> {
        self.collections.get(name).map(|c| c.entries.len())
    }

    /// Bulk-add entries. Ids must be unique within the collection and every
    /// vector must match the collection dimension.
    pub fn insert(&mut self, name: &str, entries: Vec<IndexEntry>) -> Result<()> {
        let collection = self
            .collections
            .get_mut(name)
            .ok_or_else(|| AssistantError::Index(format!("no such collection '{}'", name)))?;

        let mut seen: HashSet<u64> = collection.entries.iter().map(|e| e.id).collect();
        for entry in &entries {
            if entry.vector.len() != collection.dimension {
                return Err(AssistantError::Index(format!(
                    "vector dimension {} does not match collection dimension {}",
                    entry.vector.len(),
                    collection.dimension
                )));
            }
            if !seen.insert(entry.id) {
                return Err(AssistantError::Index(format!(
                    "duplicate entry id {} in collection '{}'",
                    entry.id, name
                )));
            }
        }

        collection.entries.extend(entries);
        Ok(())
    }

    /// Return the k entries closest to `query_vector` under cosine
    /// similarity, best first. Fewer than k entries returns all of them; an
    /// empty or missing collection returns an empty Vec.
    pub fn search(&self, name: &str, query_vector: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        let collection = match self.collections.get(name) {
            Some(c) => c,
            None => return Ok(Vec::new()),
        };

        if query_vector.len() != collection.dimension {
            return Err(AssistantError::Index(format!(
                "query dimension {} does not match collection dimension {}",
                query_vector.len(),
                collection.dimension
            )));
        }

        let mut hits: Vec<SearchHit> = collection
            .entries
            .iter()
            .map(|entry| SearchHit {
                score: cosine_similarity(&entry.vector, query_vector),
                entry: entry.clone(),
            })
            .collect();

        // Best score first; equal scores resolve to the lowest insertion id
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.entry.id.cmp(&b.entry.id))
        });
        hits.truncate(k);

        Ok(hits)
    }

    /// Persist the whole index to a single local file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load an index previously written by `save`
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Cosine similarity; zero-norm vectors score 0.0
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(id: u64, vector: Vec<f32>, text: &str) -> IndexEntry {
        IndexEntry {
            id,
            vector,
            text: text.to_string(),
            source: "doc.txt".to_string(),
        }
    }

    #[test]
    fn test_create_collection_twice_fails() {
        let mut index = VectorIndex::new();
        index.create_collection("banking_docs", 3).unwrap();
        assert!(index.create_collection("banking_docs", 3).is_err());

        index.drop_collection("banking_docs");
        assert!(index.create_collection("banking_docs", 3).is_ok());
    }

    #[test]
    fn test_drop_missing_collection_is_noop() {
        let mut index = VectorIndex::new();
        index.drop_collection("never_created");
    }

    #[test]
    fn test_insert_rejects_duplicate_ids() {
        let mut index = VectorIndex::new();
        index.create_collection("c", 2).unwrap();
        index
            .insert("c", vec![entry(0, vec![1.0, 0.0], "a")])
            .unwrap();

        let err = index
            .insert("c", vec![entry(0, vec![0.0, 1.0], "b")])
            .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_insert_rejects_wrong_dimension() {
        let mut index = VectorIndex::new();
        index.create_collection("c", 2).unwrap();
        assert!(index.insert("c", vec![entry(0, vec![1.0], "a")]).is_err());
    }

    #[test]
    fn test_search_ranks_by_similarity() {
        let mut index = VectorIndex::new();
        index.create_collection("c", 2).unwrap();
        index
            .insert(
                "c",
                vec![
                    entry(0, vec![1.0, 0.0], "east"),
                    entry(1, vec![0.0, 1.0], "north"),
                    entry(2, vec![0.7, 0.7], "northeast"),
                ],
            )
            .unwrap();

        let hits = index.search("c", &[1.0, 0.1], 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entry.text, "east");
        assert_eq!(hits[1].entry.text, "northeast");
    }

    #[test]
    fn test_ties_break_by_lowest_id() {
        let mut index = VectorIndex::new();
        index.create_collection("c", 2).unwrap();
        index
            .insert(
                "c",
                vec![
                    entry(5, vec![1.0, 0.0], "late"),
                    entry(1, vec![1.0, 0.0], "early"),
                ],
            )
            .unwrap();

        let hits = index.search("c", &[1.0, 0.0], 2).unwrap();
        assert_eq!(hits[0].entry.id, 1);
        assert_eq!(hits[1].entry.id, 5);
    }

    #[test]
    fn test_fewer_entries_than_k() {
        let mut index = VectorIndex::new();
        index.create_collection("c", 2).unwrap();
        index
            .insert("c", vec![entry(0, vec![1.0, 0.0], "only")])
            .unwrap();

        let hits = index.search("c", &[1.0, 0.0], 10).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_empty_and_missing_collections_return_empty() {
        let mut index = VectorIndex::new();
        index.create_collection("empty", 2).unwrap();

        assert!(index.search("empty", &[1.0, 0.0], 3).unwrap().is_empty());
        assert!(index.search("missing", &[1.0, 0.0], 3).unwrap().is_empty());
    }

    #[test]
    fn test_search_is_stable() {
        let mut index = VectorIndex::new();
        index.create_collection("c", 2).unwrap();
        index
            .insert(
                "c",
                vec![
                    entry(0, vec![0.9, 0.1], "a"),
                    entry(1, vec![0.8, 0.2], "b"),
                    entry(2, vec![0.7, 0.3], "c"),
                ],
            )
            .unwrap();

        let first: Vec<u64> = index
            .search("c", &[1.0, 0.0], 3)
            .unwrap()
            .iter()
            .map(|h| h.entry.id)
            .collect();
        for _ in 0..5 {
            let again: Vec<u64> = index
                .search("c", &[1.0, 0.0], 3)
                .unwrap()
                .iter()
                .map(|h| h.entry.id)
                .collect();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let mut index = VectorIndex::new();
        index.create_collection("c", 2).unwrap();
        index
            .insert("c", vec![entry(0, vec![1.0, 0.0], "persisted")])
            .unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.json");
        index.save(&path).unwrap();

        let loaded = VectorIndex::load(&path).unwrap();
        assert_eq!(loaded.collection_len("c"), Some(1));
        let hits = loaded.search("c", &[1.0, 0.0], 1).unwrap();
        assert_eq!(hits[0].entry.text, "persisted");
    }

    #[test]
    fn test_cosine_similarity_zero_norm() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
