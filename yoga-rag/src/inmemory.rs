//! In-memory vector store using cosine similarity.
//!
//! This module provides [`InMemoryVectorStore`], a vector store backed by a
//! `Vec` protected by a `tokio::sync::RwLock`. Entries keep insertion order so
//! ties in similarity resolve deterministically.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{IndexedChunk, SearchResult};
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// An in-memory vector store using cosine similarity for search.
///
/// # Example
///
/// ```rust,ignore
/// use yoga_rag::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new();
/// assert!(store.is_empty().await?);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    entries: RwLock<Vec<IndexedChunk>>,
}

impl InMemoryVectorStore {
    /// Create a new empty in-memory vector store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn clear(&self) -> Result<Vec<String>> {
        let mut entries = self.entries.write().await;
        Ok(entries.drain(..).map(|entry| entry.id).collect())
    }

    async fn insert(&self, new_entries: Vec<IndexedChunk>) -> Result<()> {
        let mut entries = self.entries.write().await;
        let mut seen: HashSet<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        for entry in &new_entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(RagError::VectorStoreError {
                    backend: "InMemory".to_string(),
                    message: format!("duplicate chunk id '{}'", entry.id),
                });
            }
        }
        drop(seen);
        entries.extend(new_entries);
        Ok(())
    }

    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        let entries = self.entries.read().await;

        let mut scored: Vec<SearchResult> = entries
            .iter()
            .map(|entry| SearchResult {
                id: entry.id.clone(),
                chunk: entry.chunk.clone(),
                score: cosine_similarity(&entry.embedding, embedding),
            })
            .collect();

        // `sort_by` is stable, so equal scores keep insertion order.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.entries.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Chunk;

    fn entry(id: &str, embedding: Vec<f32>) -> IndexedChunk {
        IndexedChunk {
            id: id.to_string(),
            chunk: Chunk {
                text: format!("text {id}"),
                source: "poses.txt".to_string(),
                page: None,
                chunk_index: 0,
            },
            embedding,
        }
    }

    #[tokio::test]
    async fn clear_on_empty_store_is_noop() {
        let store = InMemoryVectorStore::new();
        assert!(store.clear().await.unwrap().is_empty());
        assert!(store.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn clear_returns_removed_ids() {
        let store = InMemoryVectorStore::new();
        store.insert(vec![entry("a", vec![1.0, 0.0]), entry("b", vec![0.0, 1.0])]).await.unwrap();
        assert_eq!(store.clear().await.unwrap(), vec!["a", "b"]);
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn rejects_duplicate_ids() {
        let store = InMemoryVectorStore::new();
        store.insert(vec![entry("a", vec![1.0])]).await.unwrap();
        assert!(store.insert(vec![entry("a", vec![1.0])]).await.is_err());
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn ties_keep_insertion_order() {
        let store = InMemoryVectorStore::new();
        store
            .insert(vec![
                entry("first", vec![1.0, 0.0]),
                entry("other", vec![0.0, 1.0]),
                entry("second", vec![2.0, 0.0]),
            ])
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0], 2).await.unwrap();
        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 1.0], &[2.0, 2.0]) - 1.0).abs() < 1e-6);
    }
}
