//! Vector store trait for storing and searching vector embeddings.

use async_trait::async_trait;

use crate::document::{IndexedChunk, SearchResult};
use crate::error::Result;

/// A storage backend for embedded chunks with similarity search.
///
/// A store holds exactly one knowledge base; rebuilding replaces its whole
/// content. An empty store is a valid state and searches on it return no
/// results.
///
/// # Example
///
/// ```rust,ignore
/// use yoga_rag::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new();
/// store.insert(entries).await?;
/// let results = store.search(&query_embedding, 4).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Remove every entry, returning the removed IDs. No-op on an empty store.
    async fn clear(&self) -> Result<Vec<String>>;

    /// Insert entries. IDs must be unique within the store.
    async fn insert(&self, entries: Vec<IndexedChunk>) -> Result<()>;

    /// Search for the `top_k` most similar entries to the given embedding.
    ///
    /// Returns results ordered by descending similarity score; equal scores
    /// keep insertion order.
    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>>;

    /// Number of stored entries.
    async fn len(&self) -> Result<usize>;

    /// Returns `true` if the store holds no entries.
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}
