//! Embedding chunks into a vector store and querying it.
//!
//! The [`Indexer`] composes an [`EmbeddingProvider`] with one
//! [`VectorStore`]: chunks are embedded on the way in, and queries are
//! embedded with the same provider before the similarity search.

use std::sync::Arc;

use tracing::{debug, error, info};
use uuid::Uuid;

use crate::document::{Chunk, IndexedChunk, RetrievalResult, SearchResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// Maximum number of texts sent to the embedding provider in one call.
const EMBED_BATCH_SIZE: usize = 64;

/// An embedding provider bound to a vector store.
///
/// # Example
///
/// ```rust,ignore
/// use yoga_rag::{HashingEmbeddingProvider, InMemoryVectorStore, Indexer};
///
/// let indexer = Indexer::new(
///     Arc::new(HashingEmbeddingProvider::default()),
///     Arc::new(InMemoryVectorStore::new()),
/// );
/// let ids = indexer.add(chunks).await?;
/// let result = indexer.query("benefits of cobra pose", 4).await?;
/// ```
pub struct Indexer {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
    similarity_threshold: f32,
}

impl Indexer {
    /// Bind `embedding_provider` to `vector_store`.
    pub fn new(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        vector_store: Arc<dyn VectorStore>,
    ) -> Self {
        Self { embedding_provider, vector_store, similarity_threshold: f32::NEG_INFINITY }
    }

    /// Drop query results scoring below `threshold`.
    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Return a reference to the vector store.
    pub fn vector_store(&self) -> &Arc<dyn VectorStore> {
        &self.vector_store
    }

    /// Remove every stored chunk, returning the removed IDs.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::PipelineError`] if the vector store operation fails.
    pub async fn clear(&self) -> Result<Vec<String>> {
        let removed = self.vector_store.clear().await.map_err(|e| {
            error!(error = %e, "failed to clear vector store");
            RagError::PipelineError(format!("failed to clear vector store: {e}"))
        })?;
        debug!(removed = removed.len(), "cleared vector store");
        Ok(removed)
    }

    /// Embed and store chunks, returning the assigned IDs in input order.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::PipelineError`] if embedding or storage fails.
    pub async fn add(&self, chunks: Vec<Chunk>) -> Result<Vec<String>> {
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        let mut embeddings = Vec::with_capacity(chunks.len());
        for batch in chunks.chunks(EMBED_BATCH_SIZE) {
            let texts: Vec<&str> = batch.iter().map(|c| c.text.as_str()).collect();
            let batch_embeddings = self.embedding_provider.embed_batch(&texts).await.map_err(|e| {
                error!(error = %e, "embedding failed during indexing");
                RagError::PipelineError(format!("embedding failed: {e}"))
            })?;
            if batch_embeddings.len() != batch.len() {
                return Err(RagError::PipelineError(format!(
                    "embedding provider returned {} vectors for {} chunks",
                    batch_embeddings.len(),
                    batch.len()
                )));
            }
            embeddings.extend(batch_embeddings);
        }

        let entries: Vec<IndexedChunk> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexedChunk { id: Uuid::new_v4().to_string(), chunk, embedding })
            .collect();
        let ids: Vec<String> = entries.iter().map(|e| e.id.clone()).collect();

        self.vector_store.insert(entries).await.map_err(|e| {
            error!(error = %e, "insert failed during indexing");
            RagError::PipelineError(format!("insert failed: {e}"))
        })?;

        info!(chunk_count = ids.len(), "indexed chunks");
        Ok(ids)
    }

    /// Embed `query` and return the `k` most similar chunks, best first.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::PipelineError`] if embedding or search fails.
    pub async fn query(&self, query: &str, k: usize) -> Result<RetrievalResult> {
        let query_embedding = self.embedding_provider.embed(query).await.map_err(|e| {
            error!(error = %e, "embedding failed during query");
            RagError::PipelineError(format!("query embedding failed: {e}"))
        })?;

        let results = self.vector_store.search(&query_embedding, k).await.map_err(|e| {
            error!(error = %e, "vector store search failed");
            RagError::PipelineError(format!("search failed: {e}"))
        })?;

        let threshold = self.similarity_threshold;
        let results: Vec<SearchResult> = results.into_iter().filter(|r| r.score >= threshold).collect();

        debug!(result_count = results.len(), k, "query completed");
        Ok(RetrievalResult { query: query.to_string(), results, k })
    }

    /// Number of stored chunks.
    pub async fn len(&self) -> Result<usize> {
        self.vector_store.len().await
    }
}
