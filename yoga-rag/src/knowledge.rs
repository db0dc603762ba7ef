//! The knowledge base: a source directory, a chunker and the live index.
//!
//! [`KnowledgeBase::rebuild`] runs the full refresh (load → split → embed →
//! store) into a fresh vector store and only then publishes it, so queries
//! keep hitting the previous index while a rebuild is running and never see
//! a half-built or emptied one. Rebuilds are serialized.
//!
//! # Example
//!
//! ```rust,ignore
//! use yoga_rag::{HashingEmbeddingProvider, KnowledgeBase, RagConfig};
//!
//! let kb = KnowledgeBase::builder()
//!     .config(RagConfig::default())
//!     .source_dir("uploaded_documents")
//!     .embedding_provider(Arc::new(HashingEmbeddingProvider::default()))
//!     .build()?;
//!
//! let report = kb.rebuild().await?;
//! let retrieved = kb.retrieve("How do I breathe in cobra pose?").await?;
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::chunking::{Chunker, RecursiveChunker};
use crate::config::RagConfig;
use crate::document::RetrievalResult;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::indexer::Indexer;
use crate::inmemory::InMemoryVectorStore;
use crate::loader::{DirectoryLoader, SkippedFile};
use crate::vectorstore::VectorStore;

/// Creates the empty vector store a rebuild fills before publishing it.
pub type StoreFactory = Arc<dyn Fn() -> Arc<dyn VectorStore> + Send + Sync>;

/// Summary of one rebuild.
#[derive(Debug, Clone, Default)]
pub struct RebuildReport {
    /// Number of text units loaded from the source directory.
    pub documents: usize,
    /// Number of chunks now in the published index.
    pub chunks: usize,
    /// Number of chunks removed from the previous index.
    pub removed: usize,
    /// Files that could not be extracted.
    pub skipped: Vec<SkippedFile>,
}

/// The searchable knowledge base.
pub struct KnowledgeBase {
    config: RagConfig,
    loader: DirectoryLoader,
    chunker: Arc<dyn Chunker>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    store_factory: StoreFactory,
    active: RwLock<Arc<Indexer>>,
    rebuild_lock: Mutex<()>,
}

impl KnowledgeBase {
    /// Create a new [`KnowledgeBaseBuilder`].
    pub fn builder() -> KnowledgeBaseBuilder {
        KnowledgeBaseBuilder::default()
    }

    /// Return a reference to the configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return the loader for the source directory.
    pub fn loader(&self) -> &DirectoryLoader {
        &self.loader
    }

    /// Replace the index with one built from the current source directory.
    ///
    /// An empty or missing source directory produces an empty index, which is
    /// a valid state. On failure the previously published index stays in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::PipelineError`] if loading cannot run or if
    /// embedding/storing the new chunks fails.
    pub async fn rebuild(&self) -> Result<RebuildReport> {
        let _guard = self.rebuild_lock.lock().await;

        let loader = self.loader.clone();
        let load = tokio::task::spawn_blocking(move || loader.load_report())
            .await
            .map_err(|e| RagError::PipelineError(format!("loader task failed: {e}")))??;

        let chunks = self.chunker.split(&load.documents);
        info!(documents = load.documents.len(), chunks = chunks.len(), "rebuilding knowledge base");

        let fresh = Arc::new(self.new_indexer());
        let ids = fresh.add(chunks).await?;

        let retired = {
            let mut active = self.active.write().await;
            std::mem::replace(&mut *active, fresh)
        };
        // Queries already holding the retired index keep reading it; it is
        // freed when the last of them drops its `Arc`.
        let removed = match retired.len().await {
            Ok(removed) => removed,
            Err(e) => {
                warn!(error = %e, "failed to count retired index");
                0
            }
        };
        drop(retired);

        let report = RebuildReport {
            documents: load.documents.len(),
            chunks: ids.len(),
            removed,
            skipped: load.skipped,
        };
        info!(
            chunks = report.chunks,
            removed = report.removed,
            skipped = report.skipped.len(),
            "knowledge base updated"
        );
        Ok(report)
    }

    /// Retrieve the configured `top_k` chunks for `query`.
    pub async fn retrieve(&self, query: &str) -> Result<RetrievalResult> {
        self.retrieve_k(query, self.config.top_k).await
    }

    /// Retrieve the `k` chunks most similar to `query` from the published index.
    pub async fn retrieve_k(&self, query: &str, k: usize) -> Result<RetrievalResult> {
        let indexer = self.current().await;
        if indexer.len().await? == 0 {
            return Ok(RetrievalResult::empty(query, k));
        }
        indexer.query(query, k).await
    }

    /// Number of chunks in the published index.
    pub async fn chunk_count(&self) -> Result<usize> {
        self.current().await.len().await
    }

    async fn current(&self) -> Arc<Indexer> {
        Arc::clone(&*self.active.read().await)
    }

    fn new_indexer(&self) -> Indexer {
        Indexer::new(Arc::clone(&self.embedding_provider), (self.store_factory)())
            .with_similarity_threshold(self.config.similarity_threshold)
    }
}

/// Builder for constructing a [`KnowledgeBase`].
///
/// `source_dir` and `embedding_provider` are required. The chunker defaults
/// to a [`RecursiveChunker`] built from the config, and the store factory to
/// [`InMemoryVectorStore`].
#[derive(Default)]
pub struct KnowledgeBaseBuilder {
    config: Option<RagConfig>,
    source_dir: Option<PathBuf>,
    chunker: Option<Arc<dyn Chunker>>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    store_factory: Option<StoreFactory>,
}

impl KnowledgeBaseBuilder {
    /// Set the configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the directory documents are loaded from.
    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    /// Set a custom chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the factory producing empty vector stores.
    pub fn store_factory(mut self, factory: StoreFactory) -> Self {
        self.store_factory = Some(factory);
        self
    }

    /// Build the [`KnowledgeBase`] with an empty published index.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if a required field is missing.
    pub fn build(self) -> Result<KnowledgeBase> {
        let config = self.config.unwrap_or_default();
        let source_dir = self
            .source_dir
            .ok_or_else(|| RagError::ConfigError("source_dir is required".to_string()))?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::ConfigError("embedding_provider is required".to_string()))?;
        let chunker = self
            .chunker
            .unwrap_or_else(|| Arc::new(RecursiveChunker::from_config(&config)));
        let store_factory: StoreFactory = self
            .store_factory
            .unwrap_or_else(|| Arc::new(|| Arc::new(InMemoryVectorStore::new()) as Arc<dyn VectorStore>));

        let initial = Indexer::new(Arc::clone(&embedding_provider), store_factory())
            .with_similarity_threshold(config.similarity_threshold);

        Ok(KnowledgeBase {
            config,
            loader: DirectoryLoader::new(source_dir),
            chunker,
            embedding_provider,
            store_factory,
            active: RwLock::new(Arc::new(initial)),
            rebuild_lock: Mutex::new(()),
        })
    }
}
