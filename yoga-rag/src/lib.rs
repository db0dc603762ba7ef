//! # yoga-rag
//!
//! Knowledge base for the yoga wellness assistant: loading source files,
//! chunking them, embedding the chunks and answering similarity queries.
//!
//! ## Overview
//!
//! - [`DirectoryLoader`] reads `.pdf`, `.docx` and `.txt` files into [`RawDocument`]s
//! - [`RecursiveChunker`] splits them into bounded, overlapping [`Chunk`]s
//! - [`EmbeddingProvider`] turns text into vectors ([`HashingEmbeddingProvider`]
//!   offline, `OllamaEmbeddingProvider` with the `ollama` feature)
//! - [`VectorStore`] persists embedded chunks ([`InMemoryVectorStore`])
//! - [`Indexer`] binds an embedding provider to a store
//! - [`KnowledgeBase`] owns the published index and rebuilds it from the
//!   source directory without interrupting readers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use yoga_rag::{HashingEmbeddingProvider, KnowledgeBase, RagConfig};
//!
//! let kb = KnowledgeBase::builder()
//!     .config(RagConfig::builder().chunk_size(800).chunk_overlap(100).build()?)
//!     .source_dir("uploaded_documents")
//!     .embedding_provider(Arc::new(HashingEmbeddingProvider::default()))
//!     .build()?;
//!
//! kb.rebuild().await?;
//! for hit in kb.retrieve("benefits of child's pose").await?.results {
//!     println!("{:.3} {}", hit.score, hit.chunk.source_ref());
//! }
//! ```

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod indexer;
pub mod inmemory;
pub mod knowledge;
pub mod loader;
pub mod vectorstore;

#[cfg(feature = "ollama")]
pub mod ollama;

pub use chunking::{Chunker, RecursiveChunker};
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Chunk, IndexedChunk, RawDocument, RetrievalResult, SearchResult, SourceRef};
pub use embedding::{EmbeddingProvider, HashingEmbeddingProvider};
pub use error::{RagError, Result};
pub use indexer::Indexer;
pub use inmemory::InMemoryVectorStore;
pub use knowledge::{KnowledgeBase, KnowledgeBaseBuilder, RebuildReport, StoreFactory};
pub use loader::{DirectoryLoader, DocumentKind, LoadReport, SkippedFile};
pub use vectorstore::VectorStore;

#[cfg(feature = "ollama")]
pub use ollama::OllamaEmbeddingProvider;
