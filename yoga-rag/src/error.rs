//! Error types for the `yoga-rag` crate.

use thiserror::Error;

/// Errors that can occur while building or querying the knowledge base.
#[derive(Debug, Error)]
pub enum RagError {
    /// A source file could not be read or parsed.
    #[error("Loader error ({path}): {message}")]
    LoaderError {
        /// The file that failed to load.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    VectorStoreError {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during document chunking.
    #[error("Chunking error: {0}")]
    ChunkingError(String),

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An error in ingestion or query orchestration.
    #[error("Pipeline error: {0}")]
    PipelineError(String),

    /// A file system error outside of per-file extraction.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
