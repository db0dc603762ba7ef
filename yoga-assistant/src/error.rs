//! Error types for the assistant.

use thiserror::Error;
use yoga_model::ModelError;
use yoga_rag::RagError;

/// Errors that can escape [`YogaAssistant`](crate::YogaAssistant) operations.
///
/// Retrieval, categorization and logging failures never appear here; they
/// degrade to a fallback inside `ask`.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The model failed while producing the answer.
    #[error("Answer generation failed: {0}")]
    Generation(#[from] ModelError),

    /// Rebuilding the knowledge base failed. The previous index stays published.
    #[error("Knowledge base rebuild failed: {0}")]
    Rebuild(#[source] RagError),

    /// Listing or importing source files failed.
    #[error("Source files: {0}")]
    Files(#[source] RagError),

    /// The assistant was assembled incorrectly.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for [`AssistantError`].
pub type Result<T> = std::result::Result<T, AssistantError>;

/// Errors raised by an interaction store.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The storage backend rejected the entry or is unreachable.
    #[error("Store error ({backend}): {message}")]
    Backend { backend: String, message: String },
}
