//! Error types for language model calls.

use thiserror::Error;

/// Errors that can occur when calling a language model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The request could not be sent or the connection failed.
    #[error("Request error ({provider}): {message}")]
    Request {
        /// The model provider.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The provider answered with an error status or error payload.
    #[error("API error ({provider}, status {status}): {message}")]
    Api {
        /// The model provider.
        provider: String,
        /// HTTP status code, or 0 for an error reported inside a stream.
        status: u16,
        /// The provider's error message.
        message: String,
    },

    /// The response stream broke off before completion.
    #[error("Stream error: {0}")]
    Stream(String),

    /// A response could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for [`ModelError`].
pub type Result<T> = std::result::Result<T, ModelError>;
