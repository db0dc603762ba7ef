//! Ollama embedding provider using the local `/api/embed` endpoint.
//!
//! This module is only available when the `ollama` feature is enabled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// The default Ollama server address.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// The default embedding model.
const DEFAULT_MODEL: &str = "llama3.2";

/// Hidden size of the default model.
const DEFAULT_DIMENSIONS: usize = 3072;

/// An [`EmbeddingProvider`] backed by a running Ollama server.
///
/// # Example
///
/// ```rust,ignore
/// use yoga_rag::ollama::OllamaEmbeddingProvider;
///
/// let provider = OllamaEmbeddingProvider::new("http://localhost:11434")
///     .with_model("nomic-embed-text")
///     .with_dimensions(768);
/// let embedding = provider.embed("cat cow flow").await?;
/// ```
pub struct OllamaEmbeddingProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl OllamaEmbeddingProvider {
    /// Create a provider talking to the server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.into(),
            dimensions: DEFAULT_DIMENSIONS,
        }
    }

    /// Set the model name (e.g. `nomic-embed-text`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the dimensionality reported by [`dimensions()`](EmbeddingProvider::dimensions).
    pub fn with_dimensions(mut self, dims: usize) -> Self {
        self.dimensions = dims;
        self
    }

    fn error(message: String) -> RagError {
        RagError::EmbeddingError { provider: "Ollama".into(), message }
    }
}

impl Default for OllamaEmbeddingProvider {
    fn default() -> Self {
        Self::new(DEFAULT_OLLAMA_URL)
    }
}

// ── Ollama API request/response types ──────────────────────────────

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

// ── EmbeddingProvider implementation ───────────────────────────────

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "Ollama", text_len = text.len(), "embedding single text");

        let results = self.embed_batch(&[text]).await?;
        results.into_iter().next().ok_or_else(|| Self::error("API returned empty response".into()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(provider = "Ollama", batch_size = texts.len(), model = %self.model, "embedding batch");

        let request_body = EmbedRequest { model: &self.model, input: texts.to_vec() };
        let response = self
            .client
            .post(format!("{}/api/embed", self.base_url))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Ollama", error = %e, "request failed");
                Self::error(format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail =
                serde_json::from_str::<ErrorResponse>(&body).map(|e| e.error).unwrap_or(body);

            error!(provider = "Ollama", %status, "API error");
            return Err(Self::error(format!("API returned {status}: {detail}")));
        }

        let embed_response: EmbedResponse = response.json().await.map_err(|e| {
            error!(provider = "Ollama", error = %e, "failed to parse response");
            Self::error(format!("failed to parse response: {e}"))
        })?;

        if embed_response.embeddings.len() != texts.len() {
            return Err(Self::error(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                embed_response.embeddings.len()
            )));
        }

        Ok(embed_response.embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
