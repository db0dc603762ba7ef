//! Configuration for the Ollama chat client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The default Ollama server address.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// The default chat model.
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Connection settings for [`OllamaModel`](super::OllamaModel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Server address, e.g. `http://localhost:11434`.
    pub base_url: String,
    /// Model name as known to the server.
    pub model: String,
    /// Sampling temperature. `None` leaves the server default.
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Time allowed to establish a connection.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: Duration,
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

impl OllamaConfig {
    /// Settings for `model` on the default local server.
    pub fn new(model: impl Into<String>) -> Self {
        Self { model: model.into(), ..Self::default() }
    }

    /// Use the server at `base_url`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            connect_timeout: default_connect_timeout(),
        }
    }
}
