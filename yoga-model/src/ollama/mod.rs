//! Ollama chat integration.
//!
//! Talks to a local Ollama server over its native `/api/chat` endpoint and
//! decodes the newline-delimited JSON stream it returns.

mod client;
mod config;
mod convert;

pub use client::OllamaModel;
pub use config::{DEFAULT_MODEL, DEFAULT_OLLAMA_URL, OllamaConfig};
