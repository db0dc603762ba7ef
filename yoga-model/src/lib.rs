//! # yoga-model
//!
//! Language model integrations for the yoga wellness assistant.
//!
//! ## Overview
//!
//! - [`Llm`] - the chat capability: streamed fragments or one complete reply
//! - [`OllamaModel`] - a local Ollama server (`ollama` feature, on by default)
//! - [`MockLlm`] - scripted replies for tests and offline runs
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use yoga_model::{Llm, Message, OllamaConfig, OllamaModel};
//!
//! let model = OllamaModel::new(OllamaConfig::new("llama3.2"))?;
//! let mut stream = model.stream(vec![Message::user("What is Tadasana?")]).await?;
//! while let Some(fragment) = stream.next().await {
//!     print!("{}", fragment?);
//! }
//! ```

pub mod error;
pub mod llm;
pub mod mock;
#[cfg(feature = "ollama")]
pub mod ollama;

pub use error::{ModelError, Result};
pub use llm::{Llm, Message, Role, TextStream};
pub use mock::MockLlm;
#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaModel};
