//! # yoga-assistant
//!
//! Retrieval-augmented question answering for yoga practice.
//!
//! ## Overview
//!
//! A query passes through these stages:
//!
//! 1. [`SafetyFilter`](yoga_guardrail::SafetyFilter) blocks medical questions with an advisory
//! 2. [`Categorizer`] and knowledge-base retrieval run concurrently
//! 3. [`AnswerGenerator`] streams an answer grounded in the retrieved chunks
//! 4. the sources footer is appended and [`InteractionLogger`] records the result
//!
//! [`YogaAssistant`] ties the stages together. Chat history lives in a
//! caller-owned [`Conversation`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use yoga_assistant::{Conversation, YogaAssistant};
//!
//! let assistant = YogaAssistant::builder()
//!     .knowledge(Arc::new(knowledge_base))
//!     .llm(Arc::new(model))
//!     .build()?;
//!
//! assistant.rebuild().await?;
//! let mut conversation = Conversation::new();
//! assistant.ask(&mut conversation, "How do I do downward dog?", |f| print!("{f}")).await?;
//! ```

pub mod answer;
pub mod assistant;
pub mod category;
pub mod config;
pub mod conversation;
pub mod error;
pub mod log;
#[cfg(feature = "mongodb")]
pub mod mongo;
pub mod sources;

pub use answer::{AnswerGenerator, FALLBACK_ANSWER, SAFETY_REMINDER};
pub use assistant::{Reply, YogaAssistant, YogaAssistantBuilder};
pub use category::{Categorizer, Category};
pub use config::{AssistantConfig, AssistantConfigBuilder};
pub use conversation::{Conversation, Turn, TurnKind};
pub use error::{AssistantError, LogError, Result};
pub use log::{
    InteractionLog, InteractionLogger, InteractionStore, JsonlInteractionStore, MemoryInteractionStore,
};
#[cfg(feature = "mongodb")]
pub use mongo::MongoInteractionStore;
