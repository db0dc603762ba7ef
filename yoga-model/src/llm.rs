//! The language model capability.

use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An ordered, finite sequence of generated text fragments.
///
/// Fragments must be concatenated in arrival order. A stream is consumed by
/// exactly one reader and cannot be restarted; dropping it cancels generation.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Who authored a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions framing the conversation.
    System,
    /// The person asking.
    User,
    /// The model.
    Assistant,
}

/// One chat message sent to a model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Message author.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl Message {
    /// A system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    /// An assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// A chat language model.
///
/// [`stream`](Llm::stream) is the primitive; [`invoke`](Llm::invoke) defaults
/// to collecting the stream into one string.
#[async_trait]
pub trait Llm: Send + Sync {
    /// The model identifier.
    fn name(&self) -> &str;

    /// Start generating a reply to `messages`, yielding fragments as they arrive.
    async fn stream(&self, messages: Vec<Message>) -> Result<TextStream>;

    /// Generate a complete reply to `messages`.
    async fn invoke(&self, messages: Vec<Message>) -> Result<String> {
        let mut stream = self.stream(messages).await?;
        let mut reply = String::new();
        while let Some(fragment) = stream.next().await {
            reply.push_str(&fragment?);
        }
        Ok(reply)
    }
}
