//! Ollama client implementation.

use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use tracing::{debug, error};

use super::config::OllamaConfig;
use super::convert::{self, ChatOptions, ChatRequest, ErrorBody};
use crate::error::{ModelError, Result};
use crate::llm::{Llm, Message, TextStream};

const PROVIDER: &str = "Ollama";

/// Chat model served by a local Ollama instance.
pub struct OllamaModel {
    client: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaModel {
    /// Create a client from `config`.
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ModelError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// The active configuration.
    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    async fn send(&self, messages: &[Message], stream: bool) -> Result<reqwest::Response> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            stream,
            options: self.config.temperature.map(|temperature| ChatOptions { temperature }),
        };

        debug!(provider = PROVIDER, model = %self.config.model, messages = messages.len(), stream, "chat request");

        let response = self
            .client
            .post(format!("{}/api/chat", self.config.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = PROVIDER, error = %e, "request failed");
                ModelError::Request { provider: PROVIDER.into(), message: e.to_string() }
            })?;

        check_status(response).await
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body).map(|e| e.error).unwrap_or(body);
    error!(provider = PROVIDER, %status, "API error");
    Err(ModelError::Api { provider: PROVIDER.into(), status: status.as_u16(), message })
}

#[async_trait]
impl Llm for OllamaModel {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn stream(&self, messages: Vec<Message>) -> Result<TextStream> {
        let response = self.send(&messages, true).await?;

        let stream = try_stream! {
            let mut body = response.bytes_stream();
            let mut buffer: Vec<u8> = Vec::new();

            while let Some(bytes) = body.next().await {
                let bytes = bytes.map_err(|e| ModelError::Stream(e.to_string()))?;
                buffer.extend_from_slice(&bytes);

                while let Some(newline) = buffer.iter().position(|b| *b == b'\n') {
                    let line: Vec<u8> = buffer.drain(..=newline).collect();
                    if let Some(fragment) = convert::parse_chat_line(&line)? {
                        yield fragment;
                    }
                }
            }

            if let Some(fragment) = convert::parse_chat_line(&buffer)? {
                yield fragment;
            }
        };

        Ok(Box::pin(stream))
    }

    async fn invoke(&self, messages: Vec<Message>) -> Result<String> {
        let response = self.send(&messages, false).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| ModelError::Request { provider: PROVIDER.into(), message: e.to_string() })?;
        Ok(convert::parse_chat_line(&body)?.unwrap_or_default())
    }
}
