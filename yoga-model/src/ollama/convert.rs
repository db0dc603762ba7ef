//! Wire types for `/api/chat` and decoding of stream lines.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::llm::Message;

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<ChatOptions>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatOptions {
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatLine {
    #[serde(default)]
    message: Option<ChatMessage>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

/// Decode one NDJSON line of a chat response.
///
/// Returns `Ok(None)` for blank lines and lines without content, such as the
/// final `done` record.
pub(crate) fn parse_chat_line(line: &[u8]) -> Result<Option<String>> {
    let line = trim_ascii(line);
    if line.is_empty() {
        return Ok(None);
    }

    let parsed: ChatLine = serde_json::from_slice(line)
        .map_err(|e| ModelError::Parse(format!("invalid chat line: {e}")))?;

    if let Some(error) = parsed.error {
        return Err(ModelError::Api { provider: "Ollama".into(), status: 0, message: error });
    }

    Ok(parsed.message.map(|m| m.content).filter(|content| !content.is_empty()))
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(start, |i| i + 1);
    &bytes[start..end]
}
