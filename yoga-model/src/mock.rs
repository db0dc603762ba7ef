//! Scripted model for tests and offline runs.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream;

use crate::error::{ModelError, Result};
use crate::llm::{Llm, Message, TextStream};

/// One scripted reply.
#[derive(Debug, Clone)]
enum Reply {
    Fragments(Vec<String>),
    Fail(String),
    FailMidStream(Vec<String>, String),
}

/// A model that replays scripted replies in order and records every call.
///
/// When the script runs out, the last reply is repeated. A mock with an empty
/// script fails every call.
///
/// # Example
///
/// ```rust
/// use yoga_model::{Llm, Message, MockLlm};
///
/// # tokio_test_block(async {
/// let llm = MockLlm::new("mock")
///     .with_reply("Asana")
///     .with_fragments(["Downward dog ", "stretches the spine [Source 1]."]);
///
/// assert_eq!(llm.invoke(vec![Message::user("classify")]).await.unwrap(), "Asana");
/// assert_eq!(llm.call_count(), 1);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug)]
pub struct MockLlm {
    name: String,
    script: Mutex<VecDeque<Reply>>,
    last: Mutex<Option<Reply>>,
    calls: Mutex<Vec<Vec<Message>>>,
    delay: Option<Duration>,
}

impl MockLlm {
    /// Create a mock with an empty script.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: Mutex::new(VecDeque::new()),
            last: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Queue a reply delivered as a single fragment.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.push(Reply::Fragments(vec![text.into()]))
    }

    /// Queue a reply delivered as several fragments.
    pub fn with_fragments<I, S>(self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Reply::Fragments(fragments.into_iter().map(Into::into).collect()))
    }

    /// Queue a call that fails before producing anything.
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.push(Reply::Fail(message.into()))
    }

    /// Queue a stream that yields `fragments` and then fails.
    pub fn with_stream_failure<I, S>(self, fragments: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Reply::FailMidStream(fragments.into_iter().map(Into::into).collect(), message.into()))
    }

    /// Wait `delay` before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Messages received by every call so far, in call order.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }

    fn push(self, reply: Reply) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(reply);
        }
        self
    }

    fn next_reply(&self) -> Option<Reply> {
        let next = self.script.lock().ok().and_then(|mut script| script.pop_front());
        let mut last = self.last.lock().ok()?;
        match next {
            Some(reply) => {
                *last = Some(reply.clone());
                Some(reply)
            }
            None => last.clone(),
        }
    }

    fn error(&self, message: String) -> ModelError {
        ModelError::Request { provider: self.name.clone(), message }
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        &self.name
    }

    async fn stream(&self, messages: Vec<Message>) -> Result<TextStream> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(messages);
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.next_reply() {
            Some(Reply::Fragments(fragments)) => {
                Ok(Box::pin(stream::iter(fragments.into_iter().map(Ok))))
            }
            Some(Reply::Fail(message)) => Err(self.error(message)),
            Some(Reply::FailMidStream(fragments, message)) => {
                let items = fragments
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(ModelError::Stream(message))));
                Ok(Box::pin(stream::iter(items)))
            }
            None => Err(self.error("no scripted reply".to_string())),
        }
    }
}
