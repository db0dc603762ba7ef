//! Grounded answer generation.

use std::sync::Arc;

use futures::stream;
use tracing::debug;
use yoga_model::{Llm, Message, TextStream};
use yoga_rag::SearchResult;

/// Sentence used when the library has nothing relevant.
pub const FALLBACK_ANSWER: &str = "I cannot find specific advice on this in my current library.";

/// Reminder every grounded answer must carry.
pub const SAFETY_REMINDER: &str = "Listen to your body and stop if you feel pain.";

/// Number retrieved chunks as `[Source N]: text`, separated by blank lines.
pub fn build_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, result)| format!("[Source {}]: {}", i + 1, result.chunk.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// System prompt restricting the model to `context`.
pub fn grounding_prompt(context: &str) -> String {
    format!(
        "You are a Yoga Wellness Assistant. Answer the user's question based ONLY on the provided Context.\n\n\
         Context:\n\
         {context}\n\n\
         Instructions:\n\
         1. Be encouraging and calm.\n\
         2. If the answer is not in the context, say \"{FALLBACK_ANSWER}\"\n\
         3. ALWAYS mention: \"{SAFETY_REMINDER}\"\n\
         4. Cite sources using [Source X] format.\n"
    )
}

/// Streams answers grounded in retrieved chunks.
pub struct AnswerGenerator {
    llm: Arc<dyn Llm>,
}

impl AnswerGenerator {
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self { llm }
    }

    /// Start answering `query` from `results`.
    ///
    /// With no results the model is not called and the stream carries only
    /// [`FALLBACK_ANSWER`].
    pub async fn generate(&self, query: &str, results: &[SearchResult]) -> yoga_model::Result<TextStream> {
        if results.is_empty() {
            debug!("no context retrieved, answering with fallback");
            return Ok(Box::pin(stream::iter([Ok(FALLBACK_ANSWER.to_string())])));
        }

        let messages = vec![
            Message::system(grounding_prompt(&build_context(results))),
            Message::user(query),
        ];
        debug!(model = self.llm.name(), context_chunks = results.len(), "generating answer");
        self.llm.stream(messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use yoga_model::{MockLlm, Role};
    use yoga_rag::Chunk;

    fn result(text: &str) -> SearchResult {
        SearchResult {
            id: text.to_string(),
            chunk: Chunk { text: text.into(), source: "docs/poses.txt".into(), page: None, chunk_index: 0 },
            score: 0.5,
        }
    }

    #[test]
    fn context_is_numbered_from_one() {
        let context = build_context(&[result("first"), result("second")]);
        assert_eq!(context, "[Source 1]: first\n\n[Source 2]: second");
    }

    #[test]
    fn prompt_carries_rules() {
        let prompt = grounding_prompt("[Source 1]: text");
        assert!(prompt.contains("Context:\n[Source 1]: text"));
        assert!(prompt.contains(FALLBACK_ANSWER));
        assert!(prompt.contains(SAFETY_REMINDER));
        assert!(prompt.contains("[Source X]"));
    }

    #[tokio::test]
    async fn empty_results_skip_the_model() {
        let llm = Arc::new(MockLlm::new("mock").with_reply("should not be used"));
        let generator = AnswerGenerator::new(llm.clone());

        let fragments: Vec<String> =
            generator.generate("q", &[]).await.unwrap().map(|f| f.unwrap()).collect().await;
        assert_eq!(fragments, vec![FALLBACK_ANSWER.to_string()]);
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn sends_system_prompt_then_query() {
        let llm = Arc::new(MockLlm::new("mock").with_fragments(["a", "b"]));
        let generator = AnswerGenerator::new(llm.clone());

        let answer: String = generator
            .generate("how to cobra?", &[result("Cobra opens the chest.")])
            .await
            .unwrap()
            .map(|f| f.unwrap())
            .collect()
            .await;
        assert_eq!(answer, "ab");

        let call = &llm.calls()[0];
        assert_eq!(call[0].role, Role::System);
        assert!(call[0].content.contains("[Source 1]: Cobra opens the chest."));
        assert_eq!(call[1], Message::user("how to cobra?"));
    }
}
