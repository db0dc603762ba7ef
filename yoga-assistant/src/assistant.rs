//! The question-answering pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use futures::StreamExt;
use tracing::{error, info, warn};
use yoga_guardrail::{SAFETY_BLOCKED_CATEGORY, SafetyFilter, SafetyVerdict, advisory_message};
use yoga_model::Llm;
use yoga_rag::{KnowledgeBase, RebuildReport, RetrievalResult, SourceRef};

use crate::answer::AnswerGenerator;
use crate::category::{Categorizer, Category};
use crate::config::AssistantConfig;
use crate::conversation::{Conversation, TurnKind};
use crate::error::{AssistantError, Result};
use crate::log::{InteractionLog, InteractionLogger};
use crate::sources::{collect_sources, sources_section};

/// The outcome of one [`YogaAssistant::ask`].
#[derive(Debug, Clone)]
pub struct Reply {
    /// Everything passed to the fragment callback, concatenated.
    pub text: String,
    /// `None` when the safety gate blocked the query.
    pub category: Option<Category>,
    /// Distinct sources of the retrieved context, in retrieval order.
    pub sources: Vec<SourceRef>,
    pub verdict: SafetyVerdict,
}

impl Reply {
    pub fn is_blocked(&self) -> bool {
        self.verdict.is_unsafe()
    }
}

/// Answers yoga questions from the knowledge base.
///
/// Each [`ask`](Self::ask) screens the query, categorizes it and retrieves
/// context concurrently, streams a grounded answer and logs the interaction.
/// The assistant holds no per-conversation state and can be shared behind an
/// `Arc`.
pub struct YogaAssistant {
    knowledge: Arc<KnowledgeBase>,
    safety: SafetyFilter,
    categorizer: Categorizer,
    generator: AnswerGenerator,
    logger: InteractionLogger,
    config: AssistantConfig,
}

impl YogaAssistant {
    pub fn builder() -> YogaAssistantBuilder {
        YogaAssistantBuilder::default()
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Answer `query`, passing each piece of the reply to `on_fragment` as it
    /// becomes available.
    ///
    /// The pieces are the topic header, the model's fragments in arrival
    /// order and the sources footer. A blocked query yields the safety
    /// advisory as a single piece. Once the reply is complete it is logged
    /// and appended to `conversation`. Dropping the returned future cancels
    /// generation and nothing is logged.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Generation`] if the model fails. Nothing is
    /// logged and `conversation` is unchanged in that case.
    pub async fn ask<F>(&self, conversation: &mut Conversation, query: &str, mut on_fragment: F) -> Result<Reply>
    where
        F: FnMut(&str) + Send,
    {
        let verdict = self.safety.classify(query);
        if let SafetyVerdict::Unsafe { term } = &verdict {
            info!(term = %term, "query blocked by safety filter");
            let text = advisory_message(term);
            on_fragment(&text);

            self.logger.log(InteractionLog::new(query, &text, Vec::new(), true, SAFETY_BLOCKED_CATEGORY)).await;
            conversation.record(query, &text, TurnKind::Warning);
            return Ok(Reply { text, category: None, sources: Vec::new(), verdict });
        }

        let (category, retrieval) =
            tokio::join!(self.categorizer.categorize(query), self.retrieve(query));

        let mut text = String::new();
        if self.config.show_topic {
            let header = format!("**Topic:** {category}\n\n");
            on_fragment(&header);
            text.push_str(&header);
        }

        let mut stream = self.generator.generate(query, &retrieval.results).await.map_err(|e| {
            error!(error = %e, "answer generation failed");
            AssistantError::Generation(e)
        })?;
        while let Some(fragment) = stream.next().await {
            let fragment = fragment.map_err(|e| {
                error!(error = %e, "answer stream failed");
                AssistantError::Generation(e)
            })?;
            on_fragment(&fragment);
            text.push_str(&fragment);
        }

        let sources = collect_sources(&retrieval.results);
        let footer = sources_section(&sources);
        if !footer.is_empty() {
            on_fragment(&footer);
            text.push_str(&footer);
        }

        info!(%category, chunks = retrieval.results.len(), sources = sources.len(), "answered query");

        let rendered = sources.iter().map(ToString::to_string).collect();
        self.logger.log(InteractionLog::new(query, &text, rendered, false, category.label())).await;
        conversation.record(query, &text, TurnKind::Answer);

        Ok(Reply { text, category: Some(category), sources, verdict })
    }

    /// Retrieval failures degrade to an empty context.
    async fn retrieve(&self, query: &str) -> RetrievalResult {
        match self.knowledge.retrieve(query).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "retrieval failed, answering without context");
                RetrievalResult::empty(query, self.knowledge.config().top_k)
            }
        }
    }

    /// Rebuild the knowledge base from the source directory.
    pub async fn rebuild(&self) -> Result<RebuildReport> {
        self.knowledge.rebuild().await.map_err(AssistantError::Rebuild)
    }

    /// Supported files currently in the source directory.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        self.knowledge.loader().list_files().map_err(AssistantError::Files)
    }

    /// Copy `files` into the source directory. They take effect on the next rebuild.
    pub fn add_files(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
        self.knowledge.loader().import(files).map_err(AssistantError::Files)
    }
}

/// Builder for [`YogaAssistant`].
///
/// `knowledge` and `llm` are required. The safety filter defaults to the
/// built-in denylist and logging is disabled unless a logger is given.
#[derive(Default)]
pub struct YogaAssistantBuilder {
    knowledge: Option<Arc<KnowledgeBase>>,
    llm: Option<Arc<dyn Llm>>,
    safety: Option<SafetyFilter>,
    logger: Option<InteractionLogger>,
    config: Option<AssistantConfig>,
}

impl YogaAssistantBuilder {
    pub fn knowledge(mut self, knowledge: Arc<KnowledgeBase>) -> Self {
        self.knowledge = Some(knowledge);
        self
    }

    /// Model used for both categorization and answering.
    pub fn llm(mut self, llm: Arc<dyn Llm>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn safety_filter(mut self, filter: SafetyFilter) -> Self {
        self.safety = Some(filter);
        self
    }

    pub fn logger(mut self, logger: InteractionLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn config(mut self, config: AssistantConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// # Errors
    ///
    /// Returns [`AssistantError::Config`] if `knowledge` or `llm` is missing.
    pub fn build(self) -> Result<YogaAssistant> {
        let knowledge =
            self.knowledge.ok_or_else(|| AssistantError::Config("knowledge base is required".into()))?;
        let llm = self.llm.ok_or_else(|| AssistantError::Config("language model is required".into()))?;
        let config = self.config.unwrap_or_default();

        Ok(YogaAssistant {
            knowledge,
            safety: self.safety.unwrap_or_default(),
            categorizer: Categorizer::new(llm.clone(), config.categorize_timeout),
            generator: AnswerGenerator::new(llm),
            logger: self.logger.unwrap_or_default(),
            config,
        })
    }
}
