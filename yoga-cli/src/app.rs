//! Assembles the assistant from [`Settings`] and runs commands.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};
use yoga_assistant::{
    AssistantConfig, Conversation, InteractionLogger, JsonlInteractionStore, YogaAssistant,
};
use yoga_model::{OllamaConfig, OllamaModel};
use yoga_rag::{
    EmbeddingProvider, HashingEmbeddingProvider, KnowledgeBase, OllamaEmbeddingProvider, RagConfig,
    RebuildReport,
};

use crate::cli::{Cli, Commands, Settings};
use crate::repl;

/// Run the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let assistant = build_assistant(&cli.settings).await?;

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Ask { query } => {
            rebuild(&assistant).await?;
            let query = query.join(" ");
            let mut conversation = Conversation::new();
            assistant.ask(&mut conversation, &query, print_fragment).await?;
            println!();
        }
        Commands::Rebuild => {
            let report = rebuild(&assistant).await?;
            print_report(&report);
        }
        Commands::Files => print_files(&assistant)?,
        Commands::Add { files } => {
            let added = assistant.add_files(&files)?;
            for path in &added {
                println!("Added {}", path.display());
            }
            println!("Run `yoga rebuild` or `/rebuild` in chat to apply.");
        }
        Commands::Chat => {
            rebuild(&assistant).await?;
            repl::run(&assistant).await?;
        }
    }
    Ok(())
}

/// Build the assistant described by `settings`.
pub async fn build_assistant(settings: &Settings) -> Result<YogaAssistant> {
    let rag_config = RagConfig::builder()
        .chunk_size(settings.chunk_size)
        .chunk_overlap(settings.chunk_overlap)
        .top_k(settings.top_k)
        .build()
        .context("invalid retrieval settings")?;

    let knowledge = KnowledgeBase::builder()
        .config(rag_config)
        .source_dir(&settings.docs_dir)
        .embedding_provider(embedding_provider(settings))
        .build()
        .context("failed to set up the knowledge base")?;

    let llm = OllamaModel::new(
        OllamaConfig::new(&settings.chat_model).with_base_url(&settings.ollama_url),
    )
    .context("failed to set up the chat model")?;

    let config = AssistantConfig::builder()
        .categorize_timeout(Duration::from_secs(settings.categorize_timeout))
        .show_topic(!settings.no_topic)
        .build()?;

    let assistant = YogaAssistant::builder()
        .knowledge(Arc::new(knowledge))
        .llm(Arc::new(llm))
        .logger(open_logger(settings).await)
        .config(config)
        .build()?;
    Ok(assistant)
}

fn embedding_provider(settings: &Settings) -> Arc<dyn EmbeddingProvider> {
    if settings.offline {
        info!("using local hashing embeddings");
        Arc::new(HashingEmbeddingProvider::default())
    } else {
        Arc::new(
            OllamaEmbeddingProvider::new(&settings.ollama_url)
                .with_model(&settings.embed_model)
                .with_dimensions(settings.embed_dimensions),
        )
    }
}

/// Pick the interaction store. An unreachable store disables logging.
async fn open_logger(settings: &Settings) -> InteractionLogger {
    if let Some(uri) = &settings.mongo_uri {
        match connect_mongo(uri).await {
            Ok(logger) => return logger,
            Err(e) => warn!(error = %e, "MongoDB unavailable, interaction logging falls back"),
        }
    }

    match &settings.log_path {
        Some(path) => {
            info!(path = %path.display(), "logging interactions to file");
            InteractionLogger::new(Arc::new(JsonlInteractionStore::new(path)))
        }
        None => InteractionLogger::disabled(),
    }
}

#[cfg(feature = "mongodb")]
async fn connect_mongo(uri: &str) -> Result<InteractionLogger> {
    let store = yoga_assistant::MongoInteractionStore::connect(uri).await?;
    Ok(InteractionLogger::new(Arc::new(store)))
}

#[cfg(not(feature = "mongodb"))]
async fn connect_mongo(_uri: &str) -> Result<InteractionLogger> {
    anyhow::bail!("built without the `mongodb` feature")
}

pub(crate) async fn rebuild(assistant: &YogaAssistant) -> Result<RebuildReport> {
    let report = assistant.rebuild().await?;
    for skipped in &report.skipped {
        eprintln!("Skipped {}: {}", skipped.path.display(), skipped.reason);
    }
    Ok(report)
}

pub(crate) fn print_report(report: &RebuildReport) {
    if report.documents == 0 {
        println!("Knowledge base cleared (no documents).");
    } else {
        println!(
            "Knowledge base updated: {} chunks from {} documents ({} replaced).",
            report.chunks, report.documents, report.removed
        );
    }
}

pub(crate) fn print_files(assistant: &YogaAssistant) -> Result<()> {
    let files = assistant.files()?;
    if files.is_empty() {
        println!("No documents found in {}.", assistant.knowledge().loader().root().display());
    }
    for file in files {
        let name = file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        println!("📄 {name}");
    }
    Ok(())
}

pub(crate) fn print_fragment(fragment: &str) {
    print!("{fragment}");
    let _ = io::stdout().flush();
}
