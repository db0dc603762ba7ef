//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Ask questions about yoga poses, breathing and practice, answered from your own library.
#[derive(Debug, Parser)]
#[command(name = "yoga", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub settings: Settings,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Answer a single question and exit
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Rebuild the knowledge base and print a summary
    Rebuild,
    /// List the documents in the library
    Files,
    /// Copy documents (.pdf, .docx, .txt) into the library
    Add {
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },
    /// Interactive chat (default)
    Chat,
}

/// Settings shared by every command. Each can also come from the environment or `.env`.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Directory holding the source documents
    #[arg(long, global = true, env = "YOGA_DOCS_DIR", default_value = "uploaded_documents")]
    pub docs_dir: PathBuf,

    /// Ollama server address
    #[arg(long, global = true, env = "OLLAMA_HOST", default_value = "http://localhost:11434")]
    pub ollama_url: String,

    /// Chat model served by Ollama
    #[arg(long, global = true, env = "YOGA_CHAT_MODEL", default_value = "llama3.2")]
    pub chat_model: String,

    /// Embedding model served by Ollama
    #[arg(long, global = true, env = "YOGA_EMBED_MODEL", default_value = "llama3.2")]
    pub embed_model: String,

    /// Dimensionality of the embedding model
    #[arg(long, global = true, env = "YOGA_EMBED_DIMENSIONS", default_value_t = 3072)]
    pub embed_dimensions: usize,

    /// Use local hashing embeddings instead of the Ollama embedding model
    #[arg(long, global = true, env = "YOGA_OFFLINE")]
    pub offline: bool,

    /// Append interactions to this JSON-lines file
    #[arg(long, global = true, env = "YOGA_LOG_PATH")]
    pub log_path: Option<PathBuf>,

    /// Log interactions to MongoDB (requires the `mongodb` feature)
    #[arg(long, global = true, env = "YOGA_MONGO_URI")]
    pub mongo_uri: Option<String>,

    /// Maximum characters per chunk
    #[arg(long, global = true, env = "YOGA_CHUNK_SIZE", default_value_t = 1000)]
    pub chunk_size: usize,

    /// Characters shared by consecutive chunks
    #[arg(long, global = true, env = "YOGA_CHUNK_OVERLAP", default_value_t = 200)]
    pub chunk_overlap: usize,

    /// Chunks retrieved per question
    #[arg(long, global = true, env = "YOGA_TOP_K", default_value_t = 4)]
    pub top_k: usize,

    /// Seconds allowed for categorizing a question
    #[arg(long, global = true, env = "YOGA_CATEGORIZE_TIMEOUT", default_value_t = 30)]
    pub categorize_timeout: u64,

    /// Omit the "Topic" header from answers
    #[arg(long, global = true)]
    pub no_topic: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn chat_is_the_default() {
        let cli = Cli::try_parse_from(["yoga"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.settings.top_k, 4);
    }

    #[test]
    fn ask_joins_words_and_accepts_global_flags() {
        let cli = Cli::try_parse_from(["yoga", "ask", "what", "is", "tadasana?", "--top-k", "2", "--offline"])
            .unwrap();
        match cli.command {
            Some(Commands::Ask { query }) => assert_eq!(query.join(" "), "what is tadasana?"),
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.settings.top_k, 2);
        assert!(cli.settings.offline);
    }

    #[test]
    fn add_requires_files() {
        assert!(Cli::try_parse_from(["yoga", "add"]).is_err());
    }
}
