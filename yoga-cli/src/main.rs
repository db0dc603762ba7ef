use clap::Parser;
use tracing_subscriber::EnvFilter;
use yoga_cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (OLLAMA_HOST, YOGA_DOCS_DIR, ...).
    dotenvy::dotenv().ok();

    // Diagnostics go to stderr so answers on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    yoga_cli::run(Cli::parse()).await
}
