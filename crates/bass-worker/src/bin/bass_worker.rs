//! The `bass-worker` binary.

use std::path::PathBuf;

use anyhow::Context;
use bass_worker::Worker;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bass-worker")]
struct Cli {
    #[arg(long, default_value = "http://localhost:8080/dequeue")]
    dequeue_endpoint: String,

    #[arg(long)]
    workspace_root: PathBuf,

    /// Comma-separated capability tags this worker offers.
    #[arg(long)]
    tags: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let api_key = std::env::var("BASS_API_KEY").context("BASS_API_KEY must be set")?;

    let tags: Vec<String> = cli
        .tags
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    tokio::fs::create_dir_all(&cli.workspace_root).await?;

    let worker = Worker {
        dequeue_endpoint: cli.dequeue_endpoint,
        api_key,
        tags,
        workspace_root: cli.workspace_root,
        client: reqwest::Client::new(),
    };

    worker.run_forever().await
}
