//! The `bass-orchestrator` binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use bass_orchestrator::AppState;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bass-orchestrator")]
struct Cli {
    #[arg(long, default_value = "http://localhost:4318/v1/traces")]
    traces_endpoint: String,

    #[arg(long, default_value = "http://localhost:4318/v1/logs")]
    logs_endpoint: String,

    /// JSON pipeline catalog file.
    #[arg(long)]
    pipelines_file: PathBuf,

    /// KEY=VALUE env file, expanded against the process environment.
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// One worker API key per line; if omitted, `/dequeue` requires no auth.
    #[arg(long)]
    worker_keys_file: Option<PathBuf>,

    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let catalog = bass_config::pipelines::load_pipelines_file(&cli.pipelines_file)
        .with_context(|| format!("loading pipelines file {}", cli.pipelines_file.display()))?;
    info!(count = catalog.len(), "loaded pipeline catalog");

    let job_env = match &cli.env_file {
        Some(path) => bass_config::env_file::load_env_file(path)
            .with_context(|| format!("loading env file {}", path.display()))?,
        None => Default::default(),
    };

    let worker_keys = match &cli.worker_keys_file {
        Some(path) => bass_config::worker_keys::load_worker_keys_file(path)
            .with_context(|| format!("loading worker keys file {}", path.display()))?,
        None => Default::default(),
    };

    let state = AppState::new(catalog, worker_keys, job_env, cli.traces_endpoint, cli.logs_endpoint);
    let app = bass_orchestrator::routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    info!(%addr, "starting orchestrator");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
