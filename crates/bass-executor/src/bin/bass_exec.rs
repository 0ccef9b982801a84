//! `bass-exec`: the standalone pipeline executor CLI. Invoked by the
//! worker with a pipeline's `exec` vector and the canonical flags, but
//! equally runnable by hand against a pipeline tree file; no
//! orchestrator or worker required.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bass_core::node::RawNode;
use bass_core::trace::{generate_span_id, generate_trace_id};
use bass_core::validate::validate_pipeline;
use bass_executor::{execute_node, ExecContext};
use bass_telemetry::{LogSender, SpanSender};
use clap::Parser;

/// Executes a pipeline tree and reports an aggregated status via OTLP
/// spans and logs.
#[derive(Parser, Debug)]
#[command(name = "bass-exec")]
struct Cli {
    /// Path to the pipeline tree definition (JSON, `RawNode` shape).
    pipeline: PathBuf,

    /// Name to use for the otel trace. Defaults to `bass:pipeline:<name>`.
    #[arg(short = 's', long = "service-name")]
    service_name: Option<String>,

    /// Trace id to use; generated if omitted.
    #[arg(short = 'i', long = "trace-id")]
    trace_id: Option<String>,

    /// Root span id to use; generated if omitted.
    #[arg(short = 'd', long = "root-span-id")]
    root_span_id: Option<String>,

    /// Emit an extra `pipeline:<name>` root span wrapping the whole run.
    #[arg(short = 'g', long = "generate-root-span")]
    generate_root_span: bool,

    #[arg(short = 't', long = "traces-endpoint", default_value = "http://localhost:4318/v1/traces")]
    traces_endpoint: String,

    #[arg(short = 'l', long = "logs-endpoint", default_value = "http://localhost:4318/v1/logs")]
    logs_endpoint: String,

    /// Path to a file of newline-separated changed paths.
    #[arg(short = 'c', long = "changeset")]
    changeset: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let raw = fs::read_to_string(&cli.pipeline)
        .with_context(|| format!("reading pipeline file {}", cli.pipeline.display()))?;
    let raw_node: RawNode = serde_json::from_str(&raw).context("parsing pipeline JSON")?;
    let root = validate_pipeline(&raw_node).context("validating pipeline")?;

    let changeset: Vec<String> = match &cli.changeset {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading changeset file {}", path.display()))?
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect(),
        None => Vec::new(),
    };

    let service_name = cli.service_name.unwrap_or_else(|| format!("bass:pipeline:{}", root.name()));
    let trace_id = cli.trace_id.unwrap_or_else(generate_trace_id);
    let root_span_id = cli.root_span_id.unwrap_or_else(generate_span_id);

    let client = reqwest::Client::new();
    let spanner = SpanSender::new(client.clone(), cli.traces_endpoint.clone(), service_name.clone(), trace_id.clone());
    let logger = LogSender::new(client, cli.logs_endpoint.clone(), service_name, trace_id);

    let ctx = ExecContext {
        spanner: spanner.clone(),
        logger,
        env: std::env::vars().collect(),
    };

    let cwd = std::env::current_dir().context("resolving current directory")?;

    let root_start = chrono::Utc::now();
    let status = execute_node(&ctx, &root, Some(&root_span_id), &changeset, &cwd).await;
    let root_end = chrono::Utc::now();

    if cli.generate_root_span {
        spanner
            .send(
                &format!("pipeline:{}", root.name()),
                None,
                &root_span_id,
                root_start,
                root_end,
                status.otel_status(),
            )
            .await;
    }

    tracing::info!(status = %status, value = status.value(), "execution concluded");

    std::process::exit(status.value() as i32);
}
