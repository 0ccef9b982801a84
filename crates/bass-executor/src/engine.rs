//! The pipeline tree-walk engine. Recursive, ordered/unordered step tree
//! evaluation with conditional execution, setup/teardown semantics,
//! subprocess supervision, timeouts, and span/log emission.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_recursion::async_recursion;
use bass_core::changeset::matches_changeset;
use bass_core::node::{Exec, Node, Order};
use bass_core::status::ExecStatus;
use bass_core::trace::generate_span_id;
use bass_core::vars::expand_vars;
use bass_telemetry::{LogSender, SpanSender, Severity};
use chrono::Utc;
use futures::stream::{self, StreamExt};

/// Default bounded concurrency width for `unordered` branches.
pub const UNORDERED_POOL_WIDTH: usize = 5;

/// Everything an in-flight node execution needs that doesn't change as we
/// recurse: the span/log senders and the merged environment for `exec`
/// argument expansion.
#[derive(Clone)]
pub struct ExecContext {
    pub spanner: SpanSender,
    pub logger: LogSender,
    pub env: HashMap<String, String>,
}

/// Resolve a node's effective working directory: joined (not replaced)
/// with the parent's effective cwd, so nested `cwd`s stack. Passed
/// explicitly to subprocess launches rather than mutating the
/// process-wide working directory, which would race across unordered
/// siblings.
fn effective_cwd(parent_cwd: &Path, node_cwd: Option<&str>) -> PathBuf {
    match node_cwd {
        Some(rel) => parent_cwd.join(rel),
        None => parent_cwd.to_path_buf(),
    }
}

/// Emit a zero-duration, `UNKNOWN`-status "skipped" span for a node that
/// never ran, without executing it.
async fn emit_skipped(ctx: &ExecContext, name: &str, parent_span_id: Option<&str>) {
    let span_id = generate_span_id();
    let now = Utc::now();
    ctx.spanner
        .send(&format!("step:{name} - skipped"), parent_span_id, &span_id, now, now, 0)
        .await;
}

/// Run a single leaf's command, returning its status plus captured
/// stdout/stderr.
async fn run_leaf(exec: &Exec, timeout: Option<u64>, cwd: &Path, env: &HashMap<String, String>) -> (ExecStatus, String, String) {
    let argv = exec.as_argv();
    if argv.is_empty() {
        return (ExecStatus::Unknown, String::new(), "empty exec argv".to_string());
    }

    let expanded: Vec<String> = argv.iter().map(|a| expand_vars(a, env)).collect();

    let mut command = tokio::process::Command::new(&expanded[0]);
    command
        .args(&expanded[1..])
        .current_dir(cwd)
        .envs(env)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let spawned = match command.spawn() {
        Ok(child) => child,
        Err(e) => return (ExecStatus::Error, String::new(), e.to_string()),
    };

    let wait_result = match timeout {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), spawned.wait_with_output()).await,
        None => Ok(spawned.wait_with_output().await),
    };

    match wait_result {
        Ok(Ok(output)) => {
            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            let status = if output.status.success() { ExecStatus::Ok } else { ExecStatus::Error };
            (status, stdout, stderr)
        }
        Ok(Err(e)) => (ExecStatus::Error, String::new(), e.to_string()),
        Err(_) => (ExecStatus::Timeout, String::new(), "subprocess timed out".to_string()),
    }
}

/// Execute a node (and, recursively, its subtree), returning the
/// aggregated `ExecStatus`.
#[async_recursion]
pub async fn execute_node(
    ctx: &ExecContext,
    node: &Node,
    parent_span_id: Option<&str>,
    changeset: &[String],
    parent_cwd: &Path,
) -> ExecStatus {
    let time_start = Utc::now();
    let span_id = generate_span_id();

    if !matches_changeset(changeset, node.if_changeset_matches()) {
        ctx.spanner
            .send(
                &format!("step:{} - skipped", node.name()),
                parent_span_id,
                &span_id,
                time_start,
                time_start,
                0,
            )
            .await;
        return ExecStatus::Ok;
    }

    let cwd = effective_cwd(parent_cwd, node.cwd());

    let mut aggregated = ExecStatus::Ok;
    let mut skip_remaining = false;

    if let Some(setup) = node.setup() {
        let setup_status = execute_node(ctx, setup, Some(&span_id), changeset, &cwd).await;
        aggregated = aggregated.max(setup_status);
        if setup_status != ExecStatus::Ok {
            skip_remaining = true;
        }
    }

    if !skip_remaining {
        match node {
            Node::Leaf(leaf) => {
                let (status, stdout, stderr) = run_leaf(&leaf.exec, leaf.timeout, &cwd, &ctx.env).await;
                aggregated = aggregated.max(status);

                if !stderr.is_empty() {
                    ctx.logger.send(&span_id, Severity::Error, &stderr).await;
                }
                if !stdout.is_empty() {
                    ctx.logger.send(&span_id, Severity::Info, &stdout).await;
                }
            }
            Node::Branch(branch) => match branch.order {
                Order::Ordered => {
                    let mut iter = branch.steps.iter();
                    for step in iter.by_ref() {
                        let status = execute_node(ctx, step, Some(&span_id), changeset, &cwd).await;
                        aggregated = aggregated.max(status);
                        if aggregated != ExecStatus::Ok {
                            break;
                        }
                    }
                    for step in iter {
                        emit_skipped(ctx, step.name(), Some(&span_id)).await;
                    }
                }
                Order::Unordered => {
                    let results: Vec<ExecStatus> = stream::iter(branch.steps.iter())
                        .map(|step| {
                            let ctx = ctx.clone();
                            let span_id = span_id.clone();
                            let cwd = cwd.clone();
                            async move { execute_node(&ctx, step, Some(&span_id), changeset, &cwd).await }
                        })
                        .buffer_unordered(UNORDERED_POOL_WIDTH)
                        .collect()
                        .await;
                    for status in results {
                        aggregated = aggregated.max(status);
                    }
                }
            },
        }
    }

    if let Some(teardown) = node.teardown() {
        // Teardown is best-effort observability: always runs, but its
        // status does not feed the aggregated result.
        let _ = execute_node(ctx, teardown, Some(&span_id), changeset, &cwd).await;
    }

    let time_end = Utc::now();
    ctx.spanner
        .send(
            &format!("step:{}", node.name()),
            parent_span_id,
            &span_id,
            time_start,
            time_end,
            aggregated.otel_status(),
        )
        .await;

    aggregated
}
