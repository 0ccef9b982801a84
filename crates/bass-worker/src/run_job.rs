//! Drives a single dequeued job to completion: workspace prep, changeset
//! resolution, pipeline subprocess dispatch, root span emission, and
//! notification dispatch.

use std::io::Write;
use std::process::Stdio;

use bass_core::job::Job;
use bass_core::status::ExecStatus;
use bass_telemetry::{LogSender, Severity, SpanSender};
use chrono::Utc;
use tokio::process::Command;
use tracing::{error, info};

use crate::changeset::resolve_changeset;
use crate::error::WorkerResult;
use crate::workspace::{prepare_workspace, workspace_path};

pub async fn run_job(job: &Job, workspace_root: &std::path::Path, http_client: reqwest::Client) -> WorkerResult<ExecStatus> {
    let workspace = workspace_path(workspace_root, &job.name, &job.pipeline.repository);
    prepare_workspace(&workspace, &job.pipeline.repository, &job.pipeline.git_ref).await?;

    let exec_cwd = match &job.pipeline.cwd {
        Some(rel) => workspace.join(rel),
        None => workspace.clone(),
    };

    let changed = resolve_changeset(&workspace, &job.changed_refs).await?;

    let changeset_file = if !changed.is_empty() {
        let mut file = tempfile::NamedTempFile::new()?;
        for path in &changed {
            writeln!(file, "{path}")?;
        }
        Some(file)
    } else {
        None
    };

    let mut argv = job.pipeline.exec.clone();
    argv.push("--service-name".to_string());
    argv.push(job.otel.service_name.clone());
    argv.push("--trace-id".to_string());
    argv.push(job.otel.trace_id.clone());
    argv.push("--root-span-id".to_string());
    argv.push(job.otel.root_span_id.clone());
    argv.push("--traces-endpoint".to_string());
    argv.push(job.otel.traces_endpoint.clone());
    argv.push("--logs-endpoint".to_string());
    argv.push(job.otel.logs_endpoint.clone());
    if let Some(file) = &changeset_file {
        argv.push("--changeset".to_string());
        argv.push(file.path().to_string_lossy().into_owned());
    }

    info!(pipeline = %job.name, argv = ?argv, "dispatching pipeline executor");

    let time_start = Utc::now();

    let spanner = SpanSender::new(
        http_client.clone(),
        job.otel.traces_endpoint.clone(),
        job.otel.service_name.clone(),
        job.otel.trace_id.clone(),
    );
    let logger = LogSender::new(http_client, job.otel.logs_endpoint.clone(), job.otel.service_name.clone(), job.otel.trace_id.clone());

    let status = match Command::new(&argv[0])
        .args(&argv[1..])
        .current_dir(&exec_cwd)
        .envs(&job.env)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
    {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

            if !stdout.is_empty() {
                logger.send(&job.otel.root_span_id, Severity::Info, &stdout).await;
            }
            if !stderr.is_empty() {
                logger.send(&job.otel.root_span_id, Severity::Error, &stderr).await;
            }

            if output.status.success() {
                ExecStatus::Ok
            } else {
                ExecStatus::Error
            }
        }
        Err(e) => {
            error!(error = %e, "failed to spawn pipeline executor");
            ExecStatus::Error
        }
    };

    let time_end = Utc::now();

    spanner
        .send(
            &format!("Build: {} - {}", job.name, status),
            None,
            &job.otel.root_span_id,
            time_start,
            time_end,
            status.otel_status(),
        )
        .await;

    if let Some(notifications) = &job.pipeline.notifications {
        crate::notify::dispatch(notifications, status, &job.name, &job.otel.trace_id).await;
    }

    drop(changeset_file);

    Ok(status)
}
