//! `POST /webhook?pipeline=<name>&changed-refs=<csv>`

use std::collections::HashMap;

use axum::extract::{Query, State};
use bass_core::id::ResourceId;
use bass_core::job::{Job, JobPipeline, OtelConfig};
use bass_core::trace::{generate_span_id, generate_trace_id};
use chrono::Utc;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn handle_webhook(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<(), ApiError> {
    let pipeline_name = params
        .get("pipeline")
        .ok_or_else(|| ApiError::BadRequest("missing `pipeline` parameter".to_string()))?;

    let descriptor = state
        .catalog
        .get(pipeline_name)
        .ok_or_else(|| ApiError::NotFound(format!("no such pipeline: {pipeline_name}")))?;

    let changed_refs: Vec<String> = params
        .get("changed-refs")
        .map(|csv| csv.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let trace_id = generate_trace_id();
    let root_span_id = generate_span_id();
    let service_name = format!("bass:pipeline:{pipeline_name}");

    let spanner = state.spanner_for(&service_name, &trace_id);
    let now = Utc::now();
    spanner.send("onSchedule", None, &root_span_id, now, now, 1).await;

    let job = Job {
        id: ResourceId::new(),
        name: pipeline_name.clone(),
        schedule_time: now,
        env: (*state.job_env).clone(),
        pipeline: JobPipeline {
            repository: descriptor.repository.clone(),
            git_ref: descriptor.git_ref.clone(),
            worker_tags: descriptor.worker_tags.clone(),
            cwd: descriptor.cwd.clone(),
            notifications: descriptor.notifications.clone(),
            exec: descriptor.exec.clone(),
            name: pipeline_name.clone(),
        },
        changed_refs,
        otel: OtelConfig {
            traces_endpoint: state.traces_endpoint.clone(),
            logs_endpoint: state.logs_endpoint.clone(),
            service_name,
            trace_id,
            root_span_id,
        },
        inline_pipeline: None,
    };

    state.queue.enqueue(job);

    Ok(())
}
