//! Wire types for the orchestrator <-> worker dispatch protocol.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ResourceId;
use crate::node::RawNode;

/// OTel context carried from webhook through to the worker/executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OtelConfig {
    pub traces_endpoint: String,
    pub logs_endpoint: String,
    pub service_name: String,
    pub trace_id: String,
    pub root_span_id: String,
}

/// Email notification settings for a single event (`onSuccess`/`onFailure`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailNotification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub email: EmailNotification,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Notifications {
    #[serde(rename = "onSuccess", skip_serializing_if = "Option::is_none")]
    pub on_success: Option<NotificationEvent>,
    #[serde(rename = "onFailure", skip_serializing_if = "Option::is_none")]
    pub on_failure: Option<NotificationEvent>,
}

/// A catalog entry: what the orchestrator knows about a named pipeline
/// before any run has been scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PipelineDescriptor {
    pub repository: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub exec: Vec<String>,
    #[serde(default, rename = "worker-tags")]
    pub worker_tags: Vec<String>,
    pub cwd: Option<String>,
    pub notifications: Option<Notifications>,
}

/// `pipeline-name -> descriptor`, loaded once at orchestrator startup.
pub type PipelineCatalog = HashMap<String, PipelineDescriptor>;

/// The pipeline payload embedded in a `Job`: the catalog entry plus the
/// tree to execute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct JobPipeline {
    pub repository: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(rename = "worker-tags")]
    pub worker_tags: Vec<String>,
    pub cwd: Option<String>,
    pub notifications: Option<Notifications>,
    pub exec: Vec<String>,
    pub name: String,
}

/// A job as it lives in the orchestrator queue, and as dequeued by a worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Job {
    /// Orchestrator-internal identity, distinct from the OTel trace id:
    /// stable across requeue/dequeue, not exposed to telemetry.
    pub id: ResourceId,
    pub name: String,
    pub schedule_time: DateTime<Utc>,
    #[serde(default)]
    pub env: HashMap<String, String>,
    pub pipeline: JobPipeline,
    #[serde(default)]
    pub changed_refs: Vec<String>,
    pub otel: OtelConfig,
    /// Only relevant when a pipeline tree (rather than a bare `exec`
    /// catalog entry) is carried inline with the job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_pipeline: Option<RawNode>,
}
