//! Shared application state.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use bass_core::job::PipelineCatalog;
use bass_telemetry::SpanSender;

use crate::queue::JobQueue;

/// Shared, cloneable application state handed to every axum handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<PipelineCatalog>,
    pub queue: Arc<JobQueue>,
    pub worker_keys: Arc<HashSet<String>>,
    pub job_env: Arc<HashMap<String, String>>,
    pub traces_endpoint: String,
    pub logs_endpoint: String,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(
        catalog: PipelineCatalog,
        worker_keys: HashSet<String>,
        job_env: HashMap<String, String>,
        traces_endpoint: String,
        logs_endpoint: String,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            queue: Arc::new(JobQueue::new()),
            worker_keys: Arc::new(worker_keys),
            job_env: Arc::new(job_env),
            traces_endpoint,
            logs_endpoint,
            http_client: reqwest::Client::new(),
        }
    }

    /// A span sender bound to a single job's trace id, for one-off span
    /// emission (e.g. the `onSchedule` span at webhook time).
    pub fn spanner_for(&self, service_name: &str, trace_id: &str) -> SpanSender {
        SpanSender::new(
            self.http_client.clone(),
            self.traces_endpoint.clone(),
            service_name.to_string(),
            trace_id.to_string(),
        )
    }
}
