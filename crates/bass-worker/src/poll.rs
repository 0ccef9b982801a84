//! The poll loop: long-poll `/dequeue`, run whatever comes back, repeat.

use std::path::PathBuf;
use std::time::Duration;

use bass_core::job::Job;
use reqwest::StatusCode;
use tracing::{error, info, warn};

const POLL_INTERVAL: Duration = Duration::from_secs(1);

pub struct Worker {
    pub dequeue_endpoint: String,
    pub api_key: String,
    pub tags: Vec<String>,
    pub workspace_root: PathBuf,
    pub client: reqwest::Client,
}

impl Worker {
    /// Poll `/dequeue` once. Returns `Ok(Some(job))` on a match, `Ok(None)`
    /// on an empty queue (204), and `Err` on transport/auth failure.
    async fn check_for_job(&self) -> anyhow::Result<Option<Job>> {
        let response = self
            .client
            .post(&self.dequeue_endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&serde_json::json!({ "tags": self.tags }))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(Some(response.json::<Job>().await?)),
            StatusCode::NO_CONTENT => Ok(None),
            status => {
                warn!(%status, "dequeue returned an error status");
                Ok(None)
            }
        }
    }

    /// Run the poll loop forever: on any failure (dequeue failure, job
    /// execution failure), log and keep going. A worker never exits on
    /// its own.
    pub async fn run_forever(&self) -> ! {
        loop {
            match self.check_for_job().await {
                Ok(Some(job)) => {
                    info!(pipeline = %job.name, "dequeued job");
                    if let Err(e) = crate::run_job::run_job(&job, &self.workspace_root, self.client.clone()).await {
                        error!(error = %e, pipeline = %job.name, "job execution failed");
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    error!(error = %e, "poll failed");
                }
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
