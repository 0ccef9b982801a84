//! In-memory, mutex-protected FIFO job queue. Non-durable: state is lost
//! on restart, by design (no persistence requirement).

use std::collections::VecDeque;
use std::sync::Mutex;

use bass_core::job::Job;

/// A single mutex-protected FIFO. Dequeue scans from the head for the
/// first job whose `worker-tags` is a subset of the requesting worker's
/// tags, and removes just that entry.
pub struct JobQueue {
    jobs: Mutex<VecDeque<Job>>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(VecDeque::new()),
        }
    }

    pub fn enqueue(&self, job: Job) {
        self.jobs.lock().expect("queue mutex poisoned").push_back(job);
    }

    /// Returns the first job whose `pipeline.worker-tags` is a subset of
    /// `worker_tags`, removing it from the queue. Empty `worker-tags` on a
    /// job matches any worker.
    pub fn dequeue_matching(&self, worker_tags: &[String]) -> Option<Job> {
        let mut jobs = self.jobs.lock().expect("queue mutex poisoned");
        let position = jobs
            .iter()
            .position(|job| job.pipeline.worker_tags.iter().all(|tag| worker_tags.contains(tag)))?;
        jobs.remove(position)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.jobs.lock().expect("queue mutex poisoned").len()
    }
}

impl Default for JobQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bass_core::id::ResourceId;
    use bass_core::job::{JobPipeline, OtelConfig};
    use chrono::Utc;

    fn job(name: &str, worker_tags: Vec<String>) -> Job {
        Job {
            id: ResourceId::new(),
            name: name.to_string(),
            schedule_time: Utc::now(),
            env: Default::default(),
            pipeline: JobPipeline {
                repository: "git@example.com:demo.git".into(),
                git_ref: "main".into(),
                worker_tags,
                cwd: None,
                notifications: None,
                exec: vec!["./pipeline.sh".into()],
                name: name.to_string(),
            },
            changed_refs: vec![],
            otel: OtelConfig {
                traces_endpoint: "http://localhost:4318/v1/traces".into(),
                logs_endpoint: "http://localhost:4318/v1/logs".into(),
                service_name: format!("bass:pipeline:{name}"),
                trace_id: "a".repeat(32),
                root_span_id: "b".repeat(16),
            },
            inline_pipeline: None,
        }
    }

    #[test]
    fn fifo_order_is_preserved_among_matches() {
        let queue = JobQueue::new();
        queue.enqueue(job("first", vec![]));
        queue.enqueue(job("second", vec![]));

        let dequeued = queue.dequeue_matching(&[]).unwrap();
        assert_eq!(dequeued.name, "first");
    }

    #[test]
    fn empty_worker_tags_only_match_jobs_with_empty_tags() {
        let queue = JobQueue::new();
        queue.enqueue(job("needs-linux", vec!["linux".to_string()]));

        assert!(queue.dequeue_matching(&[]).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn job_tags_subset_of_worker_tags_matches() {
        let queue = JobQueue::new();
        queue.enqueue(job("needs-linux", vec!["linux".to_string()]));

        let dequeued = queue.dequeue_matching(&["linux".to_string(), "arm64".to_string()]).unwrap();
        assert_eq!(dequeued.name, "needs-linux");
    }

    #[test]
    fn dequeue_on_empty_queue_returns_none() {
        let queue = JobQueue::new();
        assert!(queue.dequeue_matching(&[]).is_none());
    }
}
