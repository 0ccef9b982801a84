//! The worker: long-polls the orchestrator for jobs, prepares Git
//! workspaces, computes changesets, dispatches the pipeline executor, and
//! sends notifications.

pub mod changeset;
pub mod error;
pub mod notify;
pub mod poll;
pub mod run_job;
pub mod workspace;

pub use error::{WorkerError, WorkerResult};
pub use poll::Worker;
