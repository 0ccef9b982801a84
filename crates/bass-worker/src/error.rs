//! Worker error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("git command failed: {0}")]
    Git(String),
}

pub type WorkerResult<T> = std::result::Result<T, WorkerError>;
