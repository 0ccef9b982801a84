//! Configuration loading errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed env-file line {line_no} in {path}: {line:?}")]
    MalformedEnvLine {
        path: String,
        line_no: usize,
        line: String,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
