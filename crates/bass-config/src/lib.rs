//! Configuration loaders for the `bass` CI fabric.
//!
//! This crate handles parsing of:
//! - The pipeline catalog JSON file
//! - `KEY=VALUE` env-files, with `$VAR` expansion
//! - The worker API-keys file

pub mod env_file;
pub mod error;
pub mod pipelines;
pub mod worker_keys;

pub use error::{ConfigError, ConfigResult};
