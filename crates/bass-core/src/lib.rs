//! Core domain types for the `bass` CI fabric.
//!
//! This crate contains:
//! - The pipeline node tree (`node`) and its validation (`validate`)
//! - Execution status and its OTel mapping (`status`)
//! - Trace/span id generation (`trace`)
//! - Changeset matching (`changeset`)
//! - The orchestrator<->worker wire types (`job`)
//! - The shared error type (`error`)

pub mod changeset;
pub mod error;
pub mod id;
pub mod job;
pub mod node;
pub mod status;
pub mod trace;
pub mod validate;
pub mod vars;

pub use error::{Error, Result};
pub use id::ResourceId;
pub use status::ExecStatus;
