//! The pipeline execution engine: validated tree walking, subprocess
//! dispatch, and span/log emission.
//!
//! This crate is usable standalone (no orchestrator or worker required):
//! call [`run`] with a validated [`bass_core::node::Node`] and an
//! [`ExecContext`] to execute a pipeline tree and get back its aggregated
//! [`bass_core::status::ExecStatus`].

pub mod engine;

pub use engine::{execute_node, ExecContext, UNORDERED_POOL_WIDTH};

use std::path::Path;

use bass_core::node::Node;
use bass_core::status::ExecStatus;

/// Run a pipeline tree's root node to completion.
///
/// `changeset` restricts which `if-changeset-matches` nodes execute; pass
/// an empty slice to run unconditionally. `root_cwd` is the starting
/// working directory that nested `cwd`s are resolved relative to.
pub async fn run(ctx: &ExecContext, root: &Node, changeset: &[String], root_cwd: &Path) -> ExecStatus {
    execute_node(ctx, root, None, changeset, root_cwd).await
}
