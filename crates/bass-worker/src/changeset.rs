//! Changeset resolution via `git diff-tree`: the worker computes the
//! union of changed paths across `changed-refs`.

use std::collections::BTreeSet;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use crate::error::WorkerResult;

/// Union the changed-file sets of `git diff-tree --no-commit-id --name-only
/// -r <ref>` across every entry in `refs`.
pub async fn resolve_changeset(workspace: &Path, refs: &[String]) -> WorkerResult<Vec<String>> {
    let mut changed = BTreeSet::new();

    for git_ref in refs {
        let output = Command::new("git")
            .args(["diff-tree", "--no-commit-id", "--name-only", "-r", git_ref])
            .current_dir(workspace)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            if !line.trim().is_empty() {
                changed.insert(line.trim().to_string());
            }
        }
    }

    Ok(changed.into_iter().collect())
}
