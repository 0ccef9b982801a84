//! Git workspace preparation: clone/update and checkout a pipeline's
//! repository into a per-(pipeline, repository) working tree.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::info;

use crate::error::{WorkerError, WorkerResult};

/// Escape a repository URL into a filesystem-safe directory component by
/// replacing `/` and `\` with `-`.
pub fn escape_repo_url(url: &str) -> String {
    url.chars()
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .collect()
}

/// Compute `<root>/pipeline/<pipeline-name>/<escaped-repo-url>`.
pub fn workspace_path(root: &Path, pipeline_name: &str, repository: &str) -> PathBuf {
    root.join("pipeline").join(pipeline_name).join(escape_repo_url(repository))
}

async fn run_git(cwd: &Path, args: &[&str]) -> WorkerResult<()> {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(WorkerError::Git(format!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        )));
    }

    Ok(())
}

/// Ensure `workspace` is a Git working tree checked out at `git_ref`:
/// clean+pull if it already exists, clone otherwise, then checkout.
pub async fn prepare_workspace(workspace: &Path, repository: &str, git_ref: &str) -> WorkerResult<()> {
    tokio::fs::create_dir_all(workspace).await?;

    if workspace.join(".git").is_dir() {
        info!(path = %workspace.display(), "updating existing workspace");
        run_git(workspace, &["clean", "-xdf"]).await?;
        run_git(workspace, &["pull"]).await?;
    } else {
        info!(path = %workspace.display(), repository, "cloning repository");
        run_git(
            workspace,
            &["clone", repository, "."],
        )
        .await?;
    }

    run_git(workspace, &["checkout", git_ref, "."]).await?;
    run_git(workspace, &["show-ref"]).await?;

    Ok(())
}
