//! Access to the requirements diff of a project's working copy

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use crate::config::ProjectConfig;

#[derive(Debug, Error)]
pub enum DiffSourceError {
    #[error("Failed to run git: {0}")]
    Io(#[from] std::io::Error),

    #[error("git diff exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },
}

/// Provides the diff of a project's pinned requirements file
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DiffSource: Send + Sync {
    /// Returns the diff output, one entry per line
    async fn diff(&self, project: &ProjectConfig) -> Result<Vec<String>, DiffSourceError>;
}

/// Runs `git diff <requirements file>` in the project's working copy
pub struct GitDiffSource;

#[async_trait]
impl DiffSource for GitDiffSource {
    async fn diff(&self, project: &ProjectConfig) -> Result<Vec<String>, DiffSourceError> {
        debug!("{}> git diff {}", project.name, project.requirements_file);

        let output = Command::new("git")
            .arg("diff")
            .arg(&project.requirements_file)
            .current_dir(&project.path)
            .output()
            .await?;

        if !output.status.success() {
            return Err(DiffSourceError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect())
    }
}
