//! One maintenance run: collect the changes of every project, then notify

use thiserror::Error;
use tracing::info;

use crate::config::ProjectConfig;
use crate::diff::parser::DiffParser;
use crate::diff::types::ProjectChange;
use crate::project::{DiffSource, DiffSourceError};
use crate::report::aggregator::aggregate;
use crate::report::error::DeliveryError;
use crate::report::formatter::{deliver, plan};
use crate::report::sink::{MessageId, NotificationSink};
use crate::version::error::LookupError;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("{project}: failed to read diff: {source}")]
    Diff {
        project: String,
        source: DiffSourceError,
    },

    #[error("{project}: failed to resolve package name: {source}")]
    Lookup {
        project: String,
        source: LookupError,
    },

    #[error("Failed to deliver notification: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Parse the requirements diff of each project, in the given order.
///
/// The first project whose diff cannot be read or resolved aborts the run.
pub async fn collect_changes(
    projects: &[ProjectConfig],
    source: &dyn DiffSource,
    parser: &DiffParser,
) -> Result<Vec<ProjectChange>, RunError> {
    let mut project_changes = Vec::with_capacity(projects.len());

    for project in projects {
        let lines = source
            .diff(project)
            .await
            .map_err(|source| RunError::Diff {
                project: project.name.clone(),
                source,
            })?;

        let changes = parser
            .parse(&lines, &project.name)
            .await
            .map_err(|source| RunError::Lookup {
                project: project.name.clone(),
                source,
            })?;

        project_changes.push(ProjectChange {
            project: project.name.clone(),
            changes,
        });
    }

    Ok(project_changes)
}

/// Aggregate the changes of all projects and deliver the resulting posts
pub async fn publish(
    project_changes: &[ProjectChange],
    sink: &dyn NotificationSink,
) -> Result<Vec<MessageId>, RunError> {
    let units = aggregate(project_changes);
    info!(
        "{} noteworthy change(s) across {} project(s)",
        units.len(),
        project_changes.len()
    );

    Ok(deliver(&plan(&units), sink).await?)
}
