//! Groups package changes across projects into notification units

use tracing::debug;

use crate::diff::types::{PackageChange, ProjectChange};
use crate::version::comparator::{Direction, assess};

/// One package change together with every project it occurred in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeGroup {
    pub change: PackageChange,
    /// Sorted project names
    pub projects: Vec<String>,
}

/// A change group that is worth notifying about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationUnit {
    pub package: String,
    /// `None` for pure additions and removals
    pub direction: Option<Direction>,
    /// "from ➪ to"
    pub message: String,
    pub projects: Vec<String>,
}

impl NotificationUnit {
    pub fn icon_emoji(&self) -> Option<&'static str> {
        self.direction.as_ref().map(Direction::icon_emoji)
    }
}

/// Collapse identical changes from different projects into groups.
///
/// Groups are ordered by their change; project names within a group are sorted.
pub fn group_changes(project_changes: &[ProjectChange]) -> Vec<ChangeGroup> {
    let mut pairs: Vec<(&PackageChange, &str)> = project_changes
        .iter()
        .flat_map(|pc| pc.changes.iter().map(|c| (c, pc.project.as_str())))
        .collect();

    pairs.sort();

    pairs
        .chunk_by(|a, b| a.0 == b.0)
        .map(|chunk| ChangeGroup {
            change: chunk[0].0.clone(),
            projects: chunk.iter().map(|(_, project)| project.to_string()).collect(),
        })
        .collect()
}

/// Build the notification units for all projects of a run.
///
/// Changes between two versions are only kept when they are noteworthy
/// (see [`assess`]); additions and removals are always kept. The result is
/// ordered by package, icon and message.
pub fn aggregate(project_changes: &[ProjectChange]) -> Vec<NotificationUnit> {
    let mut units: Vec<NotificationUnit> = group_changes(project_changes)
        .into_iter()
        .filter_map(to_unit)
        .collect();

    units.sort_by(|a, b| {
        (&a.package, a.icon_emoji(), &a.message).cmp(&(&b.package, b.icon_emoji(), &b.message))
    });

    units
}

fn to_unit(group: ChangeGroup) -> Option<NotificationUnit> {
    let ChangeGroup { change, projects } = group;

    let (direction, message) = match (&change.from_version, &change.to_version) {
        (Some(from), Some(to)) => {
            let assessment = assess(from, to);
            if !assessment.noteworthy {
                debug!("Suppressing {} {} -> {}", change.package, from, to);
                return None;
            }
            (Some(assessment.direction), format!("{} ➪ {}", from, to))
        }
        (None, Some(to)) => (None, format!("new ➪ {}", to)),
        (Some(from), None) => (None, format!("{} ➪ removed", from)),
        (None, None) => return None,
    };

    Some(NotificationUnit {
        package: change.package,
        direction,
        message,
        projects,
    })
}
