//! Common types for diff parsing

use serde::Serialize;

/// Side of the diff a pin appeared on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    /// Line prefixed with a single `-`
    Removed,
    /// Line prefixed with a single `+`
    Added,
}

impl ChangeType {
    /// Classify a raw diff line.
    ///
    /// `---` and `+++` file headers are not changes.
    pub fn from_line(line: &str) -> Option<Self> {
        if line.starts_with('-') && !line.starts_with("---") {
            Some(ChangeType::Removed)
        } else if line.starts_with('+') && !line.starts_with("+++") {
            Some(ChangeType::Added)
        } else {
            None
        }
    }
}

/// A pin observed on one side of the diff, keyed by canonical package name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageVersionEvent {
    pub change_type: ChangeType,
    pub package: String,
    pub version: String,
}

/// Version change of a single package within one project
///
/// Ordered by package, then `from_version`, then `to_version`; a missing
/// version sorts before any present one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PackageChange {
    pub package: String,
    /// `None` when the package was newly added
    pub from_version: Option<String>,
    /// `None` when the package was removed
    pub to_version: Option<String>,
}

impl PackageChange {
    pub fn new(package: &str, from_version: Option<&str>, to_version: Option<&str>) -> Self {
        Self {
            package: package.to_string(),
            from_version: from_version.map(str::to_string),
            to_version: to_version.map(str::to_string),
        }
    }
}

/// All package changes found in one project's diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectChange {
    pub project: String,
    pub changes: Vec<PackageChange>,
}
