//! Turns the `git diff` of a pinned requirements file into package changes

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info};

use crate::diff::requirement::PinnedRequirement;
use crate::diff::types::{ChangeType, PackageChange, PackageVersionEvent};
use crate::version::error::LookupError;
use crate::version::registry::NameResolver;

/// Parser for diffs of pip-tools style requirements files
pub struct DiffParser {
    resolver: Arc<dyn NameResolver>,
}

impl DiffParser {
    pub fn new(resolver: Arc<dyn NameResolver>) -> Self {
        Self { resolver }
    }

    /// Parse one project's diff into the packages whose pinned version changed.
    ///
    /// Every distinct package key is resolved once per call; a failed lookup
    /// aborts the whole parse. The result is sorted by package name.
    pub async fn parse<S: AsRef<str>>(
        &self,
        lines: &[S],
        project: &str,
    ) -> Result<Vec<PackageChange>, LookupError> {
        let events = self.collect_events(lines).await?;

        let packages: BTreeSet<&str> = events.iter().map(|e| e.package.as_str()).collect();

        let changes: Vec<PackageChange> = packages
            .into_iter()
            .filter_map(|package| {
                let from_version = version_of(&events, package, ChangeType::Removed);
                let to_version = version_of(&events, package, ChangeType::Added);
                (from_version != to_version)
                    .then(|| PackageChange::new(package, from_version, to_version))
            })
            .collect();

        info!(
            "{}: {} package change(s) from {} pin event(s)",
            project,
            changes.len(),
            events.len()
        );

        Ok(changes)
    }

    async fn collect_events<S: AsRef<str>>(
        &self,
        lines: &[S],
    ) -> Result<HashSet<PackageVersionEvent>, LookupError> {
        let mut canonical_names: HashMap<String, String> = HashMap::new();
        let mut events = HashSet::new();

        for line in lines {
            let line = line.as_ref();

            let Some(change_type) = ChangeType::from_line(line) else {
                continue;
            };

            // The marker is a single ASCII byte
            let Some(pin) = PinnedRequirement::parse(&line[1..]) else {
                continue;
            };

            let package = match canonical_names.get(&pin.key) {
                Some(name) => name.clone(),
                None => {
                    let name = self.resolver.canonical_name(&pin.key).await?;
                    canonical_names.insert(pin.key.clone(), name.clone());
                    name
                }
            };

            debug!("{:?} {} {}", change_type, package, pin.version);

            events.insert(PackageVersionEvent {
                change_type,
                package,
                version: pin.version,
            });
        }

        Ok(events)
    }
}

/// Version pinned for `package` on the given side of the diff.
///
/// If one side pins several versions the smallest is taken, so repeated
/// runs agree.
fn version_of<'a>(
    events: &'a HashSet<PackageVersionEvent>,
    package: &str,
    change_type: ChangeType,
) -> Option<&'a str> {
    events
        .iter()
        .filter(|e| e.package == package && e.change_type == change_type)
        .map(|e| e.version.as_str())
        .min()
}
