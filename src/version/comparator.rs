//! Assessment of a version change: direction and whether it crosses a major boundary

use std::sync::LazyLock;

use regex::Regex;

/// Exactly three dot-separated runs of ASCII digits; leading zeros are allowed
static STRICT_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)$").unwrap());

/// A version string interpreted as a strict `MAJOR.MINOR.PATCH` triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrictVersion {
    Parsed { major: u64, minor: u64, patch: u64 },
    /// Anything else: two components, pre-releases, post-releases, local versions...
    Unparseable { raw: String },
}

impl StrictVersion {
    /// Parse a version, accepting only three numeric components.
    ///
    /// Examples:
    /// - "1.2.3" -> Parsed(1, 2, 3)
    /// - "2.6" -> Unparseable
    /// - "1.0.0rc1" -> Unparseable
    /// - "2021.01.05" -> Parsed(2021, 1, 5)
    pub fn parse(version: &str) -> Self {
        let parsed = STRICT_VERSION_RE.captures(version).and_then(|caps| {
            Some(StrictVersion::Parsed {
                major: caps[1].parse().ok()?,
                minor: caps[2].parse().ok()?,
                patch: caps[3].parse().ok()?,
            })
        });

        parsed.unwrap_or_else(|| StrictVersion::Unparseable {
            raw: version.to_string(),
        })
    }
}

/// Direction of a version change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Upgrade,
    Downgrade,
}

impl Direction {
    /// Slack emoji used as the avatar of the notification
    pub fn icon_emoji(&self) -> &'static str {
        match self {
            Direction::Upgrade => ":arrow_up:",
            Direction::Downgrade => ":arrow_down:",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub direction: Direction,
    /// Whether the change should be surfaced in the notification
    pub noteworthy: bool,
}

/// Assess a change from `from` to `to`.
///
/// The change is noteworthy when both versions are strict and their major
/// components differ, or when either version is not strict (its boundary
/// cannot be judged, so it is always shown).
///
/// The direction compares the raw strings, not the parsed versions: `"9"`
/// to `"10"` is reported as a downgrade.
pub fn assess(from: &str, to: &str) -> Assessment {
    let noteworthy = match (StrictVersion::parse(from), StrictVersion::parse(to)) {
        (
            StrictVersion::Parsed {
                major: from_major, ..
            },
            StrictVersion::Parsed { major: to_major, .. },
        ) => from_major != to_major,
        _ => true,
    };

    let direction = if from < to {
        Direction::Upgrade
    } else {
        Direction::Downgrade
    };

    Assessment {
        direction,
        noteworthy,
    }
}
