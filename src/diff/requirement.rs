//! Parsing of single requirements-file lines into exact pins (PEP 508)
//!
//! Lines are expected in the form produced by pip-tools:
//!
//! ```text
//! requests==2.26.0 \
//!     --hash=sha256:...
//! urllib3==1.26.7
//!     # via requests
//! ```
//!
//! Only exact `==` pins yield a version, kept as written. Comments, options, URL requirements
//! and ranges are skipped.

use std::str::FromStr;

use pep508_rs::{Requirement, VerbatimUrl, VersionOrUrl};
use tracing::debug;

/// An exact pin extracted from a requirements line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedRequirement {
    /// Package key as written in the file
    pub key: String,
    /// Pinned version without the `==` operator
    pub version: String,
}

impl PinnedRequirement {
    /// Parse a requirement line, returning `None` for anything that is not an exact pin
    pub fn parse(line: &str) -> Option<Self> {
        let requirement = strip_line_noise(line);
        if requirement.is_empty() {
            return None;
        }

        let req = Requirement::<VerbatimUrl>::from_str(requirement)
            .inspect_err(|e| debug!("Skipping line '{}': {}", requirement, e))
            .ok()?;

        let specifiers = match &req.version_or_url {
            Some(VersionOrUrl::VersionSpecifier(specs)) => specs.to_string(),
            Some(VersionOrUrl::Url(_)) | None => return None,
        };

        // The normalized form only confirms the pin; the reported version is the written one
        pinned_version(&specifiers)?;
        let version = written_version(requirement)?;

        Some(Self {
            key: written_key(requirement).to_string(),
            version: version.to_string(),
        })
    }
}

/// The package key exactly as spelled in the line, before extras, markers or specifiers
fn written_key(requirement: &str) -> &str {
    let end = requirement
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')))
        .unwrap_or(requirement.len());
    &requirement[..end]
}

/// The pinned version exactly as spelled after `==`, before markers or continuations
fn written_version(requirement: &str) -> Option<&str> {
    let (_, rest) = requirement.split_once("==")?;
    let rest = rest.trim_start();
    let end = rest
        .find(|c: char| c.is_whitespace() || matches!(c, ';' | '#' | '\\' | ','))
        .unwrap_or(rest.len());

    Some(&rest[..end]).filter(|v| !v.is_empty())
}

/// Drop inline comments and a trailing line continuation
fn strip_line_noise(line: &str) -> &str {
    let without_comment = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };

    without_comment.trim().trim_end_matches('\\').trim()
}

/// Extract the version from a single `==` specifier
fn pinned_version(specifiers: &str) -> Option<&str> {
    if specifiers.contains(',') || specifiers.starts_with("===") {
        return None;
    }

    specifiers
        .strip_prefix("==")
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
