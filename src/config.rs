use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// Defaults
// =============================================================================

/// Registry used to resolve canonical package names
pub const DEFAULT_PYPI_REGISTRY: &str = "https://pypi.org";

/// Slack Web API endpoint for posting messages
pub const DEFAULT_SLACK_API_URL: &str = "https://www.slack.com/api/chat.postMessage";

pub const DEFAULT_SLACK_CHANNEL: &str = "kamer-213-backend";

/// Delay after each successful post to stay under Slack's rate limit (250ms)
pub const DEFAULT_POST_DELAY_MS: u64 = 250;

pub const DEFAULT_REQUIREMENTS_FILE: &str = "requirements.txt";

/// Slack delivery settings
#[derive(Debug, Clone, PartialEq)]
pub struct SlackConfig {
    pub channel: String,
    pub api_url: String,
    pub token: Option<String>,
    /// Delay in milliseconds after every successful post
    pub post_delay_ms: u64,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_SLACK_CHANNEL.to_string(),
            api_url: DEFAULT_SLACK_API_URL.to_string(),
            token: None,
            post_delay_ms: DEFAULT_POST_DELAY_MS,
        }
    }
}

impl SlackConfig {
    /// Build the config from `SLACK_CHANNEL`, `SLACK_API_URL` and `SLACK_API_TOKEN`.
    pub fn from_env() -> Self {
        slack_config_with_env(
            std::env::var("SLACK_CHANNEL").ok(),
            std::env::var("SLACK_API_URL").ok(),
            std::env::var("SLACK_API_TOKEN").ok(),
        )
    }
}

fn slack_config_with_env(
    channel: Option<String>,
    api_url: Option<String>,
    token: Option<String>,
) -> SlackConfig {
    let defaults = SlackConfig::default();
    SlackConfig {
        channel: channel.unwrap_or(defaults.channel),
        api_url: api_url.unwrap_or(defaults.api_url),
        token: token.filter(|t| !t.is_empty()),
        post_delay_ms: defaults.post_delay_ms,
    }
}

/// A project taking part in the maintenance run
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProjectConfig {
    pub name: String,
    /// Working copy of the project
    pub path: PathBuf,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_requirements_file")]
    pub requirements_file: String,
}

fn default_enabled() -> bool {
    true
}

fn default_requirements_file() -> String {
    DEFAULT_REQUIREMENTS_FILE.to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid projects file {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load the list of projects from a JSON array file.
///
/// Fields other than the ones in [`ProjectConfig`] are ignored, so the
/// project list shared with the rest of the maintenance tooling can be used
/// as-is.
pub fn load_projects(path: &Path) -> Result<Vec<ProjectConfig>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns the path to the data directory for pin-report.
/// Uses $XDG_DATA_HOME/pin-report if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/pin-report,
/// or ./pin-report if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("pin-report.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("pin-report")
}
