use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use pin_report::config::{self, SlackConfig, load_projects};
use pin_report::diff::{DiffParser, ProjectChange};
use pin_report::logging;
use pin_report::project::GitDiffSource;
use pin_report::report::{ConsoleSink, NotificationSink, SlackSink};
use pin_report::run::{collect_changes, publish};
use pin_report::version::registries::PypiRegistry;

#[derive(Parser)]
#[command(name = "pin-report")]
#[command(version, about = "Reports pinned dependency upgrades across projects")]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write JSON logs to PATH (defaults to the data directory)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Diff every enabled project and post the noteworthy changes to Slack
    Report {
        /// JSON file listing the projects
        #[arg(long)]
        projects: PathBuf,

        /// Print the posts instead of sending them
        #[arg(long)]
        dry_run: bool,
    },
    /// Parse a saved requirements diff and print the package changes as JSON
    Parse {
        diff: PathBuf,

        #[arg(long, default_value = "local")]
        project: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.map(|path| path.unwrap_or_else(config::log_path));
    let _guard = logging::init(cli.verbose, log_file.as_deref())?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(execute(cli.command))
}

async fn execute(command: Command) -> anyhow::Result<()> {
    let parser = DiffParser::new(Arc::new(PypiRegistry::default()));

    match command {
        Command::Report { projects, dry_run } => {
            let (enabled, disabled): (Vec<_>, Vec<_>) = load_projects(&projects)?
                .into_iter()
                .partition(|p| p.enabled);
            for project in &disabled {
                info!("Skipping disabled project {}", project.name);
            }

            let changes = collect_changes(&enabled, &GitDiffSource, &parser).await?;

            let sink: Box<dyn NotificationSink> = if dry_run {
                Box::new(ConsoleSink::new())
            } else {
                let slack_config = SlackConfig::from_env();
                if slack_config.token.is_none() {
                    warn!("SLACK_API_TOKEN is not set");
                }
                Box::new(SlackSink::new(slack_config))
            };

            publish(&changes, sink.as_ref()).await?;
        }
        Command::Parse { diff, project } => {
            let content = std::fs::read_to_string(&diff)
                .with_context(|| format!("Failed to read {:?}", diff))?;
            let lines: Vec<&str> = content.lines().collect();

            let changes = parser.parse(&lines, &project).await?;

            println!(
                "{}",
                serde_json::to_string_pretty(&ProjectChange { project, changes })?
            );
        }
    }

    Ok(())
}
