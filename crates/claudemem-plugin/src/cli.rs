//! `claudemem` subcommands

use crate::base::CliExtension;
use crate::format::{
    context_digest, observation_digest, search_digest, stats_digest, status_digest,
    timeline_digest, TIMELINE_PREVIEW_CHARS,
};
use async_trait::async_trait;
use clap::{ArgMatches, Command, FromArgMatches, Subcommand};
use claudemem_client::{
    ClaudeMemClient, ContextParams, ObservationType, SearchParams, TimelineParams,
};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum MemCommand {
    /// Check whether the claude-mem service is reachable
    Status,

    /// Search stored observations
    Search {
        query: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,

        /// Only return observations of this type
        #[arg(short = 't', long = "type")]
        obs_type: Option<String>,
    },

    /// Show observation and session counts
    Stats,

    /// Show observations in chronological order
    Timeline {
        /// Observation to center on
        #[arg(long)]
        id: Option<i64>,

        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show recent context for a project
    Context {
        /// Project directory (defaults to the service's notion of current)
        #[arg(short, long)]
        project: Option<String>,

        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List recorded decisions
    Decisions {
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Ask how a part of the project works
    #[command(name = "how-it-works")]
    HowItWorks { query: String },
}

/// Run one command against the service and return what it prints
pub async fn render(client: &ClaudeMemClient, command: MemCommand, default_limit: usize) -> String {
    match command {
        MemCommand::Status => {
            let health = client.health_check().await;
            status_digest(client.base_url(), &health)
        }
        MemCommand::Search {
            query,
            limit,
            obs_type,
        } => {
            let params = SearchParams {
                query: query.clone(),
                limit: Some(limit.unwrap_or(default_limit)),
                obs_type: obs_type.map(ObservationType::from),
                max_date: None,
            };
            let results = client.search(&params).await;
            search_digest(&query, &results)
        }
        MemCommand::Stats => stats_digest(&client.stats().await),
        MemCommand::Timeline { id, limit } => {
            let observations = client
                .timeline(&TimelineParams {
                    observation_id: id,
                    limit,
                })
                .await;
            timeline_digest(&observations)
        }
        MemCommand::Context { project, limit } => {
            let observations = client
                .recent_context(&ContextParams {
                    project_path: project,
                    limit: Some(limit.unwrap_or(default_limit)),
                })
                .await;
            context_digest(&observations)
        }
        MemCommand::Decisions { limit } => {
            let decisions = client.decisions(limit).await;
            if decisions.is_empty() {
                "No decisions recorded.".to_string()
            } else {
                observation_digest("Decisions", &decisions, TIMELINE_PREVIEW_CHARS)
            }
        }
        MemCommand::HowItWorks { query } => {
            let results = client.how_it_works(&query).await;
            search_digest(&query, &results)
        }
    }
}

pub async fn run(
    client: &ClaudeMemClient,
    command: MemCommand,
    default_limit: usize,
) -> anyhow::Result<()> {
    println!("{}", render(client, command, default_limit).await);
    Ok(())
}

/// Mounts [`MemCommand`] under a `claudemem` subcommand of the host CLI
pub struct MemCli {
    client: Arc<ClaudeMemClient>,
    default_limit: usize,
}

impl MemCli {
    pub fn new(client: Arc<ClaudeMemClient>, default_limit: usize) -> Self {
        Self {
            client,
            default_limit,
        }
    }
}

#[async_trait]
impl CliExtension for MemCli {
    fn name(&self) -> &str {
        "claudemem"
    }

    fn augment(&self, command: Command) -> Command {
        let sub = Command::new("claudemem")
            .about("Query the claude-mem memory service")
            .subcommand_required(true);
        command.subcommand(MemCommand::augment_subcommands(sub))
    }

    async fn run(&self, matches: &ArgMatches) -> anyhow::Result<()> {
        let command = MemCommand::from_arg_matches(matches)?;
        run(&self.client, command, self.default_limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> MemCommand {
        let cli = MemCli::new(Arc::new(ClaudeMemClient::default()), 10);
        let root = cli.augment(Command::new("host"));
        let matches = root.try_get_matches_from(args).unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "claudemem");
        MemCommand::from_arg_matches(sub).unwrap()
    }

    #[test]
    fn test_parse_search_with_flags() {
        let command = parse(&["host", "claudemem", "search", "auth bug", "-l", "5", "-t", "bugfix"]);
        assert_eq!(
            command,
            MemCommand::Search {
                query: "auth bug".to_string(),
                limit: Some(5),
                obs_type: Some("bugfix".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_status_and_stats() {
        assert_eq!(parse(&["host", "claudemem", "status"]), MemCommand::Status);
        assert_eq!(parse(&["host", "claudemem", "stats"]), MemCommand::Stats);
    }

    #[test]
    fn test_parse_how_it_works() {
        assert_eq!(
            parse(&["host", "claudemem", "how-it-works", "hooks"]),
            MemCommand::HowItWorks {
                query: "hooks".to_string()
            }
        );
    }

    #[test]
    fn test_subcommand_required() {
        let cli = MemCli::new(Arc::new(ClaudeMemClient::default()), 10);
        let root = cli.augment(Command::new("host"));
        assert!(root.try_get_matches_from(["host", "claudemem"]).is_err());
    }

    #[tokio::test]
    async fn test_render_against_unreachable_service() {
        let client = ClaudeMemClient::new("http://127.0.0.1:9");

        let status = render(&client, MemCommand::Status, 10).await;
        assert!(status.starts_with("claude-mem is not reachable at http://127.0.0.1:9"));

        let stats = render(&client, MemCommand::Stats, 10).await;
        assert_eq!(stats, "Statistics unavailable.");

        let decisions = render(&client, MemCommand::Decisions { limit: None }, 10).await;
        assert_eq!(decisions, "No decisions recorded.");
    }
}
