use claudemem_plugin::MemCommand;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "claudemem")]
#[command(version)]
#[command(about = "Search and record memories in a running claude-mem service")]
pub struct Cli {
    /// Base URL of the claude-mem service (overrides the config file)
    #[arg(long, global = true, env = "CLAUDE_MEM_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Mem(MemCommand),

    /// Print the tool manifest as JSON
    Tools,

    /// Print version information
    Version,

    /// Hook: Capture the agent's response (stdin JSON)
    #[command(name = "hook:post-response")]
    HookPostResponse,
}
