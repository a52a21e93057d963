mod cli;
mod commands;

use claudemem_plugin::{ClaudeMemPlugin, PluginConfig};
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = PluginConfig::load_default().with_api_url(cli.api_url);

    match cli.command {
        Commands::Mem(command) => {
            let limit = config.result_limit();
            let plugin = ClaudeMemPlugin::new(config);
            claudemem_plugin::cli::run(plugin.client(), command, limit).await
        }
        Commands::Tools => commands::tools::run(config),
        Commands::Version => commands::version::run(),
        Commands::HookPostResponse => commands::hooks::hook_post_response(config).await,
    }
}
