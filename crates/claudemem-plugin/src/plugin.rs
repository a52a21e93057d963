//! claude-mem plugin adapter

use crate::base::{Plugin, PluginHost};
use crate::capture::CaptureHook;
use crate::cli::MemCli;
use crate::config::PluginConfig;
use crate::tools::{ContextTool, SearchTool, TimelineTool};
use claudemem_client::ClaudeMemClient;
use std::sync::Arc;
use tracing::debug;

/// Binds a [`ClaudeMemClient`] to the host's tool, hook and CLI surfaces
pub struct ClaudeMemPlugin {
    config: PluginConfig,
    client: Arc<ClaudeMemClient>,
}

impl ClaudeMemPlugin {
    pub fn new(config: PluginConfig) -> Self {
        let client = Arc::new(ClaudeMemClient::new(config.api_url.as_str()));
        Self { config, client }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn client(&self) -> &Arc<ClaudeMemClient> {
        &self.client
    }
}

impl Plugin for ClaudeMemPlugin {
    fn name(&self) -> &str {
        "claude-mem"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &str {
        "Persistent memory search and auto-capture backed by claude-mem"
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    fn register(&self, host: &mut dyn PluginHost) {
        if !self.config.enabled {
            debug!("claude-mem plugin disabled, registering nothing");
            return;
        }

        let limit = self.config.result_limit();
        host.register_tool(Arc::new(SearchTool::new(self.client.clone(), limit)));
        host.register_tool(Arc::new(TimelineTool::new(self.client.clone())));
        host.register_tool(Arc::new(ContextTool::new(self.client.clone(), limit)));
        host.register_hook(Arc::new(CaptureHook::new(
            self.client.clone(),
            self.config.auto_capture,
        )));
        host.register_cli(Arc::new(MemCli::new(self.client.clone(), limit)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{CliExtension, ResponseHook, Tool};

    #[derive(Default)]
    struct RecordingHost {
        tools: Vec<String>,
        hooks: Vec<String>,
        cli: Vec<String>,
    }

    impl PluginHost for RecordingHost {
        fn register_tool(&mut self, tool: Arc<dyn Tool>) {
            self.tools.push(tool.name().to_string());
        }

        fn register_hook(&mut self, hook: Arc<dyn ResponseHook>) {
            self.hooks.push(hook.name().to_string());
        }

        fn register_cli(&mut self, cli: Arc<dyn CliExtension>) {
            self.cli.push(cli.name().to_string());
        }
    }

    #[test]
    fn test_enabled_plugin_registers_everything() {
        let plugin = ClaudeMemPlugin::new(PluginConfig::default());
        let mut host = RecordingHost::default();
        plugin.register(&mut host);

        assert_eq!(host.tools, vec!["search", "timeline", "context"]);
        assert_eq!(host.hooks, vec!["auto-capture"]);
        assert_eq!(host.cli, vec!["claudemem"]);
    }

    #[test]
    fn test_disabled_plugin_registers_nothing() {
        let plugin = ClaudeMemPlugin::new(PluginConfig {
            enabled: false,
            ..PluginConfig::default()
        });
        let mut host = RecordingHost::default();
        plugin.register(&mut host);

        assert!(!plugin.is_enabled());
        assert!(host.tools.is_empty());
        assert!(host.hooks.is_empty());
        assert!(host.cli.is_empty());
    }

    #[test]
    fn test_client_uses_configured_url() {
        let plugin = ClaudeMemPlugin::new(PluginConfig {
            api_url: "http://127.0.0.1:4010/".to_string(),
            ..PluginConfig::default()
        });
        assert_eq!(plugin.client().base_url(), "http://127.0.0.1:4010");
        assert_eq!(plugin.name(), "claude-mem");
        assert!(!plugin.description().is_empty());
    }
}
