//! In-process plugin host

use crate::base::{
    CliExtension, Plugin, PluginHost, PostResponseEvent, ResponseHook, Tool, ToolOutput,
};
use crate::error::PluginError;
use clap::{ArgMatches, Command};
use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Registry collecting what plugins register, and dispatching to it
pub struct PluginRegistry {
    plugins: Vec<String>,
    tools: Vec<Arc<dyn Tool>>,
    hooks: Vec<Arc<dyn ResponseHook>>,
    cli: Vec<Arc<dyn CliExtension>>,
}

impl PluginRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
            tools: Vec::new(),
            hooks: Vec::new(),
            cli: Vec::new(),
        }
    }

    /// Load a plugin. Disabled plugins are skipped; returns whether it loaded.
    pub fn load(&mut self, plugin: &dyn Plugin) -> bool {
        if !plugin.is_enabled() {
            return false;
        }
        plugin.register(self);
        self.plugins.push(plugin.name().to_string());
        true
    }

    pub fn plugin_names(&self) -> &[String] {
        &self.plugins
    }

    pub fn tool(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// `{name, description, inputSchema}` for every registered tool
    pub fn tool_manifest(&self) -> Vec<Value> {
        self.tools.iter().map(|t| t.descriptor()).collect()
    }

    pub async fn call_tool(&self, name: &str, params: Value) -> Result<ToolOutput, PluginError> {
        let tool = self
            .tool(name)
            .ok_or_else(|| PluginError::UnknownTool(name.to_string()))?;
        tool.execute(params).await
    }

    /// Notify every hook of an agent response; returns the tasks they spawned
    pub fn emit_post_response(&self, event: &PostResponseEvent) -> Vec<JoinHandle<()>> {
        self.hooks
            .iter()
            .filter_map(|h| h.on_response(event))
            .collect()
    }

    /// Add every registered CLI extension to `root`
    pub fn cli_command(&self, root: Command) -> Command {
        self.cli.iter().fold(root, |cmd, ext| ext.augment(cmd))
    }

    /// Dispatch matches produced by [`Self::cli_command`]
    pub async fn run_cli(&self, matches: &ArgMatches) -> anyhow::Result<()> {
        let Some((name, sub_matches)) = matches.subcommand() else {
            return Err(PluginError::UnknownCommand(String::new()).into());
        };
        let ext = self
            .cli
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| PluginError::UnknownCommand(name.to_string()))?;
        ext.run(sub_matches).await
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Get number of loaded plugins
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginHost for PluginRegistry {
    fn register_tool(&mut self, tool: Arc<dyn Tool>) {
        self.tools.push(tool);
    }

    fn register_hook(&mut self, hook: Arc<dyn ResponseHook>) {
        self.hooks.push(hook);
    }

    fn register_cli(&mut self, cli: Arc<dyn CliExtension>) {
        self.cli.push(cli);
    }
}
