//! Host capability interface and the base plugin trait

use crate::error::PluginError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// What a tool hands back to the host: a readable digest plus the raw data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolOutput {
    pub text: String,
    pub data: Value,
}

/// Payload of the host's post-response event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponseEvent {
    pub response: String,
    #[serde(default, alias = "session_id", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl PostResponseEvent {
    pub fn new(response: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            response: response.into(),
            session_id,
        }
    }
}

/// Agent-invocable tool
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema of the `execute` parameters
    fn input_schema(&self) -> Value;

    async fn execute(&self, params: Value) -> Result<ToolOutput, PluginError>;

    /// `{name, description, inputSchema}` as hosts list it
    fn descriptor(&self) -> Value {
        serde_json::json!({
            "name": self.name(),
            "description": self.description(),
            "inputSchema": self.input_schema(),
        })
    }
}

/// Listener for the post-response event.
///
/// Work is fire-and-forget; the handle is returned so short-lived hosts can
/// wait for it before exiting.
pub trait ResponseHook: Send + Sync {
    fn name(&self) -> &str;

    fn on_response(&self, event: &PostResponseEvent) -> Option<JoinHandle<()>>;
}

/// Command-line contribution, built on clap's builder API
#[async_trait]
pub trait CliExtension: Send + Sync {
    /// Name of the subcommand this extension adds under the host's root
    fn name(&self) -> &str;

    fn augment(&self, command: clap::Command) -> clap::Command;

    /// Run with the matches of this extension's own subcommand
    async fn run(&self, matches: &clap::ArgMatches) -> anyhow::Result<()>;
}

/// Registration surface a host runtime offers to plugins
pub trait PluginHost {
    fn register_tool(&mut self, tool: Arc<dyn Tool>);

    fn register_hook(&mut self, hook: Arc<dyn ResponseHook>);

    fn register_cli(&mut self, cli: Arc<dyn CliExtension>);
}

/// Base trait for host plugins
pub trait Plugin: Send + Sync {
    /// Plugin name (unique identifier)
    fn name(&self) -> &str;

    /// Plugin version
    fn version(&self) -> &str {
        "0.1.0"
    }

    /// Plugin description
    fn description(&self) -> &str {
        ""
    }

    fn is_enabled(&self) -> bool {
        true
    }

    /// Hand tools, hooks and CLI commands to the host
    fn register(&self, host: &mut dyn PluginHost);
}
