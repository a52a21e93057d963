//! Query tools exposed to the agent

use crate::base::{Tool, ToolOutput};
use crate::error::PluginError;
use crate::format::{context_digest, search_digest, timeline_digest};
use async_trait::async_trait;
use claudemem_client::{ClaudeMemClient, ContextParams, SearchParams, TimelineParams};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

fn parse_params<T: DeserializeOwned>(tool: &str, params: Value) -> Result<T, PluginError> {
    // Hosts send `null` when a tool is called without arguments
    let params = if params.is_null() { json!({}) } else { params };
    serde_json::from_value(params).map_err(|e| PluginError::invalid_params(tool, e.to_string()))
}

fn type_schema() -> Value {
    json!({
        "type": "string",
        "enum": ["decision", "bugfix", "feature", "refactor", "discovery", "change"],
        "description": "Only return observations of this type"
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchInput {
    query: String,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default, rename = "type")]
    obs_type: Option<String>,
    #[serde(default, alias = "max_date")]
    max_date: Option<String>,
}

/// Semantic search over stored observations
pub struct SearchTool {
    client: Arc<ClaudeMemClient>,
    default_limit: usize,
}

impl SearchTool {
    pub fn new(client: Arc<ClaudeMemClient>, default_limit: usize) -> Self {
        Self {
            client,
            default_limit,
        }
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        "search"
    }

    fn description(&self) -> &str {
        "Search claude-mem for past observations related to a query"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "What to look for"},
                "limit": {"type": "number", "description": "Maximum number of results"},
                "type": type_schema(),
                "maxDate": {"type": "string", "description": "Ignore observations newer than this date"}
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolOutput, PluginError> {
        let input: SearchInput = parse_params(self.name(), params)?;
        if input.query.trim().is_empty() {
            return Err(PluginError::invalid_params(
                self.name(),
                "query must not be empty",
            ));
        }

        let params = SearchParams {
            query: input.query.clone(),
            limit: Some(input.limit.unwrap_or(self.default_limit)),
            obs_type: input.obs_type.map(Into::into),
            max_date: input.max_date,
        };
        let results = self.client.search(&params).await;

        Ok(ToolOutput {
            text: search_digest(&input.query, &results),
            data: serde_json::to_value(&results)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineInput {
    #[serde(default, alias = "observation_id")]
    observation_id: Option<i64>,
    #[serde(default)]
    limit: Option<usize>,
}

/// Chronological observations, optionally centered on one id
pub struct TimelineTool {
    client: Arc<ClaudeMemClient>,
}

impl TimelineTool {
    pub fn new(client: Arc<ClaudeMemClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TimelineTool {
    fn name(&self) -> &str {
        "timeline"
    }

    fn description(&self) -> &str {
        "Show the chronological timeline of observations around an observation"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "observationId": {"type": "number", "description": "Observation to center the timeline on"},
                "limit": {"type": "number", "description": "Maximum number of observations"}
            }
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolOutput, PluginError> {
        let input: TimelineInput = parse_params(self.name(), params)?;
        let observations = self
            .client
            .timeline(&TimelineParams {
                observation_id: input.observation_id,
                limit: input.limit,
            })
            .await;

        Ok(ToolOutput {
            text: timeline_digest(&observations),
            data: serde_json::to_value(&observations)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContextInput {
    #[serde(default, alias = "project_path")]
    project_path: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
}

/// Recent observations for the current project
pub struct ContextTool {
    client: Arc<ClaudeMemClient>,
    default_limit: usize,
}

impl ContextTool {
    pub fn new(client: Arc<ClaudeMemClient>, default_limit: usize) -> Self {
        Self {
            client,
            default_limit,
        }
    }
}

#[async_trait]
impl Tool for ContextTool {
    fn name(&self) -> &str {
        "context"
    }

    fn description(&self) -> &str {
        "Load recent claude-mem context for a project"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "projectPath": {"type": "string", "description": "Project directory"},
                "limit": {"type": "number", "description": "Maximum number of observations"}
            }
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolOutput, PluginError> {
        let input: ContextInput = parse_params(self.name(), params)?;
        let observations = self
            .client
            .recent_context(&ContextParams {
                project_path: input.project_path,
                limit: Some(input.limit.unwrap_or(self.default_limit)),
            })
            .await;

        Ok(ToolOutput {
            text: context_digest(&observations),
            data: serde_json::to_value(&observations)?,
        })
    }
}
