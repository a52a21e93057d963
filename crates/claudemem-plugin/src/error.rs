use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("invalid parameters for tool '{tool}': {message}")]
    InvalidParams { tool: String, message: String },

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("failed to encode tool output: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PluginError {
    pub fn invalid_params(tool: &str, message: impl Into<String>) -> Self {
        PluginError::InvalidParams {
            tool: tool.to_string(),
            message: message.into(),
        }
    }
}
