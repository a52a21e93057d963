//! Plugin adapter exposing claude-mem to an agent host

pub mod base;
pub mod capture;
pub mod cli;
pub mod config;
mod error;
pub mod format;
pub mod plugin;
pub mod registry;
pub mod tools;

pub use base::{
    CliExtension, Plugin, PluginHost, PostResponseEvent, ResponseHook, Tool, ToolOutput,
};
pub use capture::CaptureHook;
pub use cli::{MemCli, MemCommand};
pub use config::PluginConfig;
pub use error::PluginError;
pub use plugin::ClaudeMemPlugin;
pub use registry::PluginRegistry;
pub use tools::{ContextTool, SearchTool, TimelineTool};
