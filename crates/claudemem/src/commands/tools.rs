use claudemem_plugin::{ClaudeMemPlugin, PluginConfig, PluginRegistry};
use serde_json::Value;

pub fn manifest(config: PluginConfig) -> Vec<Value> {
    let mut registry = PluginRegistry::new();
    registry.load(&ClaudeMemPlugin::new(config));
    registry.tool_manifest()
}

pub fn run(config: PluginConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&manifest(config))?);
    Ok(())
}
