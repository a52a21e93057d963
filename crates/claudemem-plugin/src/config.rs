//! Plugin configuration

use claudemem_client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const CONFIG_FILE_NAME: &str = "claudemem.json";
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Host-supplied settings (`apiUrl`, `enabled`, `maxResults`, `autoCapture`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginConfig {
    /// Base URL of the claude-mem worker
    pub api_url: String,

    /// Master switch; a disabled plugin registers nothing
    pub enabled: bool,

    /// Result limit tools use when the caller gives none
    pub max_results: usize,

    /// Record long agent responses as discovery observations
    pub auto_capture: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            enabled: true,
            max_results: DEFAULT_MAX_RESULTS,
            auto_capture: false,
        }
    }
}

impl PluginConfig {
    /// Build from the host's config object. Anything unreadable yields defaults.
    pub fn from_value(value: serde_json::Value) -> Self {
        match serde_json::from_value(value) {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "invalid plugin config, using defaults");
                Self::default()
            }
        }
    }

    /// Read `path`; a missing or malformed file yields defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not read config");
                return Self::default();
            }
        };

        match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(value) => Self::from_value(value),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "config is not valid JSON");
                Self::default()
            }
        }
    }

    /// Load `claudemem.json` from the given `.claude` directory
    pub fn load_from_dir(home_claude: &Path) -> Self {
        Self::load(&home_claude.join(CONFIG_FILE_NAME))
    }

    /// `~/.claude/claudemem.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".claude").join(CONFIG_FILE_NAME))
    }

    pub fn load_default() -> Self {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Self::default(),
        }
    }

    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_url = url;
        }
        self
    }

    /// Effective default limit; zero falls back to the built-in default
    pub fn result_limit(&self) -> usize {
        if self.max_results == 0 {
            DEFAULT_MAX_RESULTS
        } else {
            self.max_results
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_defaults() {
        let config = PluginConfig::default();
        assert_eq!(config.api_url, "http://localhost:37777");
        assert!(config.enabled);
        assert_eq!(config.max_results, 10);
        assert!(!config.auto_capture);
    }

    #[test]
    fn test_from_value_partial_object() {
        let config = PluginConfig::from_value(json!({
            "apiUrl": "http://127.0.0.1:4000",
            "autoCapture": true
        }));
        assert_eq!(config.api_url, "http://127.0.0.1:4000");
        assert!(config.auto_capture);
        assert!(config.enabled);
        assert_eq!(config.max_results, DEFAULT_MAX_RESULTS);
    }

    #[test]
    fn test_from_value_wrong_types_falls_back() {
        let config = PluginConfig::from_value(json!({"enabled": "yes"}));
        assert_eq!(config, PluginConfig::default());
    }

    #[test]
    fn test_load_from_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            serde_json::to_string_pretty(&json!({
                "enabled": false,
                "maxResults": 25
            }))
            .unwrap(),
        )
        .unwrap();

        let config = PluginConfig::load_from_dir(temp.path());
        assert!(!config.enabled);
        assert_eq!(config.max_results, 25);
    }

    #[test]
    fn test_load_missing_or_malformed_file_returns_default() {
        let temp = tempfile::TempDir::new().unwrap();
        assert_eq!(
            PluginConfig::load_from_dir(temp.path()),
            PluginConfig::default()
        );

        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "{not json").unwrap();
        assert_eq!(
            PluginConfig::load_from_dir(temp.path()),
            PluginConfig::default()
        );
    }

    #[test]
    fn test_api_url_override_and_result_limit() {
        let config = PluginConfig {
            max_results: 0,
            ..PluginConfig::default()
        }
        .with_api_url(Some("http://10.0.0.2:37777".to_string()))
        .with_api_url(Some("  ".to_string()))
        .with_api_url(None);

        assert_eq!(config.api_url, "http://10.0.0.2:37777");
        assert_eq!(config.result_limit(), DEFAULT_MAX_RESULTS);
    }

    #[test]
    fn test_default_path_under_claude_dir() {
        if let Some(path) = PluginConfig::default_path() {
            assert!(path.ends_with(".claude/claudemem.json"));
        }
    }
}
