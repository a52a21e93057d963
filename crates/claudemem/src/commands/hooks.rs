use claudemem_plugin::{ClaudeMemPlugin, PluginConfig, PluginRegistry, PostResponseEvent};
use std::io::{self, Read};
use tracing::{debug, warn};

/// Feed one post-response event through the loaded plugins and wait for the
/// work they start. Returns how many captures were attempted.
pub async fn post_response(input: &str, config: PluginConfig) -> usize {
    let event: PostResponseEvent = match serde_json::from_str(input) {
        Ok(event) => event,
        Err(err) => {
            warn!(error = %err, "ignoring malformed post-response payload");
            return 0;
        }
    };

    let mut registry = PluginRegistry::new();
    registry.load(&ClaudeMemPlugin::new(config));

    let handles = registry.emit_post_response(&event);
    let started = handles.len();
    for handle in handles {
        if let Err(err) = handle.await {
            warn!(error = %err, "capture task did not finish");
        }
    }
    started
}

pub async fn hook_post_response(config: PluginConfig) -> anyhow::Result<()> {
    let mut input_str = String::new();
    io::stdin().read_to_string(&mut input_str)?;

    let started = post_response(&input_str, config).await;
    debug!(started, "post-response hook done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn capture_config(server: &MockServer) -> PluginConfig {
        PluginConfig {
            api_url: server.uri(),
            auto_capture: true,
            ..PluginConfig::default()
        }
    }

    #[tokio::test]
    async fn test_hook_records_long_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/sessions/observations"))
            .and(body_partial_json(json!({
                "type": "discovery",
                "session_id": "s-1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 9})))
            .expect(1)
            .mount(&server)
            .await;

        let input = json!({"response": "r".repeat(250), "sessionId": "s-1"}).to_string();
        assert_eq!(post_response(&input, capture_config(&server)).await, 1);
    }

    #[tokio::test]
    async fn test_hook_ignores_malformed_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        assert_eq!(post_response("not json", capture_config(&server)).await, 0);
        assert_eq!(post_response("", capture_config(&server)).await, 0);
    }

    #[tokio::test]
    async fn test_hook_respects_disabled_plugin() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = PluginConfig {
            enabled: false,
            ..capture_config(&server)
        };
        let input = json!({"response": "r".repeat(250)}).to_string();
        assert_eq!(post_response(&input, config).await, 0);
    }
}
