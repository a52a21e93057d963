mod common;

use claudemem_client::{ClaudeMemClient, ContextParams};
use common::observation_json;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn project_params() -> ContextParams {
    ContextParams {
        project_path: Some("/work/app".to_string()),
        limit: Some(4),
    }
}

#[tokio::test]
async fn test_recent_context_primary_success_skips_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/context/recent"))
        .and(query_param("project_path", "/work/app"))
        .and(query_param("limit", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "observations": [observation_json(1, "feature", "recent work")]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/context/inject"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let context = ClaudeMemClient::new(server.uri())
        .recent_context(&project_params())
        .await;
    assert_eq!(context.len(), 1);
    assert_eq!(context[0].content.as_deref(), Some("recent work"));
}

#[tokio::test]
async fn test_recent_context_falls_back_once_on_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/context/recent"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/context/inject"))
        .and(query_param("project_path", "/work/app"))
        .and(query_param("limit", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            observation_json(2, "discovery", "from inject"),
            observation_json(3, "bugfix", "also inject")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let context = ClaudeMemClient::new(server.uri())
        .recent_context(&project_params())
        .await;
    assert_eq!(context.len(), 2);
    assert_eq!(context[0].content.as_deref(), Some("from inject"));
}

#[tokio::test]
async fn test_recent_context_both_fail_returns_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/context/recent"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/context/inject"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let context = ClaudeMemClient::new(server.uri())
        .recent_context(&project_params())
        .await;
    assert!(context.is_empty());
}

#[tokio::test]
async fn test_recent_context_bad_json_does_not_fall_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/context/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("oops"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/context/inject"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let context = ClaudeMemClient::new(server.uri())
        .recent_context(&project_params())
        .await;
    assert!(context.is_empty());
}

#[tokio::test]
async fn test_how_it_works_direct_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/how-it-works"))
        .and(query_param("query", "hook pipeline"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"observation": observation_json(9, "discovery", "hooks run in order")}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let results = ClaudeMemClient::new(server.uri())
        .how_it_works("hook pipeline")
        .await;
    assert_eq!(results.len(), 1);
    assert!(results[0].score.is_none());
}

#[tokio::test]
async fn test_how_it_works_falls_back_to_search_with_limit_ten() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/how-it-works"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("query", "hook pipeline"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"observation": observation_json(4, "decision", "pipeline is linear"), "score": 0.5}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = ClaudeMemClient::new(server.uri())
        .how_it_works("hook pipeline")
        .await;
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].observation.content.as_deref(),
        Some("pipeline is linear")
    );
}
