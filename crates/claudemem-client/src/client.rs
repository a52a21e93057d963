use crate::error::ClientError;
use crate::listing::Listing;
use crate::types::{
    AddObservationResult, ContextParams, HealthStatus, MemoryStats, NewObservation, Observation,
    ObservationType, SearchParams, SearchResult, TimelineParams,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:37777";

const HEALTH_TIMEOUT: Duration = Duration::from_secs(3);
const STATS_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const DECISIONS_LIMIT: usize = 20;
const HOW_IT_WORKS_FALLBACK_LIMIT: usize = 10;

const HEALTH: &str = "/api/health";
const SEARCH: &str = "/api/search";
const SEARCH_BY_TYPE: &str = "/api/search/by-type";
const TIMELINE: &str = "/api/timeline";
const CONTEXT_RECENT: &str = "/api/context/recent";
const CONTEXT_INJECT: &str = "/api/context/inject";
const OBSERVATIONS: &str = "/api/sessions/observations";
const STATS: &str = "/api/stats";
const HOW_IT_WORKS: &str = "/api/how-it-works";

/// Query string builder that drops absent, empty and zero values
#[derive(Debug, Default, Clone, PartialEq)]
struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    fn new() -> Self {
        Self::default()
    }

    fn text(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.0.push((key, value.to_string()));
        }
        self
    }

    fn number<N>(mut self, key: &'static str, value: Option<N>) -> Self
    where
        N: Copy + Default + PartialEq + ToString,
    {
        if let Some(value) = value.filter(|v| *v != N::default()) {
            self.0.push((key, value.to_string()));
        }
        self
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// HTTP client for the claude-mem worker API.
///
/// Public methods never fail: transport errors, non-2xx statuses and bad JSON
/// are logged and turned into an empty list or a failure record.
#[derive(Debug, Clone)]
pub struct ClaudeMemClient {
    base_url: String,
    http: reqwest::Client,
}

impl Default for ClaudeMemClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClaudeMemClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };

        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health_check(&self) -> HealthStatus {
        match self.get_json(HEALTH, &QueryParams::new(), HEALTH_TIMEOUT).await {
            Ok(body) => HealthStatus {
                running: true,
                version: body
                    .get("version")
                    .and_then(Value::as_str)
                    .map(String::from),
                error: None,
            },
            Err(err) => {
                warn!(error = %err, "claude-mem health check failed");
                HealthStatus {
                    running: false,
                    version: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    pub async fn search(&self, params: &SearchParams) -> Vec<SearchResult> {
        let query = QueryParams::new()
            .text("query", Some(&params.query))
            .number("limit", params.limit)
            .text("type", params.obs_type.as_ref().map(ObservationType::as_str))
            .text("max_date", params.max_date.as_deref());

        let result = self.get_listing(SEARCH, &query, "results").await;
        or_empty("search", result)
    }

    pub async fn timeline(&self, params: &TimelineParams) -> Vec<Observation> {
        let query = QueryParams::new()
            .number("observation_id", params.observation_id)
            .number("limit", params.limit);

        let result = self.get_listing(TIMELINE, &query, "observations").await;
        or_empty("timeline", result)
    }

    /// Recent observations for a project. Falls back to the older
    /// `/api/context/inject` route once when the primary answers non-2xx.
    pub async fn recent_context(&self, params: &ContextParams) -> Vec<Observation> {
        let query = QueryParams::new()
            .text("project_path", params.project_path.as_deref())
            .number("limit", params.limit);

        let result = match self.get_listing(CONTEXT_RECENT, &query, "observations").await {
            Err(err) if err.is_status() => {
                debug!(error = %err, "falling back to {CONTEXT_INJECT}");
                self.get_listing(CONTEXT_INJECT, &query, "observations")
                    .await
            }
            other => other,
        };
        or_empty("recent context", result)
    }

    pub async fn add_observation(&self, observation: &NewObservation) -> AddObservationResult {
        let result = match self.endpoint_url(OBSERVATIONS, &QueryParams::new()) {
            Ok(url) => {
                debug!(%url, obs_type = %observation.obs_type, "POST");
                let request = self
                    .http
                    .post(url)
                    .timeout(REQUEST_TIMEOUT)
                    .json(observation);
                self.send(OBSERVATIONS, request).await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(body) => AddObservationResult {
                success: true,
                id: body.get("id").and_then(Value::as_i64),
                error: None,
            },
            Err(err) => {
                warn!(error = %err, "failed to add observation");
                AddObservationResult {
                    success: false,
                    id: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    /// Aggregate counts. An empty `MemoryStats` means the call failed.
    pub async fn stats(&self) -> MemoryStats {
        let result = self
            .get_json(STATS, &QueryParams::new(), STATS_TIMEOUT)
            .await
            .and_then(|body| {
                serde_json::from_value(body).map_err(|source| ClientError::Decode {
                    endpoint: STATS.to_string(),
                    source,
                })
            });

        match result {
            Ok(stats) => stats,
            Err(err) => {
                warn!(error = %err, "failed to fetch stats");
                MemoryStats::default()
            }
        }
    }

    /// Observations of one type; `None` means discovery.
    pub async fn search_by_type(
        &self,
        obs_type: Option<ObservationType>,
        limit: Option<usize>,
    ) -> Vec<Observation> {
        let obs_type = obs_type.unwrap_or(ObservationType::Discovery);
        let query = QueryParams::new()
            .text("type", Some(obs_type.as_str()))
            .number("limit", limit);

        let result = self
            .get_listing(SEARCH_BY_TYPE, &query, "observations")
            .await;
        or_empty("search by type", result)
    }

    pub async fn decisions(&self, limit: Option<usize>) -> Vec<Observation> {
        self.search_by_type(
            Some(ObservationType::Decision),
            Some(limit.unwrap_or(DECISIONS_LIMIT)),
        )
        .await
    }

    /// Explanatory results for a question. A non-2xx answer degrades to a
    /// plain search capped at 10 hits.
    pub async fn how_it_works(&self, query: &str) -> Vec<SearchResult> {
        let params = QueryParams::new().text("query", Some(query));

        match self.get_listing(HOW_IT_WORKS, &params, "results").await {
            Ok(results) => results,
            Err(err) if err.is_status() => {
                debug!(error = %err, "falling back to {SEARCH}");
                self.search(&SearchParams::new(query).limit(HOW_IT_WORKS_FALLBACK_LIMIT))
                    .await
            }
            Err(err) => {
                warn!(error = %err, "how-it-works lookup failed");
                Vec::new()
            }
        }
    }

    fn endpoint_url(&self, endpoint: &str, params: &QueryParams) -> Result<Url, ClientError> {
        let raw = format!("{}{}", self.base_url, endpoint);
        let parsed = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params.0.iter())
        };
        parsed.map_err(|source| ClientError::Url {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    async fn send(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Value, ClientError> {
        let request_error = |source: reqwest::Error| ClientError::Request {
            endpoint: endpoint.to_string(),
            source,
        };

        let response = request.send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(request_error)?;
        serde_json::from_str(&body).map_err(|source| ClientError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    async fn get_json(
        &self,
        endpoint: &str,
        params: &QueryParams,
        timeout: Duration,
    ) -> Result<Value, ClientError> {
        let url = self.endpoint_url(endpoint, params)?;
        debug!(%url, "GET");
        self.send(endpoint, self.http.get(url).timeout(timeout))
            .await
    }

    async fn get_listing<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &QueryParams,
        field: &str,
    ) -> Result<Vec<T>, ClientError> {
        let body = self.get_json(endpoint, params, REQUEST_TIMEOUT).await?;
        Ok(Listing::from_value(body, field).into_items())
    }
}

fn or_empty<T>(operation: &str, result: Result<Vec<T>, ClientError>) -> Vec<T> {
    result.unwrap_or_else(|err| {
        warn!(error = %err, "{operation} failed");
        Vec::new()
    })
}
