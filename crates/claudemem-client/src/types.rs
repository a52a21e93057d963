use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Observation category as tagged by claude-mem
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObservationType {
    Decision,
    Bugfix,
    Feature,
    Refactor,
    Discovery,
    Change,
    /// Tag the service returned that is not one of the known categories
    Other(String),
}

impl ObservationType {
    pub fn as_str(&self) -> &str {
        match self {
            ObservationType::Decision => "decision",
            ObservationType::Bugfix => "bugfix",
            ObservationType::Feature => "feature",
            ObservationType::Refactor => "refactor",
            ObservationType::Discovery => "discovery",
            ObservationType::Change => "change",
            ObservationType::Other(tag) => tag,
        }
    }

    pub fn known() -> [ObservationType; 6] {
        [
            ObservationType::Decision,
            ObservationType::Bugfix,
            ObservationType::Feature,
            ObservationType::Refactor,
            ObservationType::Discovery,
            ObservationType::Change,
        ]
    }
}

impl From<String> for ObservationType {
    fn from(tag: String) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "decision" => ObservationType::Decision,
            "bugfix" => ObservationType::Bugfix,
            "feature" => ObservationType::Feature,
            "refactor" => ObservationType::Refactor,
            "discovery" => ObservationType::Discovery,
            "change" => ObservationType::Change,
            _ => ObservationType::Other(tag),
        }
    }
}

impl From<&str> for ObservationType {
    fn from(tag: &str) -> Self {
        ObservationType::from(tag.to_string())
    }
}

impl From<ObservationType> for String {
    fn from(obs_type: ObservationType) -> Self {
        obs_type.as_str().to_string()
    }
}

impl fmt::Display for ObservationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single captured fact. Every field is optional; values are passed through
/// as the service returns them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub obs_type: Option<ObservationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub concepts: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub files: Vec<String>,
    #[serde(
        default,
        alias = "createdAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
    #[serde(
        default,
        alias = "sessionId",
        skip_serializing_if = "Option::is_none"
    )]
    pub session_id: Option<String>,
    #[serde(
        default,
        alias = "promptNumber",
        skip_serializing_if = "Option::is_none"
    )]
    pub prompt_number: Option<i64>,
}

/// Search hit: an observation plus optional ranking metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResult {
    pub observation: Observation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
}

// The service has shipped both a nested `{observation, score}` shape and a
// flat one where observation fields sit next to `score`. The presence of an
// `observation` key picks the shape; a bad nested item is an error, never a
// blank flat one.
#[derive(Deserialize)]
struct NestedWire {
    observation: Observation,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    highlights: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct FlatWire {
    #[serde(flatten)]
    observation: Observation,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    highlights: Option<Vec<String>>,
}

impl<'de> Deserialize<'de> for SearchResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let result = if value.get("observation").is_some() {
            serde_json::from_value::<NestedWire>(value).map(|w| SearchResult {
                observation: w.observation,
                score: w.score,
                highlights: w.highlights,
            })
        } else {
            serde_json::from_value::<FlatWire>(value).map(|w| SearchResult {
                observation: w.observation,
                score: w.score,
                highlights: w.highlights,
            })
        };
        result.map_err(de::Error::custom)
    }
}

/// Session-level rollup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investigated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learned: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<String>,
    #[serde(default, alias = "nextSteps", skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<String>,
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub running: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate counts reported by `/api/stats`. All-`None` means unavailable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_observations: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sessions: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl MemoryStats {
    pub fn is_empty(&self) -> bool {
        self.total_observations.is_none()
            && self.total_sessions.is_none()
            && self.last_updated.is_none()
    }
}

/// Request body for `POST /api/sessions/observations`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewObservation {
    #[serde(rename = "type")]
    pub obs_type: ObservationType,
    pub content: String,
    pub concepts: Vec<String>,
    pub files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl NewObservation {
    pub fn new(obs_type: ObservationType, content: impl Into<String>) -> Self {
        Self {
            obs_type,
            content: content.into(),
            concepts: Vec::new(),
            files: Vec::new(),
            session_id: None,
        }
    }

    pub fn with_concepts(mut self, concepts: Vec<String>) -> Self {
        self.concepts = concepts;
        self
    }

    pub fn with_files(mut self, files: Vec<String>) -> Self {
        self.files = files;
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        let session_id = session_id.into();
        if !session_id.is_empty() {
            self.session_id = Some(session_id);
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddObservationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    pub query: String,
    pub limit: Option<usize>,
    pub obs_type: Option<ObservationType>,
    pub max_date: Option<String>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn obs_type(mut self, obs_type: ObservationType) -> Self {
        self.obs_type = Some(obs_type);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineParams {
    pub observation_id: Option<i64>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextParams {
    pub project_path: Option<String>,
    pub limit: Option<usize>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
