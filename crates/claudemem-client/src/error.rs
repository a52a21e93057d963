use thiserror::Error;

/// Internal failure of a single request. Never returned from the public
/// client API; it is logged and mapped to that operation's default.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid JSON from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid URL for {endpoint}: {source}")]
    Url {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
}

impl ClientError {
    pub fn is_status(&self) -> bool {
        matches!(self, ClientError::Status { .. })
    }
}
