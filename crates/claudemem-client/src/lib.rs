//! HTTP client for the claude-mem memory service

mod client;
mod error;
mod listing;
mod types;

pub use client::{ClaudeMemClient, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use listing::Listing;
pub use types::{
    AddObservationResult, ContextParams, HealthStatus, MemoryStats, NewObservation, Observation,
    ObservationType, SearchParams, SearchResult, SessionSummary, TimelineParams,
};
