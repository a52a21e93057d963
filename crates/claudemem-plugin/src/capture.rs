//! Auto-capture of agent responses

use crate::base::{PostResponseEvent, ResponseHook};
use claudemem_client::{ClaudeMemClient, NewObservation, ObservationType};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Responses shorter than this are not worth remembering
pub const MIN_CAPTURE_CHARS: usize = 100;
pub const MAX_CAPTURE_CHARS: usize = 1000;

/// Records long agent responses as discovery observations.
///
/// Capture never reports failure to the caller: the request runs on a spawned
/// task and its outcome is only logged.
pub struct CaptureHook {
    client: Arc<ClaudeMemClient>,
    auto_capture: bool,
}

impl CaptureHook {
    pub fn new(client: Arc<ClaudeMemClient>, auto_capture: bool) -> Self {
        Self {
            client,
            auto_capture,
        }
    }

    /// The observation a response would be stored as, if it qualifies
    pub fn observation_for(&self, event: &PostResponseEvent) -> Option<NewObservation> {
        if !self.auto_capture {
            return None;
        }
        if event.response.chars().count() < MIN_CAPTURE_CHARS {
            return None;
        }

        let content: String = event.response.chars().take(MAX_CAPTURE_CHARS).collect();
        let observation = NewObservation::new(ObservationType::Discovery, content);
        Some(match event.session_id.as_deref() {
            Some(session_id) => observation.with_session(session_id),
            None => observation,
        })
    }
}

impl ResponseHook for CaptureHook {
    fn name(&self) -> &str {
        "auto-capture"
    }

    fn on_response(&self, event: &PostResponseEvent) -> Option<JoinHandle<()>> {
        let observation = self.observation_for(event)?;

        let runtime = match Handle::try_current() {
            Ok(handle) => handle,
            Err(err) => {
                warn!(error = %err, "no async runtime, skipping capture");
                return None;
            }
        };

        let client = Arc::clone(&self.client);
        Some(runtime.spawn(async move {
            let result = client.add_observation(&observation).await;
            if result.success {
                debug!(id = ?result.id, "captured agent response");
            } else {
                warn!(error = ?result.error, "auto-capture failed");
            }
        }))
    }
}
