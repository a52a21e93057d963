#![allow(dead_code)]

use serde_json::{json, Value};

pub fn observation_json(id: i64, obs_type: &str, content: &str) -> Value {
    json!({
        "id": id,
        "type": obs_type,
        "content": content,
        "concepts": ["testing"],
        "files": ["src/lib.rs"],
        "created_at": "2025-03-01T12:00:00Z",
        "session_id": "sess_1",
        "prompt_number": 1
    })
}

/// Base URL of a port nothing listens on
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
