//! Human-readable digests of client results

use chrono::{DateTime, NaiveDateTime};
use claudemem_client::{HealthStatus, MemoryStats, Observation, SearchResult};

pub const SEARCH_PREVIEW_CHARS: usize = 200;
pub const TIMELINE_PREVIEW_CHARS: usize = 150;
pub const CONTEXT_PREVIEW_CHARS: usize = 100;

/// Cut `text` to at most `max_chars` characters, marking the cut with "..."
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}

/// Render a service timestamp as `YYYY-MM-DD HH:MM`, or return it unchanged
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return ts.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

fn type_label(observation: &Observation) -> &str {
    observation
        .obs_type
        .as_ref()
        .map(|t| t.as_str())
        .unwrap_or("unknown")
}

fn preview(observation: &Observation, max_chars: usize) -> String {
    let content = observation.content.as_deref().unwrap_or("").trim();
    let single_line = content.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&single_line, max_chars)
}

fn push_tags(lines: &mut Vec<String>, observation: &Observation, indent: &str) {
    if !observation.concepts.is_empty() {
        lines.push(format!(
            "{indent}Concepts: {}",
            join_list(&observation.concepts)
        ));
    }
    if !observation.files.is_empty() {
        lines.push(format!("{indent}Files: {}", join_list(&observation.files)));
    }
}

pub fn search_digest(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("No results found for \"{query}\".");
    }

    let mut lines = vec![format!(
        "Found {} result(s) for \"{query}\":",
        results.len()
    )];
    for (idx, result) in results.iter().enumerate() {
        let obs = &result.observation;
        lines.push(String::new());
        lines.push(format!(
            "{}. [{}] {}",
            idx + 1,
            type_label(obs),
            preview(obs, SEARCH_PREVIEW_CHARS)
        ));
        if let Some(score) = result.score {
            lines.push(format!("   Score: {score:.2}"));
        }
        push_tags(&mut lines, obs, "   ");
    }
    lines.join("\n")
}

/// Chronological listing; used for timelines and other observation lists
pub fn observation_digest(title: &str, observations: &[Observation], max_chars: usize) -> String {
    let mut lines = vec![format!("{title} ({} observations):", observations.len())];
    lines.push(String::new());
    for obs in observations {
        let mut head = String::from("-");
        if let Some(id) = obs.id {
            head.push_str(&format!(" #{id}"));
        }
        if let Some(created) = obs.created_at.as_deref() {
            head.push_str(&format!(" {}", format_timestamp(created)));
        }
        lines.push(format!(
            "{head} [{}] {}",
            type_label(obs),
            preview(obs, max_chars)
        ));
        push_tags(&mut lines, obs, "  ");
    }
    lines.join("\n")
}

pub fn timeline_digest(observations: &[Observation]) -> String {
    if observations.is_empty() {
        return "No timeline entries found.".to_string();
    }
    observation_digest("Timeline", observations, TIMELINE_PREVIEW_CHARS)
}

pub fn context_digest(observations: &[Observation]) -> String {
    if observations.is_empty() {
        return "No recent context found.".to_string();
    }

    let mut lines = vec![format!(
        "Recent context ({} observations):",
        observations.len()
    )];
    lines.push(String::new());
    for obs in observations {
        lines.push(format!(
            "- [{}] {}",
            type_label(obs),
            preview(obs, CONTEXT_PREVIEW_CHARS)
        ));
        push_tags(&mut lines, obs, "  ");
    }
    lines.join("\n")
}

pub fn status_digest(base_url: &str, health: &HealthStatus) -> String {
    if health.running {
        let version = health.version.as_deref().unwrap_or("unknown");
        format!("claude-mem is running at {base_url} (version {version})")
    } else {
        let error = health.error.as_deref().unwrap_or("no response");
        format!("claude-mem is not reachable at {base_url}: {error}")
    }
}

pub fn stats_digest(stats: &MemoryStats) -> String {
    if stats.is_empty() {
        return "Statistics unavailable.".to_string();
    }

    let count = |value: Option<u64>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
    let mut lines = vec![
        "claude-mem statistics".to_string(),
        "=====================".to_string(),
        format!("Observations: {}", count(stats.total_observations)),
        format!("Sessions:     {}", count(stats.total_sessions)),
    ];
    if let Some(updated) = stats.last_updated.as_deref() {
        lines.push(format!("Last updated: {}", format_timestamp(updated)));
    }
    lines.join("\n")
}
