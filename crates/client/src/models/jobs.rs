//! Search job models.
//!
//! # What this module handles:
//! - Search job status as reported by `GET /services/search/jobs/{sid}`
//! - Search job results
//!
//! # What this module does NOT handle:
//! - Polling or dispatch logic (see [`crate::endpoints::search`])

use serde::{Deserialize, Serialize};

/// Search job status (detailed).
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SearchJobStatus {
    #[serde(default)]
    pub sid: String,
    #[serde(
        default,
        rename = "isDone",
        deserialize_with = "crate::serde_helpers::bool_from_string_or_bool"
    )]
    pub is_done: bool,
    #[serde(
        default,
        rename = "isFailed",
        deserialize_with = "crate::serde_helpers::bool_from_string_or_bool"
    )]
    pub is_failed: bool,
    #[serde(default, rename = "dispatchState")]
    pub dispatch_state: Option<String>,
    #[serde(rename = "doneProgress", default)]
    pub done_progress: f64,
    #[serde(rename = "runDuration", default)]
    pub run_duration: f64,
    #[serde(
        rename = "resultCount",
        default,
        deserialize_with = "crate::serde_helpers::usize_from_string_or_number"
    )]
    pub result_count: usize,
    #[serde(
        rename = "eventCount",
        default,
        deserialize_with = "crate::serde_helpers::usize_from_string_or_number"
    )]
    pub event_count: usize,
    /// Raw job messages; Splunk emits either a list of `{type, text}` or a map of level to texts.
    #[serde(default)]
    pub messages: serde_json::Value,
}

impl SearchJobStatus {
    /// Whether Splunk reports the job as failed.
    pub fn has_failed(&self) -> bool {
        self.is_failed
            || self
                .dispatch_state
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case("FAILED"))
    }

    /// Human-readable failure reason assembled from the job messages.
    pub fn failure_message(&self) -> String {
        let texts = message_texts(&self.messages);
        if texts.is_empty() {
            format!(
                "dispatch state {}",
                self.dispatch_state.as_deref().unwrap_or("FAILED")
            )
        } else {
            texts.join("; ")
        }
    }
}

fn message_texts(messages: &serde_json::Value) -> Vec<String> {
    match messages {
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Object(obj) => {
                    let text = obj.get("text")?.as_str()?;
                    Some(match obj.get("type").and_then(|t| t.as_str()) {
                        Some(kind) => format!("{kind}: {text}"),
                        None => text.to_string(),
                    })
                }
                _ => None,
            })
            .collect(),
        serde_json::Value::Object(levels) => levels
            .iter()
            .flat_map(|(level, texts)| {
                let level = level.to_ascii_uppercase();
                message_texts(texts)
                    .into_iter()
                    .map(move |text| format!("{level}: {text}"))
            })
            .collect(),
        serde_json::Value::String(s) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Search job results.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SearchJobResults {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
    #[serde(default)]
    pub preview: bool,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_usize_from_string_or_number"
    )]
    pub offset: Option<usize>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_usize_from_string_or_number"
    )]
    pub total: Option<usize>,
}
