//! Testing utilities for Splunk client tests.
//!
//! Fixture loading plus small helpers for mocking the Splunk endpoints a saved
//! search run touches. Available when running tests or when the `test-utils`
//! feature is enabled.
//!
//! # Example
//! ```ignore
//! use splunk_client::testing::load_fixture;
//!
//! let fixture = load_fixture("search/job_status_done.json");
//! ```

use std::path::Path;

/// Load a JSON fixture file from the fixtures directory.
///
/// # Arguments
/// * `fixture_path` - Relative path within the fixtures directory (e.g., "search/dispatch_success.json")
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir.join("fixtures").join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// Dispatch response carrying the given search ID.
pub fn dispatch_body(sid: &str) -> serde_json::Value {
    serde_json::json!({ "sid": sid })
}

/// Job status response for a finished job with `result_count` rows.
pub fn job_done_body(sid: &str, result_count: usize) -> serde_json::Value {
    serde_json::json!({
        "entry": [{
            "name": sid,
            "content": {
                "sid": sid,
                "isDone": true,
                "isFailed": false,
                "dispatchState": "DONE",
                "doneProgress": 1.0,
                "resultCount": result_count
            }
        }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_done_body_parses_as_status() {
        let body = job_done_body("1.1", 2);
        let content = body["entry"][0]["content"].clone();
        let status: crate::models::SearchJobStatus = serde_json::from_value(content).unwrap();
        assert!(status.is_done);
        assert_eq!(status.result_count, 2);
        assert_eq!(status.sid, "1.1");
    }
}
