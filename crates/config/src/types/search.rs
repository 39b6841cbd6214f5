//! Saved-search namespace and job polling settings.

use serde::Serialize;
use std::time::Duration;

use crate::constants::{
    DEFAULT_APP, DEFAULT_MAX_RESULTS, DEFAULT_MAX_WAIT_SECS, DEFAULT_OWNER,
    DEFAULT_POLL_INTERVAL_MS,
};

/// Where saved searches live and how long to wait for their jobs.
#[derive(Debug, Clone, Serialize)]
pub struct SearchConfig {
    /// Application namespace holding the saved searches.
    pub app: String,
    /// Owner namespace (`-` for any owner).
    pub owner: String,
    /// Delay between job status polls.
    #[serde(serialize_with = "serialize_millis")]
    pub poll_interval: Duration,
    /// Upper bound on how long a single job may run before the call fails.
    #[serde(with = "crate::types::connection::duration_seconds")]
    pub max_wait: Duration,
    /// Rows fetched per job; `0` means the full result set.
    ///
    /// Splunk returns at most `maxresultrows` rows per response (50,000 by
    /// default), so larger sets are read in several pages using `offset`.
    pub max_results: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            app: DEFAULT_APP.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_wait: Duration::from_secs(DEFAULT_MAX_WAIT_SECS),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let search = SearchConfig::default();
        assert_eq!(search.app, "mcp_demo");
        assert_eq!(search.owner, "-");
        assert_eq!(search.poll_interval, Duration::from_millis(500));
        assert_eq!(search.max_wait, Duration::from_secs(300));
        assert_eq!(search.max_results, 0);
    }

    #[test]
    fn test_serializes_poll_interval_as_millis() {
        let json = serde_json::to_value(SearchConfig::default()).unwrap();
        assert_eq!(json["poll_interval"], 500);
        assert_eq!(json["max_wait"], 300);
    }
}
