//! Saved search execution methods for [`SplunkClient`].
//!
//! # What this module handles:
//! - Dispatching a saved search and waiting for its job
//! - Retrieving job status and results, paging past the server's row cap
//! - Cancelling a job that outlives its wait bound
//!
//! # What this module does NOT handle:
//! - Low-level search endpoint HTTP calls (in [`crate::endpoints::search`])
//! - Deciding which saved searches may be run (the caller's allow-list)
//!
//! # Invariants
//! - Every run dispatches a fresh job; jobs are never reused between runs
//! - A job reported as failed is never read for results
//! - A job that times out is cancelled before the timeout is returned

use std::time::Duration;

use splunk_config::SearchConfig;
use splunk_config::constants::{
    DEFAULT_MAX_RESULTS, DEFAULT_MAX_WAIT_SECS, DEFAULT_POLL_INTERVAL_MS,
};
use tracing::{debug, warn};

use crate::client::SplunkClient;
use crate::endpoints::{self, Namespace};
use crate::error::{ClientError, Result};
use crate::models::{SearchJobResults, SearchJobStatus};

/// A request to run one saved search to completion.
///
/// # Invariants
/// - `poll_interval` and `max_wait` are client-side; a job still running after
///   `max_wait` is cancelled
/// - `max_results == 0` fetches the full result set, in as many pages as
///   Splunk's `maxresultrows` cap requires
#[derive(Debug, Clone, Copy)]
pub struct SavedSearchRequest<'a> {
    /// Name of the saved search.
    pub name: &'a str,
    /// Owner/app scope the saved search lives in.
    pub namespace: Namespace<'a>,
    /// Delay between job status polls.
    pub poll_interval: Duration,
    /// Maximum time to wait for the job to finish.
    pub max_wait: Duration,
    /// Rows to fetch from the finished job.
    pub max_results: u64,
}

impl<'a> SavedSearchRequest<'a> {
    /// Create a request with default polling behavior.
    pub fn new(name: &'a str, namespace: Namespace<'a>) -> Self {
        Self {
            name,
            namespace,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_wait: Duration::from_secs(DEFAULT_MAX_WAIT_SECS),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Create a request using the namespace and polling settings from configuration.
    pub fn from_search_config(name: &'a str, search: &'a SearchConfig) -> Self {
        Self {
            name,
            namespace: Namespace::new(&search.owner, &search.app),
            poll_interval: search.poll_interval,
            max_wait: search.max_wait,
            max_results: search.max_results,
        }
    }

    /// Set the delay between job status polls.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the maximum time to wait for the job.
    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Set the number of rows to fetch (`0` for all).
    pub fn max_results(mut self, max: u64) -> Self {
        self.max_results = max;
        self
    }
}

/// Outcome of a completed saved search run.
#[derive(Debug, Clone)]
pub struct SavedSearchRun {
    /// Search ID of the job this run dispatched.
    pub sid: String,
    /// Final job status.
    pub status: SearchJobStatus,
    /// Result rows in the order Splunk returned them.
    pub results: Vec<serde_json::Value>,
}

impl SplunkClient {
    /// Dispatch a saved search, wait for its job and fetch the results.
    ///
    /// # Errors
    ///
    /// - `ClientError::NotFound` if the saved search does not exist
    /// - `ClientError::JobFailed` if the job finishes in a failed state
    /// - `ClientError::OperationTimeout` if the job outlives `request.max_wait`;
    ///   the job is cancelled first
    pub async fn run_saved_search(&self, request: SavedSearchRequest<'_>) -> Result<SavedSearchRun> {
        let sid = self
            .dispatch_saved_search(request.namespace, request.name)
            .await?;

        let status = match self
            .wait_for_job(&sid, request.poll_interval, request.max_wait)
            .await
        {
            Ok(status) => status,
            Err(timeout @ ClientError::OperationTimeout { .. }) => {
                // Best effort; the timeout is what the caller sees
                match self.cancel_job(&sid).await {
                    Ok(()) => debug!(sid = %sid, "Cancelled timed-out job"),
                    Err(e) => warn!(sid = %sid, error = %e, "Failed to cancel timed-out job"),
                }
                return Err(timeout);
            }
            Err(e) => return Err(e),
        };

        let results = self
            .fetch_all_results(&sid, &status, request.max_results)
            .await?;

        debug!(
            saved_search = request.name,
            sid = %sid,
            rows = results.len(),
            "Saved search completed"
        );

        Ok(SavedSearchRun {
            sid,
            status,
            results,
        })
    }

    /// Read a finished job's rows, following `offset` until `resultCount`
    /// (or `max_results`, when non-zero) rows have arrived.
    async fn fetch_all_results(
        &self,
        sid: &str,
        status: &SearchJobStatus,
        max_results: u64,
    ) -> Result<Vec<serde_json::Value>> {
        let available = status.result_count as u64;
        let target = match max_results {
            0 => available,
            limit => limit.min(available),
        };

        let mut rows: Vec<serde_json::Value> = Vec::new();
        loop {
            let offset = rows.len() as u64;
            let count = if max_results == 0 {
                0
            } else {
                max_results.saturating_sub(offset)
            };

            let page = self.get_search_results(sid, count, offset).await?;
            if page.results.is_empty() {
                break;
            }
            rows.extend(page.results);

            if rows.len() as u64 >= target {
                break;
            }
            debug!(sid, fetched = rows.len(), target, "Fetching next result page");
        }

        Ok(rows)
    }

    /// Dispatch a saved search and return the new job's search ID.
    pub async fn dispatch_saved_search(
        &self,
        namespace: Namespace<'_>,
        name: &str,
    ) -> Result<String> {
        crate::retry_call!(
            self,
            __auth,
            endpoints::dispatch_saved_search(
                &self.http,
                &self.base_url,
                &__auth,
                namespace,
                name,
                self.max_retries,
            )
            .await
        )
    }

    /// Get the status of a search job.
    pub async fn get_job_status(&self, sid: &str) -> Result<SearchJobStatus> {
        crate::retry_call!(
            self,
            __auth,
            endpoints::get_job_status(&self.http, &self.base_url, &__auth, sid, self.max_retries)
                .await
        )
    }

    /// Poll a job until it is done, failed, or `max_wait` has elapsed.
    pub async fn wait_for_job(
        &self,
        sid: &str,
        poll_interval: Duration,
        max_wait: Duration,
    ) -> Result<SearchJobStatus> {
        crate::retry_call!(
            self,
            __auth,
            endpoints::wait_for_job(
                &self.http,
                &self.base_url,
                &__auth,
                sid,
                poll_interval,
                max_wait,
                self.max_retries,
            )
            .await
        )
    }

    /// Get results from a finished job.
    pub async fn get_search_results(
        &self,
        sid: &str,
        count: u64,
        offset: u64,
    ) -> Result<SearchJobResults> {
        crate::retry_call!(
            self,
            __auth,
            endpoints::get_results(
                &self.http,
                &self.base_url,
                &__auth,
                sid,
                count,
                offset,
                self.max_retries,
            )
            .await
        )
    }

    /// Cancel a search job.
    pub async fn cancel_job(&self, sid: &str) -> Result<()> {
        crate::retry_call!(
            self,
            __auth,
            endpoints::cancel_job(&self.http, &self.base_url, &__auth, sid, self.max_retries).await
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = SavedSearchRequest::new("mcp_get_network_topologies", Namespace::new("-", "search"));
        assert_eq!(request.poll_interval, Duration::from_millis(500));
        assert_eq!(request.max_wait, Duration::from_secs(300));
        assert_eq!(request.max_results, 0);
    }

    #[test]
    fn test_request_from_search_config() {
        let search = SearchConfig {
            app: "netops".to_string(),
            owner: "svc".to_string(),
            poll_interval: Duration::from_millis(50),
            max_wait: Duration::from_secs(5),
            max_results: 100,
        };
        let request = SavedSearchRequest::from_search_config("mcp_get_slow_network_nodes", &search);

        assert_eq!(request.namespace, Namespace::new("svc", "netops"));
        assert_eq!(request.poll_interval, Duration::from_millis(50));
        assert_eq!(request.max_wait, Duration::from_secs(5));
        assert_eq!(request.max_results, 100);
    }

    #[test]
    fn test_request_builders() {
        let request = SavedSearchRequest::new("x", Namespace::new("-", "search"))
            .poll_interval(Duration::from_millis(10))
            .max_wait(Duration::from_secs(1))
            .max_results(5);
        assert_eq!(request.poll_interval, Duration::from_millis(10));
        assert_eq!(request.max_wait, Duration::from_secs(1));
        assert_eq!(request.max_results, 5);
    }
}
