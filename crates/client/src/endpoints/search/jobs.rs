//! Search job operations.
//!
//! # What this module handles:
//! - Getting job status
//! - Waiting for job completion
//! - Retrieving search results
//! - Cancelling jobs
//!
//! # What this module does NOT handle:
//! - Dispatching jobs (see [`super::saved`])

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::endpoints::{encode_path_segment, extract_entry_content, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::models::{SearchJobResults, SearchJobStatus};

/// Get the status of a search job.
pub async fn get_job_status(
    client: &Client,
    base_url: &str,
    auth_header: &str,
    sid: &str,
    max_retries: usize,
) -> Result<SearchJobStatus> {
    debug!("Getting status for job: {}", sid);

    let url = format!(
        "{}/services/search/jobs/{}",
        base_url,
        encode_path_segment(sid)
    );
    let builder = client
        .get(&url)
        .header(AUTHORIZATION, auth_header)
        .query(&[("output_mode", "json")]);
    let response = send_request_with_retry(builder, max_retries).await?;

    let resp: serde_json::Value = response.json().await?;
    let content = extract_entry_content(&resp)?;

    let mut status: SearchJobStatus = serde_json::from_value(content.clone())
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse job status: {}", e)))?;
    if status.sid.is_empty() {
        status.sid = sid.to_string();
    }
    Ok(status)
}

/// Poll a search job until it completes.
///
/// # Errors
///
/// - `ClientError::JobFailed` if Splunk reports the job as failed
/// - `ClientError::OperationTimeout` if the job is not done within `max_wait`
pub async fn wait_for_job(
    client: &Client,
    base_url: &str,
    auth_header: &str,
    sid: &str,
    poll_interval: Duration,
    max_wait: Duration,
    max_retries: usize,
) -> Result<SearchJobStatus> {
    let start = Instant::now();

    loop {
        let status = get_job_status(client, base_url, auth_header, sid, max_retries).await?;

        if status.has_failed() {
            return Err(ClientError::JobFailed {
                sid: sid.to_string(),
                message: status.failure_message(),
            });
        }

        if status.is_done {
            debug!(
                sid,
                result_count = status.result_count,
                run_duration = status.run_duration,
                "Job completed"
            );
            return Ok(status);
        }

        if start.elapsed() + poll_interval > max_wait {
            return Err(ClientError::OperationTimeout {
                operation: "wait_for_job",
                timeout: max_wait,
            });
        }

        debug!(sid, progress = status.done_progress, "Job still running");
        tokio::time::sleep(poll_interval).await;
    }
}

/// Get one page of results from a completed search job.
///
/// `count == 0` asks for every row Splunk will return in one response, which
/// the server caps at `maxresultrows` (50,000 by default in `limits.conf`).
/// Larger result sets need further calls with `offset`.
pub async fn get_results(
    client: &Client,
    base_url: &str,
    auth_header: &str,
    sid: &str,
    count: u64,
    offset: u64,
    max_retries: usize,
) -> Result<SearchJobResults> {
    debug!("Getting results for job: {}", sid);

    let url = format!(
        "{}/services/search/jobs/{}/results",
        base_url,
        encode_path_segment(sid)
    );
    let query_params = [
        ("output_mode", "json".to_string()),
        ("count", count.to_string()),
        ("offset", offset.to_string()),
    ];

    let builder = client
        .get(&url)
        .header(AUTHORIZATION, auth_header)
        .query(&query_params);
    let response = send_request_with_retry(builder, max_retries).await?;

    // Jobs with no results may answer with an empty body
    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(SearchJobResults::default());
    }

    serde_json::from_str(&body).map_err(|e| {
        ClientError::InvalidResponse(format!("Failed to parse search results response: {}", e))
    })
}

/// Cancel a search job. Splunk stops the search and frees its slot.
pub async fn cancel_job(
    client: &Client,
    base_url: &str,
    auth_header: &str,
    sid: &str,
    max_retries: usize,
) -> Result<()> {
    debug!("Cancelling job: {}", sid);

    let url = format!(
        "{}/services/search/jobs/{}/control",
        base_url,
        encode_path_segment(sid)
    );
    let builder = client
        .post(&url)
        .header(AUTHORIZATION, auth_header)
        .form(&[("action", "cancel"), ("output_mode", "json")]);
    send_request_with_retry(builder, max_retries).await?;

    Ok(())
}
