//! Request execution with retry for transient HTTP failures.
//!
//! Responsibilities:
//! - Send a request, retrying 429/502/503/504 with exponential backoff.
//! - Turn non-success responses into `ClientError::ApiError` with Splunk's messages.
//!
//! Does NOT handle:
//! - Authentication retries (see the `retry_call!` macro).
//!
//! Invariants:
//! - `max_retries == 0` means exactly one attempt.
//! - Transport errors (connect, TLS, timeout) are returned immediately.

use reqwest::{RequestBuilder, Response};
use std::time::Duration;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::models::SplunkMessages;

/// Header Splunk uses to correlate a request with its `splunkd.log` entries.
const REQUEST_ID_HEADER: &str = "X-Splunk-Request-Id";

/// Sends an HTTP request, retrying transient failures with exponential backoff.
///
/// Backoff is `2^attempt` seconds (1s, 2s, 4s, ...).
///
/// # Errors
///
/// - `ClientError::ApiError` for any non-success, non-retryable status
/// - `ClientError::MaxRetriesExceeded` when retries are exhausted
/// - `ClientError::HttpError` for transport failures
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None if attempt == 0 => {
                debug!("Request builder cannot be cloned, single attempt only");
                return into_api_result(builder.send().await?).await;
            }
            None => return Err(ClientError::MaxRetriesExceeded(attempt)),
        };

        let response = attempt_builder.send().await?;
        let status = response.status().as_u16();

        if !ClientError::is_retryable_status(status) {
            if attempt > 0 {
                debug!(attempt = attempt + 1, "Request completed after retry");
            }
            return into_api_result(response).await;
        }

        if attempt == max_retries {
            if max_retries == 0 {
                // No retries configured: surface the status itself
                return into_api_result(response).await;
            }
            debug!(attempts = attempt + 1, status, "Max retries exhausted");
            return Err(ClientError::MaxRetriesExceeded(max_retries + 1));
        }

        let backoff_secs = 2u64.pow(u32::try_from(attempt).unwrap_or(u32::MAX).min(6));
        debug!(
            attempt = attempt + 1,
            max_retries = max_retries + 1,
            backoff_secs,
            status,
            "Transient HTTP status, retrying with exponential backoff"
        );
        tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
    }

    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

/// Pass successful responses through; convert the rest into `ApiError`.
async fn into_api_result(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let url = response.url().to_string();
    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let message = match serde_json::from_str::<SplunkMessages>(&body) {
        Ok(m) if !m.messages.is_empty() => m.joined(),
        _ if body.trim().is_empty() => format!("HTTP {status}"),
        _ => body,
    };

    Err(ClientError::ApiError {
        status,
        url,
        message,
        request_id,
    })
}
