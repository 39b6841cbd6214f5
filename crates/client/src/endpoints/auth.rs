//! Authentication endpoints.

use reqwest::Client;
use tracing::debug;

use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};

/// Login to Splunk with username and password, returning the session key.
///
/// Bad credentials (HTTP 400/401) surface as `ClientError::AuthFailed`.
pub async fn login(
    client: &Client,
    base_url: &str,
    username: &str,
    password: &str,
    max_retries: usize,
) -> Result<String> {
    debug!("Logging in to Splunk as {}", username);

    let url = format!("{}/services/auth/login", base_url);
    let builder = client
        .post(&url)
        .form(&[("username", username), ("password", password)])
        .query(&[("output_mode", "json")]);

    let response = send_request_with_retry(builder, max_retries)
        .await
        .map_err(|e| match e {
            ClientError::ApiError {
                status: 400 | 401,
                message,
                ..
            } => ClientError::AuthFailed(message),
            other => other,
        })?;

    let resp: serde_json::Value = response.json().await?;

    // Splunk returns `{"sessionKey": ...}` for output_mode=json; older
    // versions wrap it in an Atom entry.
    resp.get("sessionKey")
        .or_else(|| resp.get("entry")?.get(0)?.get("content")?.get("sessionKey"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| ClientError::InvalidResponse("Missing sessionKey in response".to_string()))
}
