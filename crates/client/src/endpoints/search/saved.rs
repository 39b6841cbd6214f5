//! Saved search operations.
//!
//! # What this module handles:
//! - Dispatching a saved search by name within an owner/app namespace
//! - Listing saved searches in a namespace
//! - Getting a single saved search by name
//!
//! # What this module does NOT handle:
//! - Waiting for or reading the dispatched job (see [`super::jobs`])
//! - Creating or editing saved searches

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use tracing::debug;

use crate::endpoints::{Namespace, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::models::{SavedSearch, SavedSearchContent, SplunkResponse};

/// Dispatch a saved search, returning the new job's search ID.
pub async fn dispatch_saved_search(
    client: &Client,
    base_url: &str,
    auth_header: &str,
    namespace: Namespace<'_>,
    name: &str,
    max_retries: usize,
) -> Result<String> {
    debug!(
        saved_search = name,
        owner = namespace.owner,
        app = namespace.app,
        "Dispatching saved search"
    );

    let url = format!("{}/dispatch", namespace.saved_search_url(base_url, name));
    let builder = client
        .post(&url)
        .header(AUTHORIZATION, auth_header)
        .form(&[("output_mode", "json")]);

    let response = send_request_with_retry(builder, max_retries)
        .await
        .map_err(|e| not_found_as(e, name))?;

    let resp: serde_json::Value = response.json().await?;

    // Either `{ "sid": "<sid>" }` or `{ "entry": [ { "content": { "sid": "<sid>" } } ] }`
    let sid = resp
        .get("sid")
        .and_then(|v| v.as_str())
        .or_else(|| {
            resp.get("entry")?
                .get(0)?
                .get("content")?
                .get("sid")?
                .as_str()
        })
        .ok_or_else(|| ClientError::InvalidResponse("Missing sid in response".to_string()))?;

    debug!(saved_search = name, sid, "Saved search dispatched");
    Ok(sid.to_string())
}

/// List all saved searches visible in the namespace.
pub async fn list_saved_searches(
    client: &Client,
    base_url: &str,
    auth_header: &str,
    namespace: Namespace<'_>,
    max_retries: usize,
) -> Result<Vec<SavedSearch>> {
    debug!(owner = namespace.owner, app = namespace.app, "Listing saved searches");

    let builder = client
        .get(namespace.saved_searches_url(base_url))
        .header(AUTHORIZATION, auth_header)
        .query(&[("output_mode", "json"), ("count", "0")]);
    let response = send_request_with_retry(builder, max_retries).await?;

    let resp: SplunkResponse<SavedSearchContent> = response.json().await.map_err(|e| {
        ClientError::InvalidResponse(format!("Failed to parse saved searches response: {}", e))
    })?;

    Ok(resp.entry.into_iter().map(SavedSearch::from).collect())
}

/// Get a single saved search by name.
///
/// # Errors
///
/// Returns `ClientError::NotFound` if the saved search does not exist in the namespace.
pub async fn get_saved_search(
    client: &Client,
    base_url: &str,
    auth_header: &str,
    namespace: Namespace<'_>,
    name: &str,
    max_retries: usize,
) -> Result<SavedSearch> {
    debug!(saved_search = name, "Getting saved search");

    let builder = client
        .get(namespace.saved_search_url(base_url, name))
        .header(AUTHORIZATION, auth_header)
        .query(&[("output_mode", "json")]);
    let response = send_request_with_retry(builder, max_retries)
        .await
        .map_err(|e| not_found_as(e, name))?;

    let resp: SplunkResponse<SavedSearchContent> = response.json().await.map_err(|e| {
        ClientError::InvalidResponse(format!("Failed to parse saved search response: {}", e))
    })?;

    resp.entry
        .into_iter()
        .next()
        .map(SavedSearch::from)
        .ok_or_else(|| ClientError::NotFound(format!("saved search '{name}'")))
}

fn not_found_as(error: ClientError, name: &str) -> ClientError {
    match error {
        ClientError::ApiError {
            status: 404,
            message,
            ..
        } => ClientError::NotFound(format!("saved search '{name}' ({message})")),
        other => other,
    }
}
