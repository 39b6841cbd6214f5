//! Server information endpoints.

use reqwest::Client;
use reqwest::header::AUTHORIZATION;

use crate::endpoints::{extract_entry_content, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::models::ServerInfo;

/// Get server information.
pub async fn get_server_info(
    client: &Client,
    base_url: &str,
    auth_header: &str,
    max_retries: usize,
) -> Result<ServerInfo> {
    let url = format!("{}/services/server/info", base_url);

    let builder = client
        .get(&url)
        .header(AUTHORIZATION, auth_header)
        .query(&[("output_mode", "json")]);
    let response = send_request_with_retry(builder, max_retries).await?;

    let resp: serde_json::Value = response.json().await?;
    let content = extract_entry_content(&resp)?;

    serde_json::from_value(content.clone())
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse server info: {}", e)))
}
