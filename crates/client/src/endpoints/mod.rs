//! REST API endpoint implementations.
//!
//! Free functions that each perform one Splunk REST call. They take the HTTP
//! client, base URL and a ready-made `Authorization` header value so they can
//! be exercised directly against a mock server without a [`crate::SplunkClient`].

mod auth;
mod namespace;
mod request;
pub mod search;
mod server;
pub mod url_encoding;

pub use auth::login;
pub use namespace::Namespace;
pub use request::send_request_with_retry;
pub use search::{
    cancel_job, dispatch_saved_search, get_job_status, get_results, get_saved_search,
    list_saved_searches, wait_for_job,
};
pub use server::get_server_info;
pub use url_encoding::encode_path_segment;

/// Extract `entry[0].content` from an Atom-style response.
pub(crate) fn extract_entry_content(
    resp: &serde_json::Value,
) -> crate::error::Result<&serde_json::Value> {
    resp.get("entry")
        .and_then(|e| e.get(0))
        .and_then(|e| e.get("content"))
        .ok_or_else(|| {
            crate::error::ClientError::InvalidResponse(
                "Missing entry[0].content in response".to_string(),
            )
        })
}
