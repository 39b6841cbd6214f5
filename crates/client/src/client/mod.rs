//! Main Splunk REST API client and API methods.
//!
//! This module provides the primary [`SplunkClient`] for interacting with the
//! Splunk Enterprise REST API. It automatically handles authentication and
//! session management.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `session`: Session key management helpers (private module)
//! - [`search`]: Saved search dispatch, job polling and results
//! - `saved_searches`: Saved search metadata
//! - `server`: Server info
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Low-level session key storage (delegated to [`crate::auth::SessionManager`])
//! - Authentication strategy configuration (handled by [`builder::SplunkClientBuilder`])
//!
//! # Invariants
//! - All API methods handle 401/403 authentication errors by clearing the session,
//!   logging in again and repeating the call once (session auth only; API tokens
//!   surface the error unchanged)
//! - The client is shared behind `&self`; the session lives in an async `RwLock`
//!   so concurrent tool calls reuse one login

pub mod builder;
mod saved_searches;
pub mod search;
mod server;
mod session;

use tokio::sync::RwLock;

use crate::auth::SessionManager;

/// Wrap an async API call with automatic session renewal on 401/403 errors.
///
/// When a 401 or 403 error is received and the client is using session-based
/// auth, the session is cleared, a fresh login is performed and the call is
/// repeated once with the new `Authorization` header.
///
/// # Usage
///
/// ```ignore
/// retry_call!(self, __auth, endpoints::some_endpoint(&self.http, &self.base_url, &__auth, arg).await)
/// ```
///
/// The identifier `__auth` is bound to the current `Authorization` header value.
#[macro_export]
macro_rules! retry_call {
    ($self:expr, $token:ident, $call:expr) => {{
        let $token = $self.get_auth_header().await?;
        let result = $call;

        match result {
            Err(e)
                if matches!(
                    e,
                    $crate::error::ClientError::ApiError {
                        status: 401 | 403,
                        ..
                    }
                ) =>
            {
                if $self.is_api_token_auth().await {
                    Err(e)
                } else {
                    ::tracing::debug!("Session rejected ({}), clearing and re-authenticating...", e);
                    $self.clear_session().await;
                    let $token = $self.get_auth_header().await?;
                    $call
                }
            }
            other => other,
        }
    }};
}

/// Splunk REST API client.
///
/// # Creating a Client
///
/// Use [`SplunkClient::builder()`] to create a new client:
///
/// ```rust,ignore
/// use splunk_client::{SplunkClient, AuthStrategy};
/// use secrecy::SecretString;
///
/// let client = SplunkClient::builder()
///     .base_url("https://localhost:8089".to_string())
///     .auth_strategy(AuthStrategy::ApiToken {
///         token: SecretString::new("my-token".to_string().into()),
///     })
///     .build()?;
/// ```
///
/// # Authentication
///
/// - `AuthStrategy::SessionToken`: username/password with automatic session management
/// - `AuthStrategy::ApiToken`: static API token (no session management needed)
#[derive(Debug)]
pub struct SplunkClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) session_manager: RwLock<SessionManager>,
    pub(crate) max_retries: usize,
    pub(crate) session_ttl_seconds: u64,
    pub(crate) session_expiry_buffer_seconds: u64,
}

impl SplunkClient {
    /// Create a new client builder.
    pub fn builder() -> builder::SplunkClientBuilder {
        builder::SplunkClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Maximum retries applied to transient HTTP failures.
    pub fn max_retries(&self) -> usize {
        self.max_retries
    }
}
