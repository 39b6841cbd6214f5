//! Client-level session management helpers.
//!
//! This module contains methods on [`SplunkClient`] that interact with the
//! [`SessionManager`] to produce a usable `Authorization` header.
//!
//! # What this module does NOT handle:
//! - Low-level session key storage and expiry tracking (handled by [`SessionManager`] in `auth.rs`)
//! - Authentication strategy selection (handled during client construction in `builder.rs`)
//! - Direct HTTP authentication calls (handled by [`crate::endpoints::login`])
//!
//! # Invariants
//! - API token authentication never triggers a login; the token is used directly
//! - Session authentication refreshes keys that are missing or inside the expiry buffer
//! - Logins happen under the write lock and re-check state first, so concurrent
//!   callers that race on an expired session trigger a single login
//!
//! [`SessionManager`]: crate::auth::SessionManager

use secrecy::ExposeSecret;
use tracing::debug;

use crate::auth::{AuthStrategy, SessionManager};
use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::{ClientError, Result};

impl SplunkClient {
    /// Get the `Authorization` header value, logging in if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] if login fails.
    /// Returns [`ClientError::SessionExpired`] if no valid key is available after login.
    pub(crate) async fn get_auth_header(&self) -> Result<String> {
        {
            let session = self.session_manager.read().await;
            if !session.needs_login()
                && let Some(header) = session.authorization_header()
            {
                return Ok(header);
            }
        }

        let mut session = self.session_manager.write().await;
        // Another task may have logged in while we waited for the lock
        if session.needs_login() {
            self.login_locked(&mut session).await?;
        }

        session.authorization_header().ok_or_else(|| {
            let username = match session.strategy() {
                AuthStrategy::SessionToken { username, .. } => username.clone(),
                AuthStrategy::ApiToken { .. } => "api-token".to_string(),
            };
            ClientError::SessionExpired { username }
        })
    }

    /// Check if the client is using API token authentication.
    pub async fn is_api_token_auth(&self) -> bool {
        self.session_manager.read().await.is_api_token()
    }

    /// Drop the current session key so the next call logs in again.
    pub async fn clear_session(&self) {
        self.session_manager.write().await.clear_session();
    }

    /// Login with username/password and store the new session key.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] if the auth strategy is not session-based
    /// or Splunk rejects the credentials.
    pub async fn login(&self) -> Result<()> {
        let mut session = self.session_manager.write().await;
        self.login_locked(&mut session).await
    }

    async fn login_locked(&self, session: &mut SessionManager) -> Result<()> {
        let AuthStrategy::SessionToken { username, password } = session.strategy() else {
            return Err(ClientError::AuthFailed(
                "Cannot login with API token auth strategy".to_string(),
            ));
        };

        let key = endpoints::login(
            &self.http,
            &self.base_url,
            username,
            password.expose_secret(),
            self.max_retries,
        )
        .await?;
        debug!("Obtained new session key");

        session.set_session_token(
            key,
            Some(self.session_ttl_seconds),
            Some(self.session_expiry_buffer_seconds),
        );
        Ok(())
    }
}
