//! Authentication strategies and session management.
//!
//! Responsibilities:
//! - Hold the configured credentials and the current session key.
//! - Track session expiry so callers can refresh before a key goes stale.
//! - Render the `Authorization` header value for the active strategy.
//!
//! Does NOT handle:
//! - The login HTTP call itself (see `endpoints::login`).
//! - Locking; the client wraps the manager in an async `RwLock`.
//!
//! Invariants:
//! - Secrets are `SecretString`; `Debug` output never contains them.
//! - API tokens never expire from the manager's point of view.

use secrecy::{ExposeSecret, SecretString};
use splunk_config::constants::DEFAULT_EXPIRY_BUFFER_SECS;
use std::time::{Duration, Instant};

/// Strategy for authenticating with Splunk.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Username and password authentication.
    /// The client logs in and manages the resulting session key.
    SessionToken {
        username: String,
        password: SecretString,
    },
    /// API token (bearer token authentication).
    ApiToken { token: SecretString },
}

/// Manages Splunk session keys with expiry tracking.
#[derive(Debug)]
pub struct SessionManager {
    auth_strategy: AuthStrategy,
    session_token: Option<SessionToken>,
}

/// Session key with expiry information.
#[derive(Debug, Clone)]
struct SessionToken {
    value: SecretString,
    expires_at: Option<Instant>,
    expiry_buffer_seconds: u64,
}

impl SessionToken {
    fn new(
        value: SecretString,
        ttl_seconds: Option<u64>,
        expiry_buffer_seconds: Option<u64>,
    ) -> Self {
        Self {
            value,
            expires_at: ttl_seconds.map(|ttl| Instant::now() + Duration::from_secs(ttl)),
            expiry_buffer_seconds: expiry_buffer_seconds.unwrap_or(DEFAULT_EXPIRY_BUFFER_SECS),
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|exp| exp.saturating_duration_since(Instant::now()).is_zero())
    }

    /// True when the key expires within the buffer window.
    fn will_expire_soon(&self) -> bool {
        self.expires_at.is_some_and(|exp| {
            exp.saturating_duration_since(Instant::now())
                < Duration::from_secs(self.expiry_buffer_seconds)
        })
    }
}

impl SessionManager {
    /// Create a new session manager with the given auth strategy.
    pub fn new(strategy: AuthStrategy) -> Self {
        Self {
            auth_strategy: strategy,
            session_token: None,
        }
    }

    /// Get the current auth strategy.
    pub fn strategy(&self) -> &AuthStrategy {
        &self.auth_strategy
    }

    /// Check if we're using API token auth (no session management needed).
    pub fn is_api_token(&self) -> bool {
        matches!(self.auth_strategy, AuthStrategy::ApiToken { .. })
    }

    /// Get the raw credential for API requests.
    ///
    /// For API token auth, returns the token. For session auth, returns the
    /// session key if one has been obtained.
    pub fn get_bearer_token(&self) -> Option<&str> {
        match &self.auth_strategy {
            AuthStrategy::ApiToken { token } => Some(token.expose_secret()),
            AuthStrategy::SessionToken { .. } => {
                self.session_token.as_ref().map(|t| t.value.expose_secret())
            }
        }
    }

    /// Full `Authorization` header value for the active strategy.
    ///
    /// Session keys use the `Splunk` scheme, API tokens use `Bearer`.
    pub fn authorization_header(&self) -> Option<String> {
        let credential = self.get_bearer_token()?;
        Some(match self.auth_strategy {
            AuthStrategy::ApiToken { .. } => format!("Bearer {credential}"),
            AuthStrategy::SessionToken { .. } => format!("Splunk {credential}"),
        })
    }

    /// Store the session key received from a login response.
    ///
    /// * `ttl_seconds` - `None` means the key never expires locally
    /// * `expiry_buffer_seconds` - refresh window; `None` uses the default
    pub fn set_session_token(
        &mut self,
        token: String,
        ttl_seconds: Option<u64>,
        expiry_buffer_seconds: Option<u64>,
    ) {
        self.session_token = Some(SessionToken::new(
            SecretString::new(token.into()),
            ttl_seconds,
            expiry_buffer_seconds,
        ));
    }

    /// Returns false for API token auth, true if no session key exists.
    fn check_session<F>(&self, check: F) -> bool
    where
        F: FnOnce(&SessionToken) -> bool,
    {
        if self.is_api_token() {
            return false;
        }
        self.session_token.as_ref().is_none_or(check)
    }

    /// Check if the current session key is missing or expired.
    pub fn is_session_expired(&self) -> bool {
        self.check_session(SessionToken::is_expired)
    }

    /// Check if the current session key will expire within the buffer.
    pub fn session_expires_soon(&self) -> bool {
        self.check_session(SessionToken::will_expire_soon)
    }

    /// Whether a login is required before the next request.
    pub fn needs_login(&self) -> bool {
        self.is_session_expired() || self.session_expires_soon()
    }

    /// Clear the current session key (force re-authentication).
    pub fn clear_session(&mut self) {
        self.session_token = None;
    }
}
