//! Builder for [`SplunkClient`].
//!
//! Responsibilities:
//! - Collect connection settings, either one by one or from a loaded [`Config`].
//! - Build the shared `reqwest` client (timeout, redirects, TLS verification).
//!
//! Does NOT handle:
//! - Logging in; the first request does that lazily.
//!
//! Invariants:
//! - A built client always has a base URL without trailing slashes.
//! - Certificate verification can only be relaxed for `https://` URLs.

use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

use crate::auth::{AuthStrategy, SessionManager};
use crate::client::SplunkClient;
use crate::error::{ClientError, Result};
use splunk_config::{
    AuthStrategy as ConfigAuthStrategy, Config,
    constants::{
        DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES,
        DEFAULT_SESSION_TTL_SECS, DEFAULT_SKIP_VERIFY, DEFAULT_TIMEOUT_SECS,
    },
};

/// Fluent builder returned by [`SplunkClient::builder`].
///
/// `base_url` and `auth_strategy` are required; everything else falls back to
/// the `splunk_config::constants` defaults.
///
/// ```rust,ignore
/// let client = SplunkClient::builder()
///     .base_url("https://splunk.lab:8089".to_string())
///     .auth_strategy(AuthStrategy::ApiToken { token })
///     .max_retries(2)
///     .build()?;
/// ```
#[derive(Debug)]
pub struct SplunkClientBuilder {
    base_url: Option<String>,
    auth_strategy: Option<AuthStrategy>,
    skip_verify: bool,
    timeout: Duration,
    max_retries: usize,
    session_ttl_seconds: u64,
    session_expiry_buffer_seconds: u64,
}

impl Default for SplunkClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_strategy: None,
            skip_verify: DEFAULT_SKIP_VERIFY,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECS,
            session_expiry_buffer_seconds: DEFAULT_EXPIRY_BUFFER_SECS,
        }
    }
}

impl From<&ConfigAuthStrategy> for AuthStrategy {
    fn from(strategy: &ConfigAuthStrategy) -> Self {
        match strategy {
            ConfigAuthStrategy::SessionToken { username, password } => Self::SessionToken {
                username: username.clone(),
                password: password.clone(),
            },
            ConfigAuthStrategy::ApiToken { token } => Self::ApiToken {
                token: token.clone(),
            },
        }
    }
}

impl SplunkClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Management endpoint, e.g. `https://splunk.lab:8089`.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn auth_strategy(mut self, strategy: AuthStrategy) -> Self {
        self.auth_strategy = Some(strategy);
        self
    }

    /// Accept self-signed certificates. Ignored for plain HTTP.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Per-request HTTP timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Extra attempts for 429/502/503/504 responses and connect/timeout errors.
    /// `0` sends every request exactly once.
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Session key lifetime and the window before expiry in which it is renewed.
    pub fn session_lifetime(mut self, ttl_seconds: u64, expiry_buffer_seconds: u64) -> Self {
        self.session_ttl_seconds = ttl_seconds;
        self.session_expiry_buffer_seconds = expiry_buffer_seconds;
        self
    }

    /// Copy connection and credential settings from a loaded [`Config`].
    ///
    /// Search settings (app, owner, polling) stay with the caller; they are
    /// passed per run via `SavedSearchRequest`.
    pub fn from_config(self, config: &Config) -> Self {
        let connection = &config.connection;
        self.base_url(connection.base_url.clone())
            .auth_strategy(AuthStrategy::from(&config.auth.strategy))
            .skip_verify(connection.skip_verify)
            .timeout(connection.timeout)
            .max_retries(connection.max_retries)
            .session_lifetime(
                connection.session_ttl_seconds,
                connection.session_expiry_buffer_seconds,
            )
    }

    fn normalize_base_url(url: &str) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidUrl`] without a base URL
    /// - [`ClientError::AuthFailed`] without an auth strategy
    /// - [`ClientError::HttpError`] if the HTTP client cannot be constructed
    pub fn build(self) -> Result<SplunkClient> {
        let base_url = self
            .base_url
            .as_deref()
            .map(Self::normalize_base_url)
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;

        let auth_strategy = self
            .auth_strategy
            .ok_or_else(|| ClientError::AuthFailed("auth_strategy is required".to_string()))?;

        let accept_invalid_certs = self.skip_verify && base_url.starts_with("https://");
        if self.skip_verify && !accept_invalid_certs {
            debug!(base_url = %base_url, "skip_verify has no effect without TLS");
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(SplunkClient {
            http,
            base_url,
            session_manager: RwLock::new(SessionManager::new(auth_strategy)),
            max_retries: self.max_retries,
            session_ttl_seconds: self.session_ttl_seconds,
            session_expiry_buffer_seconds: self.session_expiry_buffer_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splunk_config::ConfigLoader;

    fn token_config() -> Config {
        ConfigLoader::new()
            .with_base_url("https://splunk.lab:8089/".to_string())
            .with_api_token("test-token".to_string())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_from_config_with_api_token() {
        let client = SplunkClient::builder()
            .from_config(&token_config())
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "https://splunk.lab:8089");
        assert!(client.is_api_token_auth().await);
    }

    #[tokio::test]
    async fn test_from_config_with_session_auth() {
        let config = ConfigLoader::new()
            .with_base_url("http://splunk.lab:8089".to_string())
            .with_username("svc_mcp".to_string())
            .with_password("test-password".to_string())
            .build()
            .unwrap();

        let client = SplunkClient::builder().from_config(&config).build().unwrap();

        assert_eq!(client.base_url(), "http://splunk.lab:8089");
        assert!(!client.is_api_token_auth().await);
    }

    #[test]
    fn test_from_config_copies_connection_settings() {
        let mut config = token_config();
        config.connection.skip_verify = false;
        config.connection.timeout = Duration::from_secs(120);
        config.connection.max_retries = 2;
        config.connection.session_ttl_seconds = 7200;
        config.connection.session_expiry_buffer_seconds = 120;

        let builder = SplunkClient::builder().from_config(&config);

        assert_eq!(builder.base_url.as_deref(), Some("https://splunk.lab:8089"));
        assert!(matches!(
            builder.auth_strategy,
            Some(AuthStrategy::ApiToken { .. })
        ));
        assert!(!builder.skip_verify);
        assert_eq!(builder.timeout, Duration::from_secs(120));
        assert_eq!(builder.max_retries, 2);
        assert_eq!(builder.session_ttl_seconds, 7200);
        assert_eq!(builder.session_expiry_buffer_seconds, 120);
    }

    #[test]
    fn test_defaults() {
        let builder = SplunkClientBuilder::new();
        assert_eq!(builder.max_retries, 0);
        assert!(builder.skip_verify);
        assert_eq!(builder.timeout, Duration::from_secs(30));
        assert_eq!(builder.session_ttl_seconds, 3600);
        assert_eq!(builder.session_expiry_buffer_seconds, 60);
    }

    #[test]
    fn test_normalize_base_url() {
        for (raw, expected) in [
            ("https://splunk.lab:8089/", "https://splunk.lab:8089"),
            ("https://splunk.lab:8089//", "https://splunk.lab:8089"),
            ("https://splunk.lab:8089", "https://splunk.lab:8089"),
        ] {
            assert_eq!(SplunkClientBuilder::normalize_base_url(raw), expected);
        }
    }
}
