//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that merges `.env`, environment and explicit values.
//! - Assemble the management base URL from host, port and scheme when no full URL is given.
//! - Build and validate the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods called after `from_env()` override environment values.
//! - `SPLUNK_BASE_URL` wins over `SPLUNK_HOST`/`SPLUNK_PORT`/`SPLUNK_SCHEME`.
//! - An API token takes precedence over username/password.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

use secrecy::SecretString;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_APP, DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_MAX_RESULTS, DEFAULT_MAX_RETRIES,
    DEFAULT_MAX_WAIT_SECS, DEFAULT_OWNER, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SCHEME,
    DEFAULT_SESSION_TTL_SECS, DEFAULT_SKIP_VERIFY, DEFAULT_SPLUNK_PORT, DEFAULT_TIMEOUT_SECS,
    MAX_SESSION_TTL_SECS, MAX_TIMEOUT_SECS, MAX_WAIT_SECS_LIMIT,
};
use crate::types::{AuthConfig, AuthStrategy, Config, ConnectionConfig, SearchConfig};

/// Configuration loader that builds config from environment variables.
#[derive(Default)]
pub struct ConfigLoader {
    pub(super) base_url: Option<String>,
    pub(super) host: Option<String>,
    pub(super) port: Option<u16>,
    pub(super) scheme: Option<String>,
    pub(super) username: Option<String>,
    pub(super) password: Option<SecretString>,
    pub(super) api_token: Option<SecretString>,
    pub(super) skip_verify: Option<bool>,
    pub(super) timeout: Option<Duration>,
    pub(super) max_retries: Option<usize>,
    pub(super) session_expiry_buffer_seconds: Option<u64>,
    pub(super) session_ttl_seconds: Option<u64>,
    pub(super) app: Option<String>,
    pub(super) owner: Option<String>,
    pub(super) poll_interval_ms: Option<u64>,
    pub(super) max_wait_secs: Option<u64>,
    pub(super) max_results: Option<u64>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    ///
    /// # Errors
    ///
    /// - `ConfigError::DotenvParse` if the file exists but has invalid syntax
    /// - `ConfigError::DotenvIo` if the file exists but cannot be read
    ///
    /// Missing `.env` files are silently ignored. Error messages never include
    /// raw .env line contents.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the full base URL (overrides host/port/scheme).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the management host.
    pub fn with_host(mut self, host: String) -> Self {
        self.host = Some(host);
        self
    }

    /// Set the management port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the username.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Set the API token.
    pub fn with_api_token(mut self, token: String) -> Self {
        self.api_token = Some(SecretString::new(token.into()));
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the per-request HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of transient-failure retries.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set the application namespace holding the saved searches.
    pub fn with_app(mut self, app: String) -> Self {
        self.app = Some(app);
        self
    }

    /// Set the owner namespace.
    pub fn with_owner(mut self, owner: String) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the job status poll interval in milliseconds.
    pub fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval_ms = Some(ms);
        self
    }

    /// Set the job completion bound in seconds.
    pub fn with_max_wait_secs(mut self, secs: u64) -> Self {
        self.max_wait_secs = Some(secs);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = match (self.base_url.as_deref(), self.host.as_deref()) {
            (Some(url), _) => validate_and_normalize_base_url(url)?,
            (None, Some(host)) => {
                let scheme = self.scheme.as_deref().unwrap_or(DEFAULT_SCHEME);
                let port = self.port.unwrap_or(DEFAULT_SPLUNK_PORT);
                base_url_from_parts(scheme, host, port)?
            }
            (None, None) => return Err(ConfigError::MissingHost),
        };

        // API token takes precedence
        let strategy = if let Some(token) = self.api_token {
            AuthStrategy::ApiToken { token }
        } else if let (Some(username), Some(password)) = (self.username, self.password) {
            AuthStrategy::SessionToken { username, password }
        } else {
            return Err(ConfigError::MissingAuth);
        };

        let connection = ConnectionConfig {
            base_url,
            skip_verify: self.skip_verify.unwrap_or(DEFAULT_SKIP_VERIFY),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            session_expiry_buffer_seconds: self
                .session_expiry_buffer_seconds
                .unwrap_or(DEFAULT_EXPIRY_BUFFER_SECS),
            session_ttl_seconds: self.session_ttl_seconds.unwrap_or(DEFAULT_SESSION_TTL_SECS),
        };
        Self::validate_timeout_config(&connection)?;

        let search = SearchConfig {
            app: validate_namespace_segment(
                "SPLUNK_APP",
                self.app.unwrap_or_else(|| DEFAULT_APP.to_string()),
            )?,
            owner: validate_namespace_segment(
                "SPLUNK_OWNER",
                self.owner.unwrap_or_else(|| DEFAULT_OWNER.to_string()),
            )?,
            poll_interval: Duration::from_millis(
                self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS),
            ),
            max_wait: Duration::from_secs(self.max_wait_secs.unwrap_or(DEFAULT_MAX_WAIT_SECS)),
            max_results: self.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
        };
        Self::validate_polling_config(&search)?;

        Ok(Config {
            connection,
            auth: AuthConfig { strategy },
            search,
        })
    }

    /// Validates timeout-related configuration values.
    ///
    /// Checks:
    /// - timeout is greater than 0 and not exceeding MAX_TIMEOUT_SECS
    /// - session_ttl_seconds is greater than session_expiry_buffer_seconds
    /// - session_ttl_seconds does not exceed MAX_SESSION_TTL_SECS
    fn validate_timeout_config(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        if connection.session_ttl_seconds <= connection.session_expiry_buffer_seconds {
            return Err(ConfigError::InvalidSessionTtl {
                message: format!(
                    "session_ttl_seconds ({}) must be greater than session_expiry_buffer_seconds ({})",
                    connection.session_ttl_seconds, connection.session_expiry_buffer_seconds
                ),
            });
        }

        if connection.session_ttl_seconds > MAX_SESSION_TTL_SECS {
            return Err(ConfigError::InvalidSessionTtl {
                message: format!(
                    "session_ttl_seconds exceeds maximum allowed value of {} seconds",
                    MAX_SESSION_TTL_SECS
                ),
            });
        }

        Ok(())
    }

    fn validate_polling_config(search: &SearchConfig) -> Result<(), ConfigError> {
        if search.poll_interval.is_zero() {
            return Err(ConfigError::InvalidPolling {
                message: "poll interval must be greater than 0 milliseconds".to_string(),
            });
        }

        if search.max_wait.is_zero() {
            return Err(ConfigError::InvalidPolling {
                message: "max wait must be greater than 0 seconds".to_string(),
            });
        }

        if search.max_wait.as_secs() > MAX_WAIT_SECS_LIMIT {
            return Err(ConfigError::InvalidPolling {
                message: format!(
                    "max wait exceeds maximum allowed value of {} seconds",
                    MAX_WAIT_SECS_LIMIT
                ),
            });
        }

        if search.poll_interval > search.max_wait {
            return Err(ConfigError::InvalidPolling {
                message: format!(
                    "poll interval ({}ms) must not exceed max wait ({}s)",
                    search.poll_interval.as_millis(),
                    search.max_wait.as_secs()
                ),
            });
        }

        Ok(())
    }
}

/// Assemble `{scheme}://{host}:{port}` and validate the result.
///
/// The host must be a bare hostname or IP address; anything carrying a scheme
/// or path belongs in `SPLUNK_BASE_URL` instead.
pub(crate) fn base_url_from_parts(
    scheme: &str,
    host: &str,
    port: u16,
) -> Result<String, ConfigError> {
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "SPLUNK_SCHEME".into(),
            message: format!("must be http or https, got: {scheme}"),
        });
    }

    let host = host.trim();
    if host.is_empty() {
        return Err(ConfigError::MissingHost);
    }
    if host.contains("://") || host.contains('/') || host.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidValue {
            var: "SPLUNK_HOST".into(),
            message: "must be a bare hostname or IP address; use SPLUNK_BASE_URL for full URLs"
                .into(),
        });
    }

    let authority = if host.contains(':') && !host.starts_with('[') {
        // IPv6 literal
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    };

    validate_and_normalize_base_url(&format!("{scheme}://{authority}")).map_err(|e| match e {
        ConfigError::InvalidValue { message, .. } => ConfigError::InvalidValue {
            var: "SPLUNK_HOST".into(),
            message,
        },
        other => other,
    })
}

/// Validates and normalizes a base URL string.
///
/// Validation rules:
/// - Treat blank/whitespace-only as missing
/// - Parse as an absolute URL with an http or https scheme and a host
/// - Normalize by stripping trailing slash
pub(crate) fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingHost);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "SPLUNK_BASE_URL".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. https://localhost:8089): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "SPLUNK_BASE_URL".into(),
            message: format!(
                "scheme must be http or https (e.g. https://localhost:8089), got: {scheme}"
            ),
        });
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::InvalidValue {
            var: "SPLUNK_BASE_URL".into(),
            message: "host is required (e.g. https://localhost:8089)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

/// Namespace segments end up in REST paths, so they must be non-empty and slash-free.
fn validate_namespace_segment(var: &str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.contains('/') {
        return Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be a non-empty name without '/'".to_string(),
        });
    }
    Ok(trimmed.to_string())
}
