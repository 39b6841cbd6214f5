//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `SPLUNK_*` environment variables.
//! - Apply environment variable values to a `ConfigLoader` instance.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by `ConfigLoader::load_dotenv`).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric or boolean values return `ConfigError::InvalidValue`.
//! - Values never echo secrets back in error messages.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::MAX_MAX_RETRIES;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse an optional env var into `T`, mapping failures to `InvalidValue`.
fn parse_env<T: FromStr>(key: &str, message: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: message.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
///
/// Unset variables leave the loader's current value untouched.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("SPLUNK_BASE_URL") {
        loader.base_url = Some(url);
    }
    if let Some(host) = env_var_or_none("SPLUNK_HOST") {
        loader.host = Some(host);
    }
    if let Some(port) = parse_env::<u16>("SPLUNK_PORT", "must be a port number between 1 and 65535")? {
        if port == 0 {
            return Err(ConfigError::InvalidValue {
                var: "SPLUNK_PORT".to_string(),
                message: "must be a port number between 1 and 65535".to_string(),
            });
        }
        loader.port = Some(port);
    }
    if let Some(scheme) = env_var_or_none("SPLUNK_SCHEME") {
        loader.scheme = Some(scheme.to_ascii_lowercase());
    }
    if let Some(username) = env_var_or_none("SPLUNK_USERNAME") {
        loader.username = Some(username);
    }
    if let Some(password) = env_var_or_none("SPLUNK_PASSWORD") {
        loader.password = Some(SecretString::new(password.into()));
    }
    if let Some(token) = env_var_or_none("SPLUNK_API_TOKEN") {
        loader.api_token = Some(SecretString::new(token.into()));
    }
    if let Some(skip) = parse_env::<bool>("SPLUNK_SKIP_VERIFY", "must be true or false")? {
        loader.skip_verify = Some(skip);
    }
    if let Some(secs) = parse_env::<u64>("SPLUNK_TIMEOUT", "must be a number")? {
        loader.timeout = Some(Duration::from_secs(secs));
    }
    if let Some(value) =
        parse_env::<usize>("SPLUNK_MAX_RETRIES", "must be a non-negative integer")?
    {
        if value > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!("must be between 0 and {} (got {})", MAX_MAX_RETRIES, value),
            });
        }
        loader.max_retries = Some(value);
    }
    if let Some(buffer) = parse_env::<u64>("SPLUNK_SESSION_EXPIRY_BUFFER", "must be a number")? {
        loader.session_expiry_buffer_seconds = Some(buffer);
    }
    if let Some(ttl) = parse_env::<u64>("SPLUNK_SESSION_TTL", "must be a number")? {
        loader.session_ttl_seconds = Some(ttl);
    }
    // Saved-search namespace
    if let Some(app) = env_var_or_none("SPLUNK_APP") {
        loader.app = Some(app);
    }
    if let Some(owner) = env_var_or_none("SPLUNK_OWNER") {
        loader.owner = Some(owner);
    }
    // Job polling
    if let Some(ms) = parse_env::<u64>("SPLUNK_POLL_INTERVAL_MS", "must be a number")? {
        loader.poll_interval_ms = Some(ms);
    }
    if let Some(secs) = parse_env::<u64>("SPLUNK_MAX_WAIT_SECS", "must be a number")? {
        loader.max_wait_secs = Some(secs);
    }
    if let Some(max_results) =
        parse_env::<u64>("SPLUNK_MAX_RESULTS", "must be a non-negative number")?
    {
        loader.max_results = Some(max_results);
    }

    Ok(())
}
