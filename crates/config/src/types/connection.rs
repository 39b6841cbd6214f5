//! Connection configuration types.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS verification, timeouts, retries).
//! - Define the main `Config` structure combining connection, auth and search namespace.
//!
//! Does NOT handle:
//! - Configuration loading from env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All duration fields are serialized as seconds (integers).
//! - `base_url` never carries a trailing slash once built by `ConfigLoader`.

use serde::Serialize;
use std::time::Duration;

use crate::types::auth::AuthConfig;
use crate::types::search::SearchConfig;

/// Module for serializing Duration as seconds (integer).
pub(crate) mod duration_seconds {
    use serde::{Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }
}

/// Connection configuration for the Splunk management endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionConfig {
    /// Base URL of the Splunk server (e.g., https://splunk.example.com:8089)
    pub base_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Per-request HTTP timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Maximum number of retries for transient HTTP failures
    pub max_retries: usize,
    /// Buffer time before session expiry to proactively refresh tokens (in seconds)
    pub session_expiry_buffer_seconds: u64,
    /// Session time-to-live in seconds
    pub session_ttl_seconds: u64,
}

/// Main configuration structure.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Authentication settings
    pub auth: AuthConfig,
    /// Saved-search namespace and job polling settings
    pub search: SearchConfig,
}
