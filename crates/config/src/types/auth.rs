//! Authentication types.
//!
//! Responsibilities:
//! - Define authentication strategies (session token via login, API token).
//! - Describe the active strategy without exposing secret material.
//!
//! Does NOT handle:
//! - Actual authentication flow or token exchange (see client crate).
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString`; `Debug` output is redacted.

use secrecy::SecretString;

/// Strategy for authenticating with Splunk.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Username and password authentication (creates session token)
    SessionToken {
        username: String,
        password: SecretString,
    },
    /// API token (bearer token authentication)
    ApiToken { token: SecretString },
}

impl AuthStrategy {
    /// Short, secret-free label for the strategy.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SessionToken { .. } => "session",
            Self::ApiToken { .. } => "token",
        }
    }

    /// Username for session authentication, if any.
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::SessionToken { username, .. } => Some(username),
            Self::ApiToken { .. } => None,
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// The authentication strategy to use.
    pub strategy: AuthStrategy,
}
