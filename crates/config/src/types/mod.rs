//! Configuration type definitions.
//!
//! Responsibilities:
//! - Define configuration types for authentication, connection and the saved-search namespace.
//! - Provide serialization helpers for non-secret types (durations).
//!
//! Does NOT handle:
//! - Configuration loading from environment variables (see `loader` module).
//! - Actual network connections or authentication flows (see client crate).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.
//! - Secrets are never serialized; only connection and search settings are.

mod auth;
mod connection;
mod search;

pub use auth::{AuthConfig, AuthStrategy};
pub use connection::{Config, ConnectionConfig};
pub use search::SearchConfig;
