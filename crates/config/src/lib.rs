//! Configuration management for the Splunk saved-search MCP server.
//!
//! This crate provides types and a loader that assemble the Splunk connection,
//! credentials and saved-search namespace from environment variables and an
//! optional `.env` file. Configuration is read once at process start and is
//! immutable afterwards.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{AuthConfig, AuthStrategy, Config, ConnectionConfig, SearchConfig};

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, OnceLock};

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }
}
