//! Tests for the configuration loader.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Every variable `apply_env` reads, cleared so ambient developer settings cannot leak in.
pub const SPLUNK_VARS: [&str; 17] = [
    "SPLUNK_BASE_URL",
    "SPLUNK_HOST",
    "SPLUNK_PORT",
    "SPLUNK_SCHEME",
    "SPLUNK_USERNAME",
    "SPLUNK_PASSWORD",
    "SPLUNK_API_TOKEN",
    "SPLUNK_SKIP_VERIFY",
    "SPLUNK_TIMEOUT",
    "SPLUNK_MAX_RETRIES",
    "SPLUNK_SESSION_EXPIRY_BUFFER",
    "SPLUNK_SESSION_TTL",
    "SPLUNK_APP",
    "SPLUNK_OWNER",
    "SPLUNK_POLL_INTERVAL_MS",
    "SPLUNK_MAX_WAIT_SECS",
    "SPLUNK_MAX_RESULTS",
];

/// Run `f` with all `SPLUNK_*` variables unset except the given overrides.
pub fn with_splunk_env<F, R>(overrides: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let vars: Vec<(&str, Option<&str>)> = SPLUNK_VARS
        .iter()
        .map(|key| {
            let value = overrides
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| *v);
            (*key, value)
        })
        .collect();
    temp_env::with_vars(vars, f)
}
