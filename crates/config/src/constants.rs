//! Centralized constants for the splunk-mcp workspace.
//!
//! Default values shared by the config loader, the client and the MCP server.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default session time-to-live in seconds (1 hour).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Default buffer time before session expiry to proactively refresh tokens.
pub const DEFAULT_EXPIRY_BUFFER_SECS: u64 = 60;

/// Default Splunk management port.
pub const DEFAULT_SPLUNK_PORT: u16 = 8089;

/// Default URL scheme for the management endpoint.
pub const DEFAULT_SCHEME: &str = "https";

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default number of retries for transient failures (429/502/503/504).
///
/// Tool calls are not retried unless the operator opts in.
pub const DEFAULT_MAX_RETRIES: usize = 0;

/// Certificate verification is skipped unless explicitly enabled.
pub const DEFAULT_SKIP_VERIFY: bool = true;

// =============================================================================
// Configuration Bounds
// =============================================================================

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Maximum allowed session TTL in seconds (24 hours).
pub const MAX_SESSION_TTL_SECS: u64 = 86400;

/// Maximum allowed value for `SPLUNK_MAX_RETRIES`.
pub const MAX_MAX_RETRIES: usize = 10;

/// Maximum allowed job wait bound in seconds (1 hour).
pub const MAX_WAIT_SECS_LIMIT: u64 = 3600;

// =============================================================================
// Saved Search Namespace & Polling Defaults
// =============================================================================

/// Default application namespace holding the saved searches.
pub const DEFAULT_APP: &str = "mcp_demo";

/// Default owner namespace. `-` matches saved searches of any owner.
pub const DEFAULT_OWNER: &str = "-";

/// Default polling interval for job status checks in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Default maximum time to wait for search job completion in seconds.
pub const DEFAULT_MAX_WAIT_SECS: u64 = 300;

/// Default number of result rows fetched per job. `0` fetches the full result set,
/// paging past Splunk's per-response `maxresultrows` cap.
pub const DEFAULT_MAX_RESULTS: u64 = 0;
