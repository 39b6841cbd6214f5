//! Proxy error taxonomy.
//!
//! Responsibilities:
//! - Classify client failures into the categories surfaced to MCP clients.
//!
//! Does NOT handle:
//! - Rendering errors as tool results (see `handler`).
//!
//! Invariants:
//! - Messages carry Splunk's text but never credentials.

use splunk_client::ClientError;
use splunk_config::ConfigError;
use thiserror::Error;

/// Errors produced by the saved-search proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Configuration could not be loaded. Raised by the binary before serving.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Splunk rejected the configured credentials.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The requested tool is not one of the registered saved searches.
    #[error("Unknown tool '{0}'")]
    UnknownTool(String),

    /// Splunk could not be reached or the search did not complete.
    #[error("Splunk request failed: {0}")]
    Upstream(String),
}

impl From<ClientError> for ProxyError {
    fn from(err: ClientError) -> Self {
        if err.is_auth_error() {
            let message = match err {
                ClientError::AuthFailed(message) => message,
                other => other.to_string(),
            };
            Self::Authentication(message)
        } else {
            Self::Upstream(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_auth_failures_classified() {
        let err = ProxyError::from(ClientError::AuthFailed("WARN: Login failed".to_string()));
        assert!(matches!(err, ProxyError::Authentication(ref m) if m == "WARN: Login failed"));

        let err = ProxyError::from(ClientError::ApiError {
            status: 401,
            url: "https://splunk:8089/services/server/info".to_string(),
            message: "invalid token".to_string(),
            request_id: None,
        });
        assert!(matches!(err, ProxyError::Authentication(_)));
    }

    #[test]
    fn test_other_failures_are_upstream() {
        let err = ProxyError::from(ClientError::JobFailed {
            sid: "1.2".to_string(),
            message: "FATAL: boom".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Splunk request failed: Search job 1.2 failed: FATAL: boom"
        );

        let err = ProxyError::from(ClientError::OperationTimeout {
            operation: "wait_for_job",
            timeout: Duration::from_secs(300),
        });
        assert!(matches!(err, ProxyError::Upstream(_)));

        let err = ProxyError::from(ClientError::NotFound("saved search 'x'".to_string()));
        assert!(matches!(err, ProxyError::Upstream(_)));
    }

    #[test]
    fn test_config_errors_wrap_loader_failures() {
        let err = ProxyError::from(ConfigError::MissingHost);
        assert!(matches!(err, ProxyError::Config(ConfigError::MissingHost)));
        assert!(err.to_string().starts_with("Configuration error: Splunk host is required"));
    }

    #[test]
    fn test_unknown_tool_display() {
        assert_eq!(
            ProxyError::UnknownTool("drop_tables".to_string()).to_string(),
            "Unknown tool 'drop_tables'"
        );
    }
}
