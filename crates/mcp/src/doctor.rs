//! Diagnostics for the `doctor` subcommand.
//!
//! Responsibilities:
//! - Summarize the resolved configuration without secrets.
//! - Verify credentials, server reachability and that every tool's saved
//!   search exists and is enabled in the configured app.
//!
//! Does NOT handle:
//! - Printing or exit codes (see `main.rs`).
//!
//! Invariants:
//! - Checks never abort the report; failures are recorded and later checks
//!   that depend on them are marked skipped.

use serde::Serialize;
use splunk_config::Config;
use tracing::info;

use crate::error::ProxyError;
use crate::proxy::SavedSearchProxy;
use crate::tools::SavedSearchTool;

/// Result of a single diagnostic check.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticCheck {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Status of a diagnostic check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

/// Configuration summary; carries no secret material.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub base_url: String,
    pub auth_strategy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub app: String,
    pub owner: String,
    pub skip_verify: bool,
    pub timeout_secs: u64,
    pub max_retries: usize,
    pub poll_interval_ms: u128,
    pub max_wait_secs: u64,
}

impl From<&Config> for ConfigSummary {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.connection.base_url.clone(),
            auth_strategy: config.auth.strategy.kind().to_string(),
            username: config.auth.strategy.username().map(str::to_string),
            app: config.search.app.clone(),
            owner: config.search.owner.clone(),
            skip_verify: config.connection.skip_verify,
            timeout_secs: config.connection.timeout.as_secs(),
            max_retries: config.connection.max_retries,
            poll_interval_ms: config.search.poll_interval.as_millis(),
            max_wait_secs: config.search.max_wait.as_secs(),
        }
    }
}

/// Complete diagnostic report.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub version: String,
    pub timestamp: String,
    pub config_summary: ConfigSummary,
    pub checks: Vec<DiagnosticCheck>,
}

impl DiagnosticReport {
    /// True when no check failed.
    pub fn all_passed(&self) -> bool {
        !self.checks.iter().any(|c| c.status == CheckStatus::Fail)
    }
}

impl DiagnosticCheck {
    fn pass(name: &str, message: String, details: Option<serde_json::Value>) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Pass,
            message,
            details,
        }
    }

    fn fail(name: &str, message: String) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Fail,
            message,
            details: None,
        }
    }

    fn skipped(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Skipped,
            message: message.to_string(),
            details: None,
        }
    }
}

/// Run every diagnostic check against the configured Splunk instance.
pub async fn run_diagnostics(config: &Config) -> DiagnosticReport {
    info!("Running doctor diagnostics...");

    let mut checks = vec![DiagnosticCheck::pass(
        "config_load",
        "Configuration loaded successfully".to_string(),
        None,
    )];

    match SavedSearchProxy::new(config) {
        Ok(proxy) => run_server_checks(&proxy, &mut checks).await,
        Err(e) => checks.push(DiagnosticCheck::fail(
            "client_build",
            format!("Failed to build client: {}", e),
        )),
    }

    DiagnosticReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        config_summary: ConfigSummary::from(config),
        checks,
    }
}

async fn run_server_checks(proxy: &SavedSearchProxy, checks: &mut Vec<DiagnosticCheck>) {
    let authenticated = if proxy.client().is_api_token_auth().await {
        checks.push(DiagnosticCheck::skipped(
            "authentication",
            "API token in use; verified by server_connectivity",
        ));
        true
    } else {
        match proxy.client().login().await {
            Ok(()) => {
                checks.push(DiagnosticCheck::pass(
                    "authentication",
                    "Logged in with username and password".to_string(),
                    None,
                ));
                true
            }
            Err(e) => {
                checks.push(DiagnosticCheck::fail(
                    "authentication",
                    ProxyError::from(e).to_string(),
                ));
                false
            }
        }
    };

    let connected = if authenticated {
        match proxy.probe().await {
            Ok(info) => {
                checks.push(DiagnosticCheck::pass(
                    "server_connectivity",
                    format!(
                        "Connected to {} ({})",
                        proxy.client().base_url(),
                        info.server_name
                    ),
                    Some(serde_json::json!({
                        "server_name": info.server_name,
                        "version": info.version,
                    })),
                ));
                true
            }
            Err(e) => {
                checks.push(DiagnosticCheck::fail(
                    "server_connectivity",
                    format!("Failed to connect: {}", e),
                ));
                false
            }
        }
    } else {
        checks.push(DiagnosticCheck::skipped(
            "server_connectivity",
            "Skipped because authentication failed",
        ));
        false
    };

    if connected {
        checks.push(inventory_check(proxy).await);
    }

    for tool in SavedSearchTool::ALL {
        let name = format!("saved_search:{}", tool.saved_search());
        if !connected {
            checks.push(DiagnosticCheck::skipped(&name, "Skipped because Splunk is unreachable"));
            continue;
        }
        checks.push(saved_search_check(proxy, tool, &name).await);
    }
}

async fn inventory_check(proxy: &SavedSearchProxy) -> DiagnosticCheck {
    match proxy.available_saved_searches().await {
        Ok(searches) => {
            let names: Vec<&str> = searches.iter().map(|s| s.name.as_str()).collect();
            DiagnosticCheck::pass(
                "saved_search_inventory",
                format!(
                    "{} enabled saved searches in app '{}'",
                    names.len(),
                    proxy.search_config().app
                ),
                Some(serde_json::json!({ "saved_searches": names })),
            )
        }
        Err(e) => DiagnosticCheck::fail("saved_search_inventory", e.to_string()),
    }
}

async fn saved_search_check(
    proxy: &SavedSearchProxy,
    tool: SavedSearchTool,
    name: &str,
) -> DiagnosticCheck {
    let app = &proxy.search_config().app;
    match proxy.saved_search_details(tool).await {
        Ok(search) if search.disabled => DiagnosticCheck::fail(
            name,
            format!("Saved search '{}' is disabled in app '{}'", search.name, app),
        ),
        Ok(search) => DiagnosticCheck::pass(
            name,
            format!("Saved search '{}' is available in app '{}'", search.name, app),
            Some(serde_json::json!({
                "owner": search.owner,
                "description": search.description,
                "search": search.search,
                "is_scheduled": search.is_scheduled,
                "cron_schedule": search.cron_schedule,
            })),
        ),
        Err(e) => DiagnosticCheck::fail(name, e.to_string()),
    }
}
