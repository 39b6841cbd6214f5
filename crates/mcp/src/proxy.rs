//! Saved-search proxy.
//!
//! Responsibilities:
//! - Advertise the fixed tool catalog.
//! - Run the saved search behind a tool and shape its rows into a [`ToolOutput`].
//! - Provide the startup probe and the saved-search lookups used by `doctor`
//!   and `searches`.
//!
//! Does NOT handle:
//! - MCP framing (see `handler`).
//! - Session management (owned by [`SplunkClient`]).
//!
//! Invariants:
//! - An unknown tool name is rejected before any Splunk request is made.
//! - Results are never cached; each call dispatches its own job.

use std::collections::BTreeSet;
use std::sync::Arc;

use rmcp::model::Tool;
use serde::Serialize;
use splunk_client::{Namespace, SavedSearch, SavedSearchRequest, ServerInfo, SplunkClient};
use splunk_config::{Config, SearchConfig};
use tracing::{debug, info, warn};

use crate::error::ProxyError;
use crate::tools::SavedSearchTool;

/// Successful tool call payload.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOutput {
    pub status: &'static str,
    pub tool: String,
    pub saved_search: String,
    pub app: String,
    pub sid: String,
    pub count: usize,
    /// Distinct field names across all rows.
    pub fields: Vec<String>,
    pub results: Vec<serde_json::Value>,
}

impl ToolOutput {
    fn new(
        tool: SavedSearchTool,
        app: &str,
        sid: String,
        results: Vec<serde_json::Value>,
    ) -> Self {
        let fields: BTreeSet<&str> = results
            .iter()
            .filter_map(|row| row.as_object())
            .flat_map(|row| row.keys().map(String::as_str))
            .collect();
        let fields = fields.into_iter().map(str::to_string).collect();

        Self {
            status: "success",
            tool: tool.name().to_string(),
            saved_search: tool.saved_search().to_string(),
            app: app.to_string(),
            sid,
            count: results.len(),
            fields,
            results,
        }
    }

    /// Pretty JSON text sent back as the tool's content.
    pub fn to_json_text(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Runs the registered saved searches on behalf of MCP clients.
#[derive(Debug, Clone)]
pub struct SavedSearchProxy {
    client: Arc<SplunkClient>,
    search: SearchConfig,
}

impl SavedSearchProxy {
    /// Build a proxy and its Splunk client from configuration.
    pub fn new(config: &Config) -> Result<Self, ProxyError> {
        let client = SplunkClient::builder().from_config(config).build()?;
        Ok(Self::from_client(Arc::new(client), config.search.clone()))
    }

    pub fn from_client(client: Arc<SplunkClient>, search: SearchConfig) -> Self {
        Self { client, search }
    }

    pub fn client(&self) -> &SplunkClient {
        &self.client
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    fn namespace(&self) -> Namespace<'_> {
        Namespace::new(&self.search.owner, &self.search.app)
    }

    /// Descriptors for every registered tool. Never touches the network.
    pub fn list_tools(&self) -> Vec<Tool> {
        SavedSearchTool::ALL
            .into_iter()
            .map(SavedSearchTool::descriptor)
            .collect()
    }

    /// Run the saved search behind `tool_name`.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::UnknownTool`] for any name outside the catalog
    /// - [`ProxyError::Authentication`] when Splunk rejects the credentials
    /// - [`ProxyError::Upstream`] for transport, job and lookup failures
    pub async fn call_tool(&self, tool_name: &str) -> Result<ToolOutput, ProxyError> {
        let tool = SavedSearchTool::from_tool_name(tool_name)
            .ok_or_else(|| ProxyError::UnknownTool(tool_name.to_string()))?;

        info!(tool = %tool, app = %self.search.app, "Running saved search");

        let request = SavedSearchRequest::from_search_config(tool.saved_search(), &self.search);
        let run = self.client.run_saved_search(request).await.map_err(|e| {
            warn!(tool = %tool, error = %e, "Saved search failed");
            ProxyError::from(e)
        })?;

        let output = ToolOutput::new(tool, &self.search.app, run.sid, run.results);
        if output.count > 0 {
            for field in tool.expected_fields() {
                if !output.fields.iter().any(|f| f == field) {
                    debug!(tool = %tool, field, "Result rows lack an expected field");
                }
            }
        }
        info!(tool = %tool, sid = %output.sid, rows = output.count, "Tool call completed");
        Ok(output)
    }

    /// Check connectivity and credentials by reading server info.
    pub async fn probe(&self) -> Result<ServerInfo, ProxyError> {
        Ok(self.client.get_server_info().await?)
    }

    /// Enabled saved searches in the configured namespace.
    pub async fn available_saved_searches(&self) -> Result<Vec<SavedSearch>, ProxyError> {
        let searches = self.client.list_saved_searches(self.namespace()).await?;
        Ok(searches.into_iter().filter(|s| !s.disabled).collect())
    }

    /// Enabled saved searches whose name contains `pattern`, ignoring case.
    /// An empty pattern matches every enabled search.
    pub async fn saved_searches_matching(
        &self,
        pattern: &str,
    ) -> Result<Vec<SavedSearch>, ProxyError> {
        let needle = pattern.trim().to_lowercase();
        let searches = self.available_saved_searches().await?;
        Ok(searches
            .into_iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Details of the saved search behind a tool.
    pub async fn saved_search_details(
        &self,
        tool: SavedSearchTool,
    ) -> Result<SavedSearch, ProxyError> {
        Ok(self
            .client
            .get_saved_search(self.namespace(), tool.saved_search())
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_output_shape() {
        let output = ToolOutput::new(
            SavedSearchTool::NetworkTopologies,
            "mcp_demo",
            "1700000000.1".to_string(),
            vec![
                json!({"node_from": "a", "node_to": "b"}),
                json!({"node_from": "b", "node_to": "c"}),
            ],
        );

        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["tool"], "mcp_get_network_topologies");
        assert_eq!(value["saved_search"], "mcp_get_network_topologies");
        assert_eq!(value["app"], "mcp_demo");
        assert_eq!(value["sid"], "1700000000.1");
        assert_eq!(value["count"], 2);
        assert_eq!(value["fields"], json!(["node_from", "node_to"]));
        assert_eq!(value["results"][1]["node_to"], "c");
    }

    #[test]
    fn test_tool_output_empty_results() {
        let output = ToolOutput::new(
            SavedSearchTool::SlowNetworkNodes,
            "mcp_demo",
            "1".to_string(),
            Vec::new(),
        );
        assert_eq!(output.count, 0);
        assert!(output.fields.is_empty());
        assert!(output.to_json_text().unwrap().contains("\"results\": []"));
    }
}
