//! MCP server handler.
//!
//! Responsibilities:
//! - Answer `tools/list` and `tools/call` by delegating to [`SavedSearchProxy`].
//! - Render proxy failures as error tool results.
//!
//! Does NOT handle:
//! - Transport setup (see `main.rs`).
//!
//! Invariants:
//! - Every [`ProxyError`] becomes a `CallToolResult` with `is_error = true`;
//!   protocol-level errors are reserved for serialization failures.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{Error as McpError, ServerHandler};
use tracing::{debug, warn};

use crate::error::ProxyError;
use crate::proxy::{SavedSearchProxy, ToolOutput};

const INSTRUCTIONS: &str = "Query network data held in Splunk. Each tool runs one predefined \
Splunk saved search and returns its result rows as JSON. Tools take no arguments.";

/// `rmcp` handler serving the saved-search tools.
#[derive(Debug, Clone)]
pub struct SavedSearchHandler {
    proxy: Arc<SavedSearchProxy>,
}

impl SavedSearchHandler {
    pub fn new(proxy: Arc<SavedSearchProxy>) -> Self {
        Self { proxy }
    }
}

/// Turn a proxy outcome into the MCP tool result.
pub fn tool_result(outcome: Result<ToolOutput, ProxyError>) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(output) => {
            let text = output.to_json_text().map_err(|e| {
                McpError::internal_error(format!("Failed to serialize result: {}", e), None)
            })?;
            Ok(CallToolResult::success(vec![Content::text(text)]))
        }
        Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
    }
}

impl ServerHandler for SavedSearchHandler {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.proxy.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_name = request.name.as_ref();
        if request.arguments.as_ref().is_some_and(|args| !args.is_empty()) {
            debug!(tool = tool_name, "Ignoring arguments; tools take no parameters");
        }

        let outcome = self.proxy.call_tool(tool_name).await;
        if let Err(ref e) = outcome {
            warn!(tool = tool_name, error = %e, "Tool call failed");
        }
        tool_result(outcome)
    }
}
