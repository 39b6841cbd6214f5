//! MCP proxy for Splunk saved searches.
//!
//! Responsibilities:
//! - Expose a fixed set of Splunk saved searches as MCP tools.
//! - Run the matching saved search on every tool call and relay its rows.
//! - Diagnose connectivity, credentials and saved-search availability.
//!
//! Does NOT handle:
//! - Splunk REST details (see `splunk-client`).
//! - Environment parsing (see `splunk-config`).
//! - The MCP wire protocol (provided by `rmcp`).
//!
//! Invariants:
//! - Only the saved searches in [`tools::SavedSearchTool`] can ever be dispatched.
//! - Every successful call is backed by exactly one fresh search job.

pub mod doctor;
pub mod error;
pub mod handler;
pub mod proxy;
pub mod tools;

pub use error::ProxyError;
pub use handler::SavedSearchHandler;
pub use proxy::{SavedSearchProxy, ToolOutput};
pub use tools::SavedSearchTool;
