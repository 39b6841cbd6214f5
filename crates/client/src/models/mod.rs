//! Data models for Splunk API responses.
//!
//! # What this module handles:
//! - Shared response wrappers and Splunk message types ([`common`])
//! - Search job status and results ([`jobs`])
//! - Saved search metadata ([`saved_searches`])
//! - Server info ([`server`])
//!
//! # What this module does NOT handle:
//! - HTTP transport (see [`crate::endpoints`])
//! - Business logic or validation of model data

pub mod common;
pub mod jobs;
pub mod saved_searches;
pub mod server;

pub use common::{Acl, Entry, MessageType, SplunkMessage, SplunkMessages, SplunkResponse};
pub use jobs::{SearchJobResults, SearchJobStatus};
pub use saved_searches::{SavedSearch, SavedSearchContent};
pub use server::ServerInfo;
