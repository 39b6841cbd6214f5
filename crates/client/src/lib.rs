//! Splunk REST API client.
//!
//! A typed client for the handful of Splunk management endpoints needed to run
//! saved searches on demand: login, saved-search dispatch, job polling,
//! results retrieval, saved-search metadata and server info. It supports both
//! session token and API token authentication with automatic session renewal.

mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
mod serde_helpers;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::{AuthStrategy, SessionManager};
pub use client::SplunkClient;
pub use client::builder::SplunkClientBuilder;
pub use client::search::{SavedSearchRequest, SavedSearchRun};
pub use endpoints::Namespace;
pub use error::{ClientError, Result};
pub use models::{
    SavedSearch, SearchJobResults, SearchJobStatus, ServerInfo, SplunkMessage, SplunkMessages,
};
