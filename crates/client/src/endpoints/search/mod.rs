//! Search endpoints.
//!
//! # What this module handles:
//! - Saved search dispatch and metadata ([`saved`])
//! - Job status, completion polling, results and cancellation ([`jobs`])
//!
//! # What this module does NOT handle:
//! - Ad hoc SPL execution; only saved searches are run
//! - High-level orchestration (see [`crate::client::search`])

pub mod jobs;
pub mod saved;

pub use jobs::{cancel_job, get_job_status, get_results, wait_for_job};
pub use saved::{dispatch_saved_search, get_saved_search, list_saved_searches};
