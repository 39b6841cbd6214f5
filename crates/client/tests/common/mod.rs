//! Common test utilities for integration tests.
//!
//! Shared helpers and re-exports for testing the Splunk client against a
//! wiremock server.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

#[allow(unused_imports)]
pub use splunk_client::testing::{dispatch_body, job_done_body, load_fixture};

#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use splunk_client::endpoints;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use secrecy::SecretString;
use splunk_client::{AuthStrategy, SplunkClient};

/// Saved search path in the default test namespace.
#[allow(dead_code)]
pub fn saved_search_path(name: &str) -> String {
    format!("/servicesNS/-/mcp_demo/saved/searches/{name}")
}

/// Client using session auth against the mock server.
#[allow(dead_code)]
pub fn session_client(uri: String) -> SplunkClient {
    SplunkClient::builder()
        .base_url(uri)
        .auth_strategy(AuthStrategy::SessionToken {
            username: "admin".to_string(),
            password: SecretString::new("testpassword".to_string().into()),
        })
        .build()
        .unwrap()
}

/// Client using API token auth against the mock server.
#[allow(dead_code)]
pub fn token_client(uri: String) -> SplunkClient {
    SplunkClient::builder()
        .base_url(uri)
        .auth_strategy(AuthStrategy::ApiToken {
            token: SecretString::new("test-api-token".to_string().into()),
        })
        .build()
        .unwrap()
}
