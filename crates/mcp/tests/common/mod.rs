//! Shared helpers for splunk-mcp integration tests.
//!
//! Invariants / Assumptions:
//! - Configs are built with `ConfigLoader::new()` and never read the host environment.
//! - CLI commands run with `DOTENV_DISABLED=1` and a cleared Splunk environment.

#![allow(dead_code, unused_imports)]

use assert_cmd::Command;
use splunk_config::{Config, ConfigLoader};

pub use splunk_client::testing::{dispatch_body, job_done_body, load_fixture};
pub use wiremock::{Mock, MockServer, ResponseTemplate};

const SPLUNK_VARS: &[&str] = &[
    "SPLUNK_BASE_URL",
    "SPLUNK_HOST",
    "SPLUNK_PORT",
    "SPLUNK_SCHEME",
    "SPLUNK_USERNAME",
    "SPLUNK_PASSWORD",
    "SPLUNK_API_TOKEN",
    "SPLUNK_APP",
    "SPLUNK_OWNER",
    "SPLUNK_SKIP_VERIFY",
    "SPLUNK_TIMEOUT",
    "SPLUNK_MAX_RETRIES",
    "SPLUNK_SESSION_TTL",
    "SPLUNK_SESSION_EXPIRY_BUFFER",
    "SPLUNK_POLL_INTERVAL_MS",
    "SPLUNK_MAX_WAIT_SECS",
    "SPLUNK_MAX_RESULTS",
];

/// Session-auth config pointed at the mock server with fast polling.
pub fn session_config(uri: &str, password: &str) -> Config {
    ConfigLoader::new()
        .with_base_url(uri.to_string())
        .with_username("admin".to_string())
        .with_password(password.to_string())
        .with_poll_interval_ms(10)
        .with_max_wait_secs(5)
        .build()
        .unwrap()
}

/// Hermetic `splunk-mcp` command.
pub fn mcp_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("splunk-mcp");
    cmd.env("DOTENV_DISABLED", "1").env("RUST_LOG", "warn");
    for var in SPLUNK_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Mount a successful login returning the fixture session key.
pub async fn mount_login(server: &MockServer) {
    use wiremock::matchers::{method, path};

    Mock::given(method("POST"))
        .and(path("/services/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("auth/login_success.json")),
        )
        .mount(server)
        .await;
}

/// Mount dispatch, status and results for one saved search in `mcp_demo`.
pub async fn mount_saved_search(server: &MockServer, name: &str, sid: &str, results_fixture: &str) {
    use wiremock::matchers::{method, path};

    Mock::given(method("POST"))
        .and(path(format!(
            "/servicesNS/-/mcp_demo/saved/searches/{name}/dispatch"
        )))
        .respond_with(ResponseTemplate::new(201).set_body_json(dispatch_body(sid)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{sid}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_done_body(sid, 3)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{sid}/results")))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture(results_fixture)))
        .mount(server)
        .await;
}
