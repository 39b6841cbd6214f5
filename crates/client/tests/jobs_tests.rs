//! Saved search dispatch and job lifecycle tests.
//!
//! # Invariants
//! - A failed job surfaces as `ClientError::JobFailed` and its results are never read
//! - A job that outlives `max_wait` surfaces as `ClientError::OperationTimeout`
//!   and is cancelled on Splunk
//! - Result sets larger than one response are read page by page
//! - Every run dispatches a new job
//!
//! # What this does NOT handle
//! - Session renewal (see auth_tests.rs)

mod common;

use common::*;
use splunk_client::{ClientError, Namespace, SavedSearchRequest};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path, path_regex, query_param};

const SID: &str = "scheduler__admin__mcp_demo__RMD5a1b2c3d4_at_1700000000_42";

fn namespace() -> Namespace<'static> {
    Namespace::new("-", "mcp_demo")
}

async fn mount_job(mock_server: &MockServer, status_fixture: &str, results_fixture: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{SID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture(status_fixture)))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{SID}/results")))
        .and(query_param("count", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture(results_fixture)))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_dispatch_saved_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!(
            "{}/dispatch",
            saved_search_path("mcp_get_slow_network_nodes")
        )))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(load_fixture("search/dispatch_success.json")),
        )
        .mount(&mock_server)
        .await;

    let sid = endpoints::dispatch_saved_search(
        &Client::new(),
        &mock_server.uri(),
        "Bearer t",
        namespace(),
        "mcp_get_slow_network_nodes",
        0,
    )
    .await
    .unwrap();

    assert_eq!(sid, SID);
}

#[tokio::test]
async fn test_dispatch_unknown_saved_search_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/dispatch", saved_search_path("missing"))))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "messages": [{"type": "ERROR", "text": "Could not find object id=missing"}]
        })))
        .mount(&mock_server)
        .await;

    let err = endpoints::dispatch_saved_search(
        &Client::new(),
        &mock_server.uri(),
        "Bearer t",
        namespace(),
        "missing",
        0,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ClientError::NotFound(_)), "got {err:?}");
    assert!(err.to_string().contains("missing"));
}

#[tokio::test]
async fn test_wait_for_job_polls_until_done() {
    let mock_server = MockServer::start().await;

    let polls = Arc::new(AtomicUsize::new(0));
    let polls_clone = polls.clone();
    let running = load_fixture("search/job_status_running.json");
    let done = load_fixture("search/job_status_done.json");

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{SID}")))
        .respond_with(move |_: &wiremock::Request| {
            let n = polls_clone.fetch_add(1, Ordering::SeqCst);
            let body = if n < 2 { &running } else { &done };
            ResponseTemplate::new(200).set_body_json(body)
        })
        .mount(&mock_server)
        .await;

    let status = endpoints::wait_for_job(
        &Client::new(),
        &mock_server.uri(),
        "Bearer t",
        SID,
        Duration::from_millis(10),
        Duration::from_secs(5),
        0,
    )
    .await
    .unwrap();

    assert!(status.is_done);
    assert_eq!(status.result_count, 3);
    assert_eq!(polls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_wait_for_failed_job() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{SID}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("search/job_status_failed.json")),
        )
        .mount(&mock_server)
        .await;

    let err = endpoints::wait_for_job(
        &Client::new(),
        &mock_server.uri(),
        "Bearer t",
        SID,
        Duration::from_millis(10),
        Duration::from_secs(5),
        0,
    )
    .await
    .unwrap_err();

    match err {
        ClientError::JobFailed { sid, message } => {
            assert_eq!(sid, SID);
            assert!(message.contains("Could not find lookup table"));
        }
        other => panic!("expected JobFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_wait_for_job_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{SID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(load_fixture("search/job_status_running.json")),
        )
        .mount(&mock_server)
        .await;

    let err = endpoints::wait_for_job(
        &Client::new(),
        &mock_server.uri(),
        "Bearer t",
        SID,
        Duration::from_millis(20),
        Duration::from_millis(100),
        0,
    )
    .await
    .unwrap_err();

    assert!(
        matches!(
            err,
            ClientError::OperationTimeout {
                operation: "wait_for_job",
                ..
            }
        ),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_get_results_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{SID}/results")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let results = endpoints::get_results(
        &Client::new(),
        &mock_server.uri(),
        "Bearer t",
        SID,
        0,
        0,
        0,
    )
    .await
    .unwrap();

    assert!(results.results.is_empty());
}

#[tokio::test]
async fn test_run_saved_search_returns_rows() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!(
            "{}/dispatch",
            saved_search_path("mcp_get_slow_network_nodes")
        )))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(load_fixture("search/dispatch_success.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_job(
        &mock_server,
        "search/job_status_done.json",
        "search/results_slow_nodes.json",
    )
    .await;

    let client = token_client(mock_server.uri());
    let run = client
        .run_saved_search(
            SavedSearchRequest::new("mcp_get_slow_network_nodes", namespace())
                .poll_interval(Duration::from_millis(10)),
        )
        .await
        .unwrap();

    assert_eq!(run.sid, SID);
    assert!(run.status.is_done);
    assert_eq!(run.results.len(), 3);
    assert_eq!(run.results[0]["node"], "edge-router-07");
    assert_eq!(run.results[0]["latency"], "412");
    assert_eq!(run.results[0]["region"], "us-east");
}

#[tokio::test]
async fn test_run_saved_search_failed_job_skips_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!(
            "{}/dispatch",
            saved_search_path("mcp_get_network_topologies")
        )))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(load_fixture("search/dispatch_success.json")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{SID}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("search/job_status_failed.json")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{SID}/results")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = token_client(mock_server.uri());
    let err = client
        .run_saved_search(
            SavedSearchRequest::new("mcp_get_network_topologies", namespace())
                .poll_interval(Duration::from_millis(10)),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::JobFailed { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_each_run_dispatches_a_new_job() {
    let mock_server = MockServer::start().await;

    let dispatches = Arc::new(AtomicUsize::new(0));
    let dispatches_clone = dispatches.clone();

    Mock::given(method("POST"))
        .and(path(format!(
            "{}/dispatch",
            saved_search_path("mcp_get_network_topologies")
        )))
        .respond_with(move |_: &wiremock::Request| {
            let n = dispatches_clone.fetch_add(1, Ordering::SeqCst);
            ResponseTemplate::new(201).set_body_json(dispatch_body(&format!("1700000000.{n}")))
        })
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/services/search/jobs/1700000000\.\d+$"))
        .respond_with(|req: &wiremock::Request| {
            let sid = req.url.path().rsplit('/').next().unwrap_or_default().to_string();
            ResponseTemplate::new(200).set_body_json(job_done_body(&sid, 3))
        })
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/services/search/jobs/1700000000\.\d+/results$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("search/results_topologies.json")),
        )
        .mount(&mock_server)
        .await;

    let client = token_client(mock_server.uri());
    let request = SavedSearchRequest::new("mcp_get_network_topologies", namespace())
        .poll_interval(Duration::from_millis(10));

    let first = client.run_saved_search(request).await.unwrap();
    let second = client.run_saved_search(request).await.unwrap();

    assert_ne!(first.sid, second.sid);
    assert_eq!(dispatches.load(Ordering::SeqCst), 2);
    assert_eq!(second.results.len(), 3);
    assert_eq!(second.results[2]["node_to"], "edge-router-11");
}

async fn mount_dispatch(mock_server: &MockServer, name: &str) {
    Mock::given(method("POST"))
        .and(path(format!("{}/dispatch", saved_search_path(name))))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(load_fixture("search/dispatch_success.json")),
        )
        .mount(mock_server)
        .await;
}

async fn mount_running_job(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{SID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(load_fixture("search/job_status_running.json")),
        )
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{SID}/results")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_run_saved_search_cancels_timed_out_job() {
    let mock_server = MockServer::start().await;
    mount_dispatch(&mock_server, "mcp_get_slow_network_nodes").await;
    mount_running_job(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(format!("/services/search/jobs/{SID}/control")))
        .and(body_string_contains("action=cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "messages": [{"type": "INFO", "text": "Search job cancelled."}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = token_client(mock_server.uri());
    let err = client
        .run_saved_search(
            SavedSearchRequest::new("mcp_get_slow_network_nodes", namespace())
                .poll_interval(Duration::from_millis(20))
                .max_wait(Duration::from_millis(100)),
        )
        .await
        .unwrap_err();

    assert!(
        matches!(err, ClientError::OperationTimeout { operation: "wait_for_job", .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_failed_cancel_still_reports_timeout() {
    let mock_server = MockServer::start().await;
    mount_dispatch(&mock_server, "mcp_get_slow_network_nodes").await;
    mount_running_job(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(format!("/services/search/jobs/{SID}/control")))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "messages": [{"type": "ERROR", "text": "Internal error"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = token_client(mock_server.uri());
    let err = client
        .run_saved_search(
            SavedSearchRequest::new("mcp_get_slow_network_nodes", namespace())
                .poll_interval(Duration::from_millis(20))
                .max_wait(Duration::from_millis(100)),
        )
        .await
        .unwrap_err();

    assert!(
        matches!(err, ClientError::OperationTimeout { .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_cancel_job_posts_control_action() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/services/search/jobs/{SID}/control")))
        .and(body_string_contains("action=cancel"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    endpoints::cancel_job(&Client::new(), &mock_server.uri(), "Bearer t", SID, 0)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_run_saved_search_pages_past_row_cap() {
    let mock_server = MockServer::start().await;
    mount_dispatch(&mock_server, "mcp_get_slow_network_nodes").await;

    // resultCount is 3 but the first response stops at 2 rows
    let rows = load_fixture("search/results_slow_nodes.json")["results"]
        .as_array()
        .cloned()
        .unwrap();

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{SID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_done_body(SID, 3)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{SID}/results")))
        .and(query_param("count", "0"))
        .and(query_param("offset", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "results": rows[..2].to_vec() })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{SID}/results")))
        .and(query_param("count", "0"))
        .and(query_param("offset", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "results": rows[2..].to_vec() })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = token_client(mock_server.uri());
    let run = client
        .run_saved_search(
            SavedSearchRequest::new("mcp_get_slow_network_nodes", namespace())
                .poll_interval(Duration::from_millis(10)),
        )
        .await
        .unwrap();

    assert_eq!(run.results, rows);
}

#[tokio::test]
async fn test_max_results_stops_after_one_page() {
    let mock_server = MockServer::start().await;
    mount_dispatch(&mock_server, "mcp_get_slow_network_nodes").await;

    let rows = load_fixture("search/results_slow_nodes.json")["results"]
        .as_array()
        .cloned()
        .unwrap();

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{SID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_done_body(SID, 3)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{SID}/results")))
        .and(query_param("count", "2"))
        .and(query_param("offset", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "results": rows[..2].to_vec() })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = token_client(mock_server.uri());
    let run = client
        .run_saved_search(
            SavedSearchRequest::new("mcp_get_slow_network_nodes", namespace())
                .poll_interval(Duration::from_millis(10))
                .max_results(2),
        )
        .await
        .unwrap();

    assert_eq!(run.results.len(), 2);
}
