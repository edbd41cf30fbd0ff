// crates/ident-gate-client/tests/http_transport_tests.rs
// ============================================================================
// Module: HTTP Transport Tests
// Description: End-to-end client behavior against a local stub broker.
// Purpose: Prove header discipline, body parsing, and fail-closed limits.
// Dependencies: ident-gate-client, tiny_http
// ============================================================================

//! ## Overview
//! Runs the real blocking transport against `tiny_http` servers bound to the
//! loopback interface. Construction goes through the system resolver's
//! IP-literal path, so trust verification is exercised end to end without
//! DNS.

#![allow(dead_code, reason = "Common module may have unused helpers.")]
#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::thread;

use ident_gate_client::BrokerClient;
use ident_gate_client::BrokerClientConfig;
use ident_gate_client::BrokerClientError;
use ident_gate_client::BrokerClientOptions;
use ident_gate_client::HttpOptions;
use ident_gate_client::MAX_RESPONSE_BYTES;
use ident_gate_trust::TrustError;
use serde_json::json;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Builds a client configuration for a loopback broker.
fn loopback_config(url: &str) -> BrokerClientConfig {
    BrokerClientConfig {
        base_uri: url.to_string(),
        access_token: "token-123".to_string(),
        options: BrokerClientOptions {
            trusted_ip_ranges: vec!["127.0.0.0/8".to_string()],
            assert_valid_broker_ip: true,
            http: HttpOptions::default(),
        },
    }
}

/// Captured request metadata returned by the stub server thread.
struct CapturedRequest {
    /// Request method as text.
    method: String,
    /// Request path with query.
    url: String,
    /// Authorization header value, when present.
    authorization: Option<String>,
    /// Accept header value, when present.
    accept: Option<String>,
}

/// Serves exactly one response and captures the incoming request.
fn one_shot_server(response: Response<std::io::Cursor<Vec<u8>>>) -> (String, thread::JoinHandle<CapturedRequest>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let url = format!("http://{addr}");
    let handle = thread::spawn(move || {
        let request = server.recv().unwrap();
        let header_value = |field: &'static str| {
            request
                .headers()
                .iter()
                .find(|header| header.field.equiv(field))
                .map(|header| header.value.as_str().to_string())
        };
        let captured = CapturedRequest {
            method: request.method().as_str().to_string(),
            url: request.url().to_string(),
            authorization: header_value("Authorization"),
            accept: header_value("Accept"),
        };
        request.respond(response).unwrap();
        captured
    });
    (url, handle)
}

/// Builds a JSON response with the given status code.
fn json_response(status: u16, body: &str) -> Response<std::io::Cursor<Vec<u8>>> {
    let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
    Response::from_string(body).with_status_code(status).with_header(header)
}

// ============================================================================
// SECTION: Request Discipline
// ============================================================================

#[test]
fn get_user_sends_bearer_auth_and_parses_the_record() {
    let (url, handle) = one_shot_server(json_response(
        200,
        r#"{"employee_id":"42","username":"jdoe","status_code":200}"#,
    ));
    let client = BrokerClient::new(loopback_config(&url)).unwrap();
    let user = client.get_user("42").unwrap().unwrap();
    assert_eq!(user.get("employee_id"), Some(&json!("42")));
    assert_eq!(user.get("status_code"), None);

    let captured = handle.join().unwrap();
    assert_eq!(captured.method, "GET");
    assert_eq!(captured.url, "/api/v1/users/42");
    assert_eq!(captured.authorization.as_deref(), Some("Bearer token-123"));
    assert_eq!(captured.accept.as_deref(), Some("application/json"));
}

#[test]
fn empty_204_bodies_surface_as_absence() {
    let (url, handle) = one_shot_server(Response::from_string("").with_status_code(204));
    let client = BrokerClient::new(loopback_config(&url)).unwrap();
    assert!(client.get_user("nonexistent").unwrap().is_none());
    handle.join().unwrap();
}

#[test]
fn any_2xx_site_status_reports_ok() {
    let (url, handle) = one_shot_server(Response::from_string("").with_status_code(201));
    let client = BrokerClient::new(loopback_config(&url)).unwrap();
    assert_eq!(client.get_site_status().unwrap(), "OK");
    handle.join().unwrap();
}

// ============================================================================
// SECTION: Failure Surfaces
// ============================================================================

#[test]
fn non_json_error_bodies_are_embedded_in_service_errors() {
    let (url, handle) = one_shot_server(Response::from_string("oops").with_status_code(500));
    let client = BrokerClient::new(loopback_config(&url)).unwrap();
    let err = client.get_user("42").unwrap_err();
    let BrokerClientError::Service {
        status,
        body,
        ..
    } = err
    else {
        panic!("expected Service, got {err:?}");
    };
    assert_eq!(status, 500);
    assert_eq!(body, "oops");
    handle.join().unwrap();
}

#[test]
fn redirects_are_not_followed() {
    let header = Header::from_bytes(&b"Location"[..], &b"http://203.0.113.9/"[..]).unwrap();
    let (url, handle) =
        one_shot_server(Response::from_string("").with_status_code(302).with_header(header));
    let client = BrokerClient::new(loopback_config(&url)).unwrap();
    let err = client.get_user("42").unwrap_err();
    let BrokerClientError::Service {
        status, ..
    } = err
    else {
        panic!("expected Service, got {err:?}");
    };
    assert_eq!(status, 302);
    handle.join().unwrap();
}

#[test]
fn oversized_responses_fail_closed() {
    let oversized = "a".repeat(MAX_RESPONSE_BYTES + 16);
    let (url, handle) = one_shot_server(Response::from_string(oversized).with_status_code(200));
    let client = BrokerClient::new(loopback_config(&url)).unwrap();
    let err = client.get_user("42").unwrap_err();
    assert!(matches!(err, BrokerClientError::Transport(_)));
    drop(handle);
}

// ============================================================================
// SECTION: Construction Trust Gate
// ============================================================================

#[test]
fn untrusted_loopback_broker_is_refused_at_construction() {
    let mut config = loopback_config("http://127.0.0.1:1");
    config.options.trusted_ip_ranges = vec!["10.0.0.0/8".to_string()];
    let err = BrokerClient::new(config).unwrap_err();
    assert!(matches!(
        err,
        BrokerClientError::Trust(TrustError::UntrustedBroker { .. })
    ));
}

#[test]
fn trusted_loopback_broker_constructs_without_a_request() {
    let client = BrokerClient::new(loopback_config("http://127.0.0.1:1")).unwrap();
    assert_eq!(client.config().base_uri, "http://127.0.0.1:1");
}
