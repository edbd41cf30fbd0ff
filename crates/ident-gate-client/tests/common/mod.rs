// crates/ident-gate-client/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared helpers for ident-gate-client tests.
// Purpose: Provide stub transports, fixed resolvers, and config builders.
// Dependencies: ident-gate-client, ident-gate-trust, serde_json
// ============================================================================

//! ## Overview
//! Provides the scripted [`StubTransport`], a fixed-outcome resolver, and
//! configuration builders shared by the client test suites.

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

use std::collections::VecDeque;
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::Mutex;

use ident_gate_client::BrokerClient;
use ident_gate_client::BrokerClientConfig;
use ident_gate_client::BrokerClientOptions;
use ident_gate_client::BrokerRequest;
use ident_gate_client::BrokerResponse;
use ident_gate_client::BrokerTransport;
use ident_gate_client::HttpOptions;
use ident_gate_client::error::BrokerClientError;
use ident_gate_trust::HostResolver;
use ident_gate_trust::TrustError;
use serde_json::Value;

// ============================================================================
// SECTION: Stub Transport
// ============================================================================

/// Scripted stub state shared between the client and the test body.
struct StubInner {
    /// Scripted responses, consumed front to back.
    responses: Mutex<VecDeque<BrokerResponse>>,
    /// Requests recorded in execution order.
    requests: Mutex<Vec<BrokerRequest>>,
}

/// Transport returning scripted responses and recording requests.
#[derive(Clone)]
pub struct StubTransport {
    /// Shared stub state.
    inner: Arc<StubInner>,
}

impl StubTransport {
    /// Creates a stub scripted with a single response.
    pub fn returning(status: u16, body: Value) -> Self {
        Self::with_responses(vec![BrokerResponse {
            status,
            body,
        }])
    }

    /// Creates a stub scripted with a response sequence.
    pub fn with_responses(responses: Vec<BrokerResponse>) -> Self {
        Self {
            inner: Arc::new(StubInner {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Returns the requests recorded so far.
    pub fn requests(&self) -> Vec<BrokerRequest> {
        self.inner.requests.lock().unwrap().clone()
    }
}

impl BrokerTransport for StubTransport {
    fn execute(&self, request: &BrokerRequest) -> Result<BrokerResponse, BrokerClientError> {
        self.inner.requests.lock().unwrap().push(request.clone());
        self.inner
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| BrokerClientError::Transport("stub transport exhausted".to_string()))
    }
}

// ============================================================================
// SECTION: Fixed Resolver
// ============================================================================

/// Resolver returning a fixed address list or a fixed failure.
pub struct FixedResolver {
    /// Scripted resolution outcome.
    outcome: Result<Vec<IpAddr>, TrustError>,
}

impl FixedResolver {
    /// Creates a resolver yielding the given address literals.
    pub fn resolving(addresses: &[&str]) -> Self {
        Self {
            outcome: Ok(addresses.iter().map(|a| a.parse().unwrap()).collect()),
        }
    }

    /// Creates a resolver that always fails resolution.
    pub fn failing() -> Self {
        Self {
            outcome: Err(TrustError::UnresolvableHost(
                "broker.example.com: simulated".to_string(),
            )),
        }
    }
}

impl HostResolver for FixedResolver {
    fn resolve(&self, _host: &str, _port: u16) -> Result<Vec<IpAddr>, TrustError> {
        self.outcome.clone()
    }
}

/// Resolver inside the sample config's trusted ranges.
pub fn trusted_resolver() -> FixedResolver {
    FixedResolver::resolving(&["198.51.100.7"])
}

// ============================================================================
// SECTION: Config Builders
// ============================================================================

/// Builds a valid configuration with trust checking enabled.
pub fn sample_config() -> BrokerClientConfig {
    BrokerClientConfig {
        base_uri: "https://broker.example.com".to_string(),
        access_token: "token-123".to_string(),
        options: BrokerClientOptions {
            trusted_ip_ranges: vec!["198.51.100.0/24".to_string()],
            assert_valid_broker_ip: true,
            http: HttpOptions::default(),
        },
    }
}

/// Builds a client over a scripted stub transport.
pub fn stub_client(status: u16, body: Value) -> (BrokerClient, StubTransport) {
    stub_client_with_sequence(vec![(status, body)])
}

/// Builds a client over a stub scripted with a response sequence.
pub fn stub_client_with_sequence(responses: Vec<(u16, Value)>) -> (BrokerClient, StubTransport) {
    let stub = StubTransport::with_responses(
        responses
            .into_iter()
            .map(|(status, body)| BrokerResponse {
                status,
                body,
            })
            .collect(),
    );
    let client =
        BrokerClient::with_parts(sample_config(), Box::new(stub.clone()), &trusted_resolver())
            .unwrap();
    (client, stub)
}
