// crates/ident-gate-client/src/transport.rs
// ============================================================================
// Module: Ident Gate Broker Transport
// Description: Transport seam and blocking HTTP implementation.
// Purpose: Exchange one request for one status code plus parsed JSON body.
// Dependencies: reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! [`BrokerTransport`] is the seam between the client's status-mapping core
//! and the wire. [`HttpTransport`] backs it with a blocking reqwest client.
//! Invariants:
//! - Redirects are refused.
//! - Response bodies are capped at [`MAX_RESPONSE_BYTES`].
//! - Every request carries the bearer token and JSON accept header.
//! - The status code is surfaced verbatim; interpretation happens upstream.
//!
//! Security posture: response bodies are untrusted broker output; they are
//! parsed as JSON but never interpreted here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use serde_json::Value;
use url::Url;

use crate::config::BrokerClientConfig;
use crate::error::BrokerClientError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum response body size accepted from the broker.
pub const MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

// ============================================================================
// SECTION: Request and Response Types
// ============================================================================

/// HTTP methods used by broker operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP DELETE.
    Delete,
}

/// One broker request as built by an operation method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerRequest {
    /// HTTP method for the operation.
    pub method: HttpMethod,
    /// Absolute path below the broker base URI.
    pub path: String,
    /// Optional JSON request payload.
    pub body: Option<Value>,
}

/// One broker response as surfaced to the status-mapping core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerResponse {
    /// HTTP status code as received.
    pub status: u16,
    /// Parsed JSON body; `Value::Null` for empty bodies, `Value::String`
    /// for bodies that are not valid JSON.
    pub body: Value,
}

// ============================================================================
// SECTION: Transport Trait
// ============================================================================

/// Exchanges one broker request for one response.
pub trait BrokerTransport: Send + Sync {
    /// Executes the request and returns the raw status plus parsed body.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Transport`] when the request cannot be
    /// sent or the response cannot be read.
    fn execute(&self, request: &BrokerRequest) -> Result<BrokerResponse, BrokerClientError>;
}

// ============================================================================
// SECTION: HTTP Transport
// ============================================================================

/// Blocking HTTP transport over reqwest.
///
/// # Invariants
/// - The underlying client never follows redirects.
/// - Safe for concurrent shared use; the blocking client is internally
///   synchronized.
pub struct HttpTransport {
    /// HTTP client used for broker requests.
    client: Client,
    /// Parsed broker base URL.
    base_url: Url,
    /// Bearer token presented on every request.
    access_token: String,
}

impl HttpTransport {
    /// Builds the transport from a validated client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Config`] when the base URI does not
    /// parse, and [`BrokerClientError::Transport`] when the HTTP client
    /// cannot be constructed.
    pub fn new(config: &BrokerClientConfig) -> Result<Self, BrokerClientError> {
        let base_url = Url::parse(&config.base_uri).map_err(|err| {
            BrokerClientError::Config(format!("invalid broker base URI: {err}"))
        })?;
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(Duration::from_millis(config.options.http.timeout_ms))
            .user_agent(config.options.http.user_agent.clone())
            .build()
            .map_err(|err| BrokerClientError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url,
            access_token: config.access_token.clone(),
        })
    }
}

impl BrokerTransport for HttpTransport {
    fn execute(&self, request: &BrokerRequest) -> Result<BrokerResponse, BrokerClientError> {
        let url = self
            .base_url
            .join(&request.path)
            .map_err(|err| BrokerClientError::Transport(format!("invalid request path: {err}")))?;
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url.clone()),
            HttpMethod::Post => self.client.post(url.clone()),
            HttpMethod::Put => self.client.put(url.clone()),
            HttpMethod::Delete => self.client.delete(url.clone()),
        };
        builder = builder
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
            .header(ACCEPT, "application/json");
        if let Some(body) = &request.body {
            let bytes = serde_json::to_vec(body).map_err(|err| {
                BrokerClientError::Transport(format!("request serialization failed: {err}"))
            })?;
            builder = builder.header(CONTENT_TYPE, "application/json").body(bytes);
        }
        let response =
            builder.send().map_err(|err| BrokerClientError::Transport(err.to_string()))?;
        if response.url() != &url {
            return Err(BrokerClientError::Transport(format!(
                "redirected from {} to {}",
                url,
                response.url()
            )));
        }
        let status = response.status().as_u16();
        let bytes = read_response_limited(response)?;
        Ok(BrokerResponse {
            status,
            body: parse_body(&bytes),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads the response body while enforcing [`MAX_RESPONSE_BYTES`].
fn read_response_limited(
    response: reqwest::blocking::Response,
) -> Result<Vec<u8>, BrokerClientError> {
    let max_bytes = u64::try_from(MAX_RESPONSE_BYTES)
        .map_err(|_| BrokerClientError::Transport("response size limit exceeds u64".to_string()))?;
    if let Some(length) = response.content_length()
        && length > max_bytes
    {
        return Err(BrokerClientError::Transport(format!(
            "response exceeds size limit: {length} bytes (max {MAX_RESPONSE_BYTES})"
        )));
    }
    let mut bytes = Vec::new();
    let limit = max_bytes.saturating_add(1);
    let mut limited = response.take(limit);
    limited
        .read_to_end(&mut bytes)
        .map_err(|err| BrokerClientError::Transport(err.to_string()))?;
    if bytes.len() > MAX_RESPONSE_BYTES {
        return Err(BrokerClientError::Transport(format!(
            "response exceeds size limit: max {MAX_RESPONSE_BYTES} bytes"
        )));
    }
    Ok(bytes)
}

/// Parses response bytes as JSON, falling back to a string value.
fn parse_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).to_string()))
}
