// crates/ident-gate-client/src/client.rs
// ============================================================================
// Module: Ident Gate Broker Client
// Description: Client construction and shared response-mapping helpers.
// Purpose: Gate construction on configuration shape and broker trust.
// Dependencies: ident-gate-trust, serde_json
// ============================================================================

//! ## Overview
//! [`BrokerClient`] is the sole entry point to the broker API. Construction
//! validates configuration shape, then (when enabled) verifies that the
//! broker's resolved addresses fall inside the trusted ranges; any failure
//! aborts construction and no client value exists.
//! Invariants:
//! - Shape errors ([`BrokerClientError::Config`]) are raised before any
//!   range parsing or name resolution.
//! - Trust verification runs exactly once, at construction.
//! - Configuration is immutable afterwards; a client is safe to share
//!   across threads because its transport is.
//! - Per-call failures leave the client usable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use ident_gate_trust::HostResolver;
use ident_gate_trust::SystemResolver;
use ident_gate_trust::TrustedRanges;
use ident_gate_trust::verify_broker_uri;
use serde_json::Map;
use serde_json::Value;

use crate::call_site::CallSite;
use crate::config::BrokerClientConfig;
use crate::error::BrokerClientError;
use crate::transport::BrokerResponse;
use crate::transport::BrokerTransport;
use crate::transport::HttpTransport;

// ============================================================================
// SECTION: Records
// ============================================================================

/// A broker record: the domain fields of one JSON response body.
pub type Record = Map<String, Value>;

/// Transport-level status field stripped from returned records.
pub(crate) const STATUS_CODE_FIELD: &str = "status_code";

// ============================================================================
// SECTION: Client
// ============================================================================

/// Typed client for the identity broker API.
///
/// # Invariants
/// - A value of this type only exists after configuration validation and
///   (when enabled) broker trust verification both succeeded.
/// - Concurrent shared use is safe iff the transport is; the default
///   [`HttpTransport`] is.
pub struct BrokerClient {
    /// Validated construction configuration.
    config: BrokerClientConfig,
    /// Transport exchanging requests for status/body pairs.
    pub(crate) transport: Box<dyn BrokerTransport>,
}

impl core::fmt::Debug for BrokerClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BrokerClient")
            .field("config", &self.config)
            .field("transport", &"<dyn BrokerTransport>")
            .finish()
    }
}

impl BrokerClient {
    /// Builds a client over the default HTTP transport and system resolver.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Config`] for shape errors,
    /// [`BrokerClientError::Trust`] when the broker fails verification, and
    /// [`BrokerClientError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(config: BrokerClientConfig) -> Result<Self, BrokerClientError> {
        config.validate()?;
        let transport = Box::new(HttpTransport::new(&config)?);
        Self::with_parts(config, transport, &SystemResolver::new())
    }

    /// Builds a client over an injected transport and resolver.
    ///
    /// Construction behaves exactly as [`BrokerClient::new`]; this is the
    /// seam used by tests and embedders with custom transports.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`BrokerClient::new`], minus transport
    /// construction failures.
    pub fn with_parts(
        config: BrokerClientConfig,
        transport: Box<dyn BrokerTransport>,
        resolver: &dyn HostResolver,
    ) -> Result<Self, BrokerClientError> {
        config.validate()?;
        if config.options.assert_valid_broker_ip {
            let ranges = TrustedRanges::parse(&config.options.trusted_ip_ranges)
                .map_err(|err| BrokerClientError::Config(err.to_string()))?;
            verify_broker_uri(&config.base_uri, &ranges, resolver)?;
        }
        Ok(Self {
            config,
            transport,
        })
    }

    /// Returns the validated construction configuration.
    #[must_use]
    pub const fn config(&self) -> &BrokerClientConfig {
        &self.config
    }
}

// ============================================================================
// SECTION: Response Mapping Helpers
// ============================================================================

/// Extracts a record from a response body, stripping the status field.
///
/// # Errors
///
/// Returns [`BrokerClientError::Service`] when the body is not a JSON
/// object.
pub(crate) fn object_body(
    call_site: CallSite,
    response: &BrokerResponse,
) -> Result<Record, BrokerClientError> {
    let Value::Object(map) = &response.body else {
        return Err(service_error(call_site, response));
    };
    let mut record = map.clone();
    record.remove(STATUS_CODE_FIELD);
    Ok(record)
}

/// Extracts a list of records from a response body.
///
/// # Errors
///
/// Returns [`BrokerClientError::Service`] when the body is not a JSON array
/// of objects.
pub(crate) fn list_body(
    call_site: CallSite,
    response: &BrokerResponse,
) -> Result<Vec<Record>, BrokerClientError> {
    let Value::Array(items) = &response.body else {
        return Err(service_error(call_site, response));
    };
    let mut records = Vec::with_capacity(items.len());
    for item in items {
        let Value::Object(map) = item else {
            return Err(service_error(call_site, response));
        };
        let mut record = map.clone();
        record.remove(STATUS_CODE_FIELD);
        records.push(record);
    }
    Ok(records)
}

/// Builds the service error for an unexpected status or body shape.
pub(crate) fn service_error(call_site: CallSite, response: &BrokerResponse) -> BrokerClientError {
    BrokerClientError::Service {
        call_site,
        status: response.status,
        body: render_body(&response.body),
    }
}

/// Renders a response body for embedding in error messages.
fn render_body(body: &Value) -> String {
    match body {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
