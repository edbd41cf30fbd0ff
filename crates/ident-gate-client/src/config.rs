// crates/ident-gate-client/src/config.rs
// ============================================================================
// Module: Ident Gate Client Configuration
// Description: Construction surface and fail-closed validation for the client.
// Purpose: Validate configuration shape before any network activity.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`BrokerClientConfig`] is the full construction surface of the client:
//! broker base URI, access token, trusted ranges, the trust-check toggle,
//! and HTTP tuning. Configuration is immutable after construction.
//! Invariants:
//! - Shape validation runs before any range parsing or name resolution, so
//!   configuration errors are distinguishable from trust failures.
//! - When `assert_valid_broker_ip` is enabled, `trusted_ip_ranges` must be
//!   non-empty.
//! - `Debug` output never contains the access token.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;

use crate::error::BrokerClientError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default user agent for outbound requests.
pub const DEFAULT_USER_AGENT: &str = "ident-gate/0.1";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// HTTP transport tuning options.
///
/// # Invariants
/// - `timeout_ms` applies to the full request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpOptions {
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Client options beyond the required base URI and token.
///
/// # Invariants
/// - `assert_valid_broker_ip` defaults to enabled; disabling it is an
///   explicit operator decision.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrokerClientOptions {
    /// Trusted CIDR range specifiers for the broker's resolved addresses.
    pub trusted_ip_ranges: Vec<String>,
    /// Whether to verify the broker's resolved addresses at construction.
    pub assert_valid_broker_ip: bool,
    /// HTTP transport tuning, accepted as `http_client_options` on the wire.
    #[serde(rename = "http_client_options")]
    pub http: HttpOptions,
}

impl Default for BrokerClientOptions {
    fn default() -> Self {
        Self {
            trusted_ip_ranges: Vec::new(),
            assert_valid_broker_ip: true,
            http: HttpOptions::default(),
        }
    }
}

/// Full construction surface for [`crate::client::BrokerClient`].
///
/// # Invariants
/// - Owned exclusively by one client instance; immutable after construction.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct BrokerClientConfig {
    /// Broker base URI (scheme, host, optional port).
    pub base_uri: String,
    /// Bearer access token presented on every request.
    pub access_token: String,
    /// Optional client settings.
    #[serde(default)]
    pub options: BrokerClientOptions,
}

impl fmt::Debug for BrokerClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerClientConfig")
            .field("base_uri", &self.base_uri)
            .field("access_token", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

impl BrokerClientConfig {
    /// Validates configuration shape before any network activity.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Config`] when the base URI or access
    /// token is empty, or when trust checking is enabled without any
    /// trusted ranges.
    pub fn validate(&self) -> Result<(), BrokerClientError> {
        if self.base_uri.trim().is_empty() {
            return Err(BrokerClientError::Config(
                "broker base URI must not be empty".to_string(),
            ));
        }
        if self.access_token.trim().is_empty() {
            return Err(BrokerClientError::Config(
                "broker access token must not be empty".to_string(),
            ));
        }
        if self.options.assert_valid_broker_ip && self.options.trusted_ip_ranges.is_empty() {
            return Err(BrokerClientError::Config(
                "trusted_ip_ranges must not be empty when assert_valid_broker_ip is enabled"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
