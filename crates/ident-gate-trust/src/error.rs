// crates/ident-gate-trust/src/error.rs
// ============================================================================
// Module: Ident Gate Trust Errors
// Description: Error types for trusted-range parsing and broker verification.
// Purpose: Distinguish configuration-shape failures from trust failures.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Errors emitted while parsing trusted ranges and verifying broker hosts.
//! Invariants:
//! - Variants are stable for programmatic handling by the client crate.
//! - [`TrustError::InvalidRange`] is a configuration-shape error and is
//!   raised before any name resolution is attempted.
//!
//! Security posture: error payloads may echo configured specifiers and
//! resolved addresses; they never carry credentials.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::IpAddr;

use thiserror::Error;

// ============================================================================
// SECTION: Trust Errors
// ============================================================================

/// Errors emitted by trusted-range parsing and broker verification.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrustError {
    /// A configured range specifier failed to parse as CIDR notation.
    #[error("invalid trusted range specifier: {specifier}: {reason}")]
    InvalidRange {
        /// The specifier as configured.
        specifier: String,
        /// Parse failure detail.
        reason: String,
    },
    /// The broker URI could not be parsed or carries no usable host.
    #[error("the configured broker URI is not valid: {0}")]
    InvalidBrokerUri(String),
    /// The broker host could not be resolved to any address.
    #[error("could not resolve broker URI: {0}")]
    UnresolvableHost(String),
    /// The broker resolved to an address outside the trusted ranges.
    #[error("broker resolves to an IP address outside the trusted ranges: {address}")]
    UntrustedBroker {
        /// The offending resolved address.
        address: IpAddr,
    },
}
