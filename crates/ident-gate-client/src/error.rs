// crates/ident-gate-client/src/error.rs
// ============================================================================
// Module: Ident Gate Client Errors
// Description: Error taxonomy for broker client construction and calls.
// Purpose: Separate configuration, trust, transport, and service failures.
// Dependencies: ident-gate-trust, thiserror
// ============================================================================

//! ## Overview
//! [`BrokerClientError`] covers every failure the client can surface.
//! Invariants:
//! - [`BrokerClientError::Trust`] is raised only during construction; no
//!   partially built client exists.
//! - [`BrokerClientError::Config`] covers malformed construction arguments
//!   and malformed per-call identifiers, both rejected before any network
//!   activity.
//! - Expected domain outcomes (not found, bad credentials, failed MFA
//!   values) are never errors; they surface as `None`/`false` returns.
//! - [`BrokerClientError::Service`] embeds the raw response body and a
//!   stable per-call-site code so operators can tell call sites apart.
//!
//! Security posture: service-error payloads carry untrusted broker text
//! verbatim; they never carry the access token.

// ============================================================================
// SECTION: Imports
// ============================================================================

use ident_gate_trust::TrustError;
use thiserror::Error;

use crate::call_site::CallSite;

// ============================================================================
// SECTION: Client Errors
// ============================================================================

/// Errors emitted by the broker client.
///
/// # Invariants
/// - Variants are stable for programmatic handling and tests.
/// - String payloads are user-facing and may include untrusted server text.
#[derive(Debug, Error)]
pub enum BrokerClientError {
    /// Caller-supplied arguments are missing or malformed.
    #[error("broker client config error: {0}")]
    Config(String),
    /// Construction-time trust verification failed.
    #[error(transparent)]
    Trust(#[from] TrustError),
    /// The request could not be sent or the response could not be read.
    #[error("broker transport error: {0}")]
    Transport(String),
    /// MFA verification hit the broker's rate limit (HTTP 429).
    #[error("mfa verification rate limited for employee {employee_id}")]
    MfaRateLimited {
        /// Employee whose verification was rate limited.
        employee_id: String,
    },
    /// An operation received a status code not listed for it.
    #[error(
        "unexpected broker response [{}] during {}: status {status}: {body}",
        .call_site.code(),
        .call_site.name()
    )]
    Service {
        /// Call site that received the unexpected status.
        call_site: CallSite,
        /// HTTP status code as received.
        status: u16,
        /// Raw response body rendered as text.
        body: String,
    },
}
