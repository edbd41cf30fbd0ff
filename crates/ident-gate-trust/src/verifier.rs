// crates/ident-gate-trust/src/verifier.rs
// ============================================================================
// Module: Ident Gate Broker Verifier
// Description: Construction-time trust verification for broker URIs.
// Purpose: Refuse brokers whose hosts resolve outside the trusted ranges.
// Dependencies: url
// ============================================================================

//! ## Overview
//! [`verify_broker_uri`] parses the configured broker URI, resolves its host,
//! and requires every resolved address to fall inside the trusted ranges.
//! Invariants:
//! - URI-shape failures are reported before any resolution is attempted.
//! - A single untrusted resolved address fails the whole verification.
//! - Verification runs once at client construction; it is never re-run per
//!   call, so a later DNS change is not detected. One-time trust
//!   establishment is a documented limitation, not per-request pinning; see
//!   `Docs/security/threat_model.md`.
//!
//! Security posture: the broker URI is operator-supplied but the addresses it
//! resolves to are not; treat resolution output as untrusted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use url::Url;

use crate::error::TrustError;
use crate::ranges::TrustedRanges;
use crate::resolver::HostResolver;

// ============================================================================
// SECTION: Verification
// ============================================================================

/// Verifies that the broker URI resolves entirely inside the trusted ranges.
///
/// # Errors
///
/// Returns [`TrustError::InvalidBrokerUri`] when the URI cannot be parsed or
/// carries no host, [`TrustError::UnresolvableHost`] when resolution fails,
/// and [`TrustError::UntrustedBroker`] when any resolved address falls
/// outside `ranges`.
pub fn verify_broker_uri(
    base_uri: &str,
    ranges: &TrustedRanges,
    resolver: &dyn HostResolver,
) -> Result<(), TrustError> {
    let url = Url::parse(base_uri)
        .map_err(|err| TrustError::InvalidBrokerUri(format!("{base_uri}: {err}")))?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(TrustError::InvalidBrokerUri(format!(
                "{base_uri}: unsupported scheme {scheme}"
            )));
        }
    }
    let host = url
        .host_str()
        .ok_or_else(|| TrustError::InvalidBrokerUri(format!("{base_uri}: missing host")))?;
    let host = strip_brackets(host);
    let port = url
        .port_or_known_default()
        .ok_or_else(|| TrustError::InvalidBrokerUri(format!("{base_uri}: missing port")))?;

    let addresses = resolver.resolve(host, port)?;
    if addresses.is_empty() {
        return Err(TrustError::UnresolvableHost(format!("{host}: no addresses resolved")));
    }
    for address in addresses {
        if !ranges.contains(address) {
            return Err(TrustError::UntrustedBroker {
                address,
            });
        }
    }
    Ok(())
}

/// Strips IPv6 brackets from a URL host component.
fn strip_brackets(host: &str) -> &str {
    host.strip_prefix('[').and_then(|inner| inner.strip_suffix(']')).unwrap_or(host)
}
