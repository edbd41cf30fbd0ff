// crates/ident-gate-trust/src/lib.rs
// ============================================================================
// Module: Ident Gate Trust Library
// Description: Trusted-range matching and broker host verification.
// Purpose: Gate client construction on broker network location.
// Dependencies: ipnet, thiserror, url
// ============================================================================

//! ## Overview
//! Ident Gate Trust answers one question: does the configured broker URI
//! resolve entirely inside the operator's trusted IP ranges? It provides
//! [`TrustedRanges`] for CIDR membership, the [`HostResolver`] seam with a
//! [`SystemResolver`] implementation, and [`verify_broker_uri`] tying them
//! together.
//! Invariants:
//! - Range parsing fails closed; no partially parsed range set exists.
//! - Verification requires every resolved address to be trusted.
//! - Verification is a one-time construction gate, never a per-call check.
//!
//! Security posture: defends against a broker hostname resolving to an
//! unexpected network location (DNS hijack, misconfiguration); see
//! `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod ranges;
pub mod resolver;
pub mod verifier;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::TrustError;
pub use ranges::IpBlock;
pub use ranges::TrustedRanges;
pub use resolver::HostResolver;
pub use resolver::SystemResolver;
pub use verifier::verify_broker_uri;
