// crates/ident-gate-client/src/lib.rs
// ============================================================================
// Module: Ident Gate Client Library
// Description: Typed client for the identity broker HTTP API.
// Purpose: Gate construction on broker trust and map statuses to outcomes.
// Dependencies: ident-gate-trust, reqwest, serde, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! Ident Gate Client exposes one method per broker operation — user CRUD,
//! authentication, MFA management, and recovery-method management — over a
//! blocking transport. Construction validates configuration shape and, by
//! default, verifies that the broker's resolved addresses fall inside the
//! configured trusted IP ranges; verification failure aborts construction.
//! Invariants:
//! - Expected domain outcomes (not found, bad credentials, failed MFA
//!   values) are plain return values; unexpected statuses are typed errors
//!   carrying a stable call-site code.
//! - Returned records never contain the transport-level status field.
//! - No retries, no caching, no per-call re-verification: one request per
//!   method call, one trust check per client lifetime.
//!
//! Concurrency: a constructed client is immutable. Sharing it across
//! threads is safe exactly when the transport is safe for concurrent use;
//! the default [`HttpTransport`] is, because the blocking reqwest client is
//! internally synchronized. Custom [`BrokerTransport`] implementations must
//! uphold this themselves.
//!
//! Security posture: broker responses are untrusted input; see
//! `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod call_site;
pub mod client;
pub mod config;
pub mod error;
pub mod operations;
pub mod transport;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use call_site::CallSite;
pub use client::BrokerClient;
pub use client::Record;
pub use config::BrokerClientConfig;
pub use config::BrokerClientOptions;
pub use config::HttpOptions;
pub use error::BrokerClientError;
pub use operations::UserProfile;
pub use transport::BrokerRequest;
pub use transport::BrokerResponse;
pub use transport::BrokerTransport;
pub use transport::HttpMethod;
pub use transport::HttpTransport;
pub use transport::MAX_RESPONSE_BYTES;
