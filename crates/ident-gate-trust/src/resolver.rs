// crates/ident-gate-trust/src/resolver.rs
// ============================================================================
// Module: Ident Gate Host Resolver
// Description: Name-resolution seam for broker trust verification.
// Purpose: Resolve broker hostnames to candidate peer addresses.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`HostResolver`] is the injectable resolution seam used by broker
//! verification; [`SystemResolver`] backs it with the platform resolver.
//! Invariants:
//! - IP-literal hosts resolve to themselves without a DNS query.
//! - Resolution failures and empty results fail closed.
//! - Returned address lists are deduplicated in resolution order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::IpAddr;
use std::net::ToSocketAddrs;

use crate::error::TrustError;

// ============================================================================
// SECTION: Resolver Trait
// ============================================================================

/// Resolves a hostname to candidate peer addresses.
pub trait HostResolver: Send + Sync {
    /// Resolves the host to one or more addresses.
    ///
    /// # Errors
    ///
    /// Returns [`TrustError::UnresolvableHost`] when resolution fails or
    /// yields no addresses.
    fn resolve(&self, host: &str, port: u16) -> Result<Vec<IpAddr>, TrustError>;
}

// ============================================================================
// SECTION: System Resolver
// ============================================================================

/// Host resolver backed by the platform's standard resolution mechanism.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl SystemResolver {
    /// Creates a new system resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl HostResolver for SystemResolver {
    fn resolve(&self, host: &str, port: u16) -> Result<Vec<IpAddr>, TrustError> {
        if let Ok(address) = host.parse::<IpAddr>() {
            return Ok(vec![address]);
        }
        let mut addresses = (host, port)
            .to_socket_addrs()
            .map(|iter| iter.map(|addr| addr.ip()).collect::<Vec<IpAddr>>())
            .map_err(|err| TrustError::UnresolvableHost(format!("{host}: {err}")))?;
        if addresses.is_empty() {
            return Err(TrustError::UnresolvableHost(format!("{host}: no addresses resolved")));
        }
        dedupe_addresses(&mut addresses);
        Ok(addresses)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Removes duplicate addresses while preserving resolution order.
fn dedupe_addresses(addresses: &mut Vec<IpAddr>) {
    let mut unique = Vec::with_capacity(addresses.len());
    for address in addresses.drain(..) {
        if !unique.contains(&address) {
            unique.push(address);
        }
    }
    *addresses = unique;
}
