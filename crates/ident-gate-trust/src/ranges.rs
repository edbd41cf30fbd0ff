// crates/ident-gate-trust/src/ranges.rs
// ============================================================================
// Module: Ident Gate Trusted Ranges
// Description: CIDR block parsing and membership queries for trusted ranges.
// Purpose: Answer whether a resolved broker address falls inside trusted space.
// Dependencies: ipnet
// ============================================================================

//! ## Overview
//! [`TrustedRanges`] holds an ordered collection of [`IpBlock`] values parsed
//! from CIDR specifier strings and answers purely numeric membership queries.
//! Invariants:
//! - Blocks are immutable once parsed.
//! - Malformed specifiers fail construction; no partial range set exists.
//! - Membership is prefix matching, never string comparison.
//! - An IPv4 block never contains an IPv6 address and vice versa.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::net::IpAddr;

use ipnet::IpNet;

use crate::error::TrustError;

// ============================================================================
// SECTION: IP Block
// ============================================================================

/// A single immutable IP network block in CIDR form.
///
/// # Invariants
/// - The base address and prefix length never change after parsing.
/// - Network and broadcast addresses of the block are members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpBlock {
    /// Parsed network value backing membership queries.
    net: IpNet,
}

impl IpBlock {
    /// Parses a CIDR specifier such as `10.0.0.0/8` or `2001:db8::/32`.
    ///
    /// A bare address parses as a host-length block (`/32` or `/128`).
    ///
    /// # Errors
    ///
    /// Returns [`TrustError::InvalidRange`] when the specifier is malformed.
    pub fn parse(specifier: &str) -> Result<Self, TrustError> {
        let trimmed = specifier.trim();
        if trimmed.is_empty() {
            return Err(TrustError::InvalidRange {
                specifier: specifier.to_string(),
                reason: "empty specifier".to_string(),
            });
        }
        if let Ok(address) = trimmed.parse::<IpAddr>() {
            return Ok(Self {
                net: IpNet::from(address),
            });
        }
        trimmed
            .parse::<IpNet>()
            .map(|net| Self {
                net,
            })
            .map_err(|err| TrustError::InvalidRange {
                specifier: specifier.to_string(),
                reason: err.to_string(),
            })
    }

    /// Returns true when the address falls inside this block.
    #[must_use]
    pub fn contains(&self, address: IpAddr) -> bool {
        self.net.contains(&address)
    }

    /// Returns the block's prefix length in bits.
    #[must_use]
    pub fn prefix_len(&self) -> u8 {
        self.net.prefix_len()
    }
}

impl fmt::Display for IpBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.net.fmt(f)
    }
}

// ============================================================================
// SECTION: Trusted Ranges
// ============================================================================

/// An ordered collection of trusted IP blocks.
///
/// # Invariants
/// - Construction is all-or-nothing; one malformed specifier fails the set.
/// - Specifier order is preserved; it affects only match short-circuiting,
///   never the boolean result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustedRanges {
    /// Parsed blocks in configuration order.
    blocks: Vec<IpBlock>,
}

impl TrustedRanges {
    /// Parses an ordered sequence of CIDR specifier strings.
    ///
    /// # Errors
    ///
    /// Returns [`TrustError::InvalidRange`] for the first malformed specifier.
    pub fn parse<I, S>(specifiers: I) -> Result<Self, TrustError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let blocks = specifiers
            .into_iter()
            .map(|specifier| IpBlock::parse(specifier.as_ref()))
            .collect::<Result<Vec<IpBlock>, TrustError>>()?;
        Ok(Self {
            blocks,
        })
    }

    /// Returns true when any block contains the address.
    #[must_use]
    pub fn contains(&self, address: IpAddr) -> bool {
        self.blocks.iter().any(|block| block.contains(address))
    }

    /// Returns true when no blocks are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns the number of configured blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the parsed blocks in configuration order.
    #[must_use]
    pub fn blocks(&self) -> &[IpBlock] {
        &self.blocks
    }
}
