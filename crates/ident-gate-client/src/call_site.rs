// crates/ident-gate-client/src/call_site.rs
// ============================================================================
// Module: Ident Gate Call Sites
// Description: Stable identifiers for each broker operation call site.
// Purpose: Let service errors name the exact operation that failed.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`CallSite`] enumerates every broker operation the client exposes. Each
//! variant carries a stable code and a dotted name, both embedded in
//! [`crate::error::BrokerClientError::Service`] payloads.
//! Invariants:
//! - Codes and names are stable; operators and tests may match on them.
//! - Exactly one variant exists per exposed operation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

// ============================================================================
// SECTION: Call Sites
// ============================================================================

/// Identifies the broker operation behind a service error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallSite {
    /// Password authentication for an existing user.
    Authenticate,
    /// Invite-based authentication for a new user.
    AuthenticateNewUser,
    /// User record creation.
    CreateUser,
    /// User record update.
    UpdateUser,
    /// User deactivation.
    DeactivateUser,
    /// Broker availability probe.
    GetSiteStatus,
    /// Single user lookup.
    GetUser,
    /// Full user listing.
    ListUsers,
    /// MFA configuration creation.
    MfaCreate,
    /// MFA configuration listing.
    MfaList,
    /// MFA configuration update.
    MfaUpdate,
    /// MFA configuration deletion.
    MfaDelete,
    /// MFA value verification.
    MfaVerify,
    /// Recovery method creation.
    CreateMethod,
    /// Single recovery method lookup.
    GetMethod,
    /// Recovery method listing.
    ListMethods,
    /// Recovery method verification.
    VerifyMethod,
    /// Recovery method deletion.
    DeleteMethod,
    /// Recovery method re-delivery.
    ResendMethod,
    /// Password update for a user.
    SetPassword,
}

impl CallSite {
    /// Returns the stable error code for this call site.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Authenticate => "IG-1001",
            Self::AuthenticateNewUser => "IG-1002",
            Self::CreateUser => "IG-1003",
            Self::UpdateUser => "IG-1004",
            Self::DeactivateUser => "IG-1005",
            Self::GetSiteStatus => "IG-1006",
            Self::GetUser => "IG-1007",
            Self::ListUsers => "IG-1008",
            Self::SetPassword => "IG-1009",
            Self::MfaCreate => "IG-1101",
            Self::MfaList => "IG-1102",
            Self::MfaUpdate => "IG-1103",
            Self::MfaDelete => "IG-1104",
            Self::MfaVerify => "IG-1105",
            Self::CreateMethod => "IG-1201",
            Self::GetMethod => "IG-1202",
            Self::ListMethods => "IG-1203",
            Self::VerifyMethod => "IG-1204",
            Self::DeleteMethod => "IG-1205",
            Self::ResendMethod => "IG-1206",
        }
    }

    /// Returns the dotted operation name for this call site.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Authenticate => "users.authenticate",
            Self::AuthenticateNewUser => "users.authenticate_new",
            Self::CreateUser => "users.create",
            Self::UpdateUser => "users.update",
            Self::DeactivateUser => "users.deactivate",
            Self::GetSiteStatus => "site.status",
            Self::GetUser => "users.get",
            Self::ListUsers => "users.list",
            Self::SetPassword => "users.set_password",
            Self::MfaCreate => "mfa.create",
            Self::MfaList => "mfa.list",
            Self::MfaUpdate => "mfa.update",
            Self::MfaDelete => "mfa.delete",
            Self::MfaVerify => "mfa.verify",
            Self::CreateMethod => "recovery.create",
            Self::GetMethod => "recovery.get",
            Self::ListMethods => "recovery.list",
            Self::VerifyMethod => "recovery.verify",
            Self::DeleteMethod => "recovery.delete",
            Self::ResendMethod => "recovery.resend",
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}
