// crates/ident-gate-client/src/operations.rs
// ============================================================================
// Module: Ident Gate Broker Operations
// Description: One method per broker operation with explicit status mapping.
// Purpose: Translate HTTP status codes into typed domain outcomes.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every broker operation is an explicit method: build the request, send it
//! through the transport, and match the status code against that operation's
//! listed outcomes. Any unlisted status is a
//! [`crate::error::BrokerClientError::Service`] carrying the call-site code.
//! Invariants:
//! - Expected domain outcomes (not found, bad credentials, failed MFA
//!   values) return `None`/`false`, never errors.
//! - Returned records never contain the transport-level status field.
//! - Path identifiers are validated before any request is built.
//!
//! `deactivate_user` accepts HTTP 200 only. The broker answers deactivation
//! with a bodied 200 rather than an empty 204, so the narrower match is
//! deliberate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

use crate::call_site::CallSite;
use crate::client::BrokerClient;
use crate::client::Record;
use crate::client::list_body;
use crate::client::object_body;
use crate::client::service_error;
use crate::error::BrokerClientError;
use crate::transport::BrokerRequest;
use crate::transport::BrokerResponse;
use crate::transport::HttpMethod;

// ============================================================================
// SECTION: User Profile Payload
// ============================================================================

/// Full user payload for creation and update operations.
///
/// # Invariants
/// - Field names match the broker's wire contract verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Primary identifier for the user record.
    pub employee_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Display name shown by the broker.
    pub display_name: String,
    /// Login username.
    pub username: String,
    /// Primary email address.
    pub email: String,
    /// Whether the account is active.
    pub active: bool,
    /// Whether the account is locked.
    pub locked: bool,
    /// Manager's email address, when assigned.
    pub manager_email: Option<String>,
    /// Whether MFA enrollment is required.
    pub require_mfa: bool,
    /// Spouse email address, when recorded.
    pub spouse_email: Option<String>,
    /// Whether the record is hidden from listings.
    pub hide: bool,
    /// Group memberships.
    pub groups: Vec<String>,
}

// ============================================================================
// SECTION: User Operations
// ============================================================================

impl BrokerClient {
    /// Authenticates an existing user with username and password.
    ///
    /// Returns `None` for rejected credentials (HTTP 400).
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for unlisted status codes and
    /// [`BrokerClientError::Transport`] when the request fails.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Record>, BrokerClientError> {
        let body = json!({ "username": username, "password": password });
        let response =
            self.send(HttpMethod::Post, "/api/v1/users/auth".to_string(), Some(body))?;
        match response.status {
            200 => Ok(Some(object_body(CallSite::Authenticate, &response)?)),
            400 => Ok(None),
            _ => Err(service_error(CallSite::Authenticate, &response)),
        }
    }

    /// Authenticates a new user holding an invite.
    ///
    /// Returns `None` for an invalid invite (HTTP 400).
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for unlisted status codes.
    pub fn authenticate_new_user(
        &self,
        username: &str,
        invite_code: &str,
        password: &str,
    ) -> Result<Option<Record>, BrokerClientError> {
        let body = json!({
            "username": username,
            "invite_code": invite_code,
            "password": password,
        });
        let response =
            self.send(HttpMethod::Post, "/api/v1/users/auth/invite".to_string(), Some(body))?;
        match response.status {
            200 => Ok(Some(object_body(CallSite::AuthenticateNewUser, &response)?)),
            400 => Ok(None),
            _ => Err(service_error(CallSite::AuthenticateNewUser, &response)),
        }
    }

    /// Creates a user record and returns the broker's view of it.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for unlisted status codes.
    pub fn create_user(&self, profile: &UserProfile) -> Result<Record, BrokerClientError> {
        let body = profile_body(profile)?;
        let response = self.send(HttpMethod::Post, "/api/v1/users".to_string(), Some(body))?;
        match response.status {
            200 => object_body(CallSite::CreateUser, &response),
            _ => Err(service_error(CallSite::CreateUser, &response)),
        }
    }

    /// Updates a user record and returns the broker's view of it.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for unlisted status codes.
    pub fn update_user(
        &self,
        employee_id: &str,
        profile: &UserProfile,
    ) -> Result<Record, BrokerClientError> {
        validate_segment("employee_id", employee_id)?;
        let body = profile_body(profile)?;
        let response =
            self.send(HttpMethod::Put, format!("/api/v1/users/{employee_id}"), Some(body))?;
        match response.status {
            200 => object_body(CallSite::UpdateUser, &response),
            _ => Err(service_error(CallSite::UpdateUser, &response)),
        }
    }

    /// Deactivates a user record.
    ///
    /// The broker answers with a bodied HTTP 200; a 204 is unexpected here.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for any status other than 200.
    pub fn deactivate_user(&self, employee_id: &str) -> Result<(), BrokerClientError> {
        validate_segment("employee_id", employee_id)?;
        let response =
            self.send(HttpMethod::Post, format!("/api/v1/users/{employee_id}/deactivate"), None)?;
        match response.status {
            200 => Ok(()),
            _ => Err(service_error(CallSite::DeactivateUser, &response)),
        }
    }

    /// Probes broker availability; returns `"OK"` for any 2xx status.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for non-2xx status codes.
    pub fn get_site_status(&self) -> Result<String, BrokerClientError> {
        let response = self.send(HttpMethod::Get, "/api/v1/status".to_string(), None)?;
        if (200..300).contains(&response.status) {
            Ok("OK".to_string())
        } else {
            Err(service_error(CallSite::GetSiteStatus, &response))
        }
    }

    /// Fetches a user record; returns `None` when the user does not exist
    /// (HTTP 204).
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for unlisted status codes.
    pub fn get_user(&self, employee_id: &str) -> Result<Option<Record>, BrokerClientError> {
        validate_segment("employee_id", employee_id)?;
        let response = self.send(HttpMethod::Get, format!("/api/v1/users/{employee_id}"), None)?;
        match response.status {
            200 => Ok(Some(object_body(CallSite::GetUser, &response)?)),
            204 => Ok(None),
            _ => Err(service_error(CallSite::GetUser, &response)),
        }
    }

    /// Lists all user records.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for unlisted status codes.
    pub fn list_users(&self) -> Result<Vec<Record>, BrokerClientError> {
        let response = self.send(HttpMethod::Get, "/api/v1/users".to_string(), None)?;
        match response.status {
            200 => list_body(CallSite::ListUsers, &response),
            _ => Err(service_error(CallSite::ListUsers, &response)),
        }
    }

    /// Sets a user's password and returns the password metadata record.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for unlisted status codes.
    pub fn set_password(
        &self,
        employee_id: &str,
        password: &str,
    ) -> Result<Record, BrokerClientError> {
        validate_segment("employee_id", employee_id)?;
        let body = json!({ "password": password });
        let response = self.send(
            HttpMethod::Post,
            format!("/api/v1/users/{employee_id}/password"),
            Some(body),
        )?;
        match response.status {
            200 => object_body(CallSite::SetPassword, &response),
            _ => Err(service_error(CallSite::SetPassword, &response)),
        }
    }
}

// ============================================================================
// SECTION: MFA Operations
// ============================================================================

impl BrokerClient {
    /// Creates an MFA configuration for a user.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for unlisted status codes.
    pub fn mfa_create(
        &self,
        employee_id: &str,
        config: &Record,
    ) -> Result<Record, BrokerClientError> {
        validate_segment("employee_id", employee_id)?;
        let response = self.send(
            HttpMethod::Post,
            format!("/api/v1/users/{employee_id}/mfa"),
            Some(Value::Object(config.clone())),
        )?;
        match response.status {
            200 => object_body(CallSite::MfaCreate, &response),
            _ => Err(service_error(CallSite::MfaCreate, &response)),
        }
    }

    /// Fetches the MFA configuration map for a user.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for unlisted status codes.
    pub fn mfa_list(&self, employee_id: &str) -> Result<Record, BrokerClientError> {
        validate_segment("employee_id", employee_id)?;
        let response =
            self.send(HttpMethod::Get, format!("/api/v1/users/{employee_id}/mfa"), None)?;
        match response.status {
            200 => object_body(CallSite::MfaList, &response),
            _ => Err(service_error(CallSite::MfaList, &response)),
        }
    }

    /// Updates an MFA configuration for a user.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for unlisted status codes.
    pub fn mfa_update(
        &self,
        employee_id: &str,
        mfa_id: &str,
        config: &Record,
    ) -> Result<Record, BrokerClientError> {
        validate_segment("employee_id", employee_id)?;
        validate_segment("mfa_id", mfa_id)?;
        let response = self.send(
            HttpMethod::Put,
            format!("/api/v1/users/{employee_id}/mfa/{mfa_id}"),
            Some(Value::Object(config.clone())),
        )?;
        match response.status {
            200 => object_body(CallSite::MfaUpdate, &response),
            _ => Err(service_error(CallSite::MfaUpdate, &response)),
        }
    }

    /// Deletes an MFA configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for unlisted status codes.
    pub fn mfa_delete(&self, employee_id: &str, mfa_id: &str) -> Result<(), BrokerClientError> {
        validate_segment("employee_id", employee_id)?;
        validate_segment("mfa_id", mfa_id)?;
        let response = self.send(
            HttpMethod::Delete,
            format!("/api/v1/users/{employee_id}/mfa/{mfa_id}"),
            None,
        )?;
        match response.status {
            204 => Ok(()),
            _ => Err(service_error(CallSite::MfaDelete, &response)),
        }
    }

    /// Verifies an MFA value; `true` on acceptance, `false` on rejection.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::MfaRateLimited`] on HTTP 429 so callers
    /// can back off, and [`BrokerClientError::Service`] for unlisted status
    /// codes.
    pub fn mfa_verify(
        &self,
        mfa_id: &str,
        employee_id: &str,
        value: &str,
    ) -> Result<bool, BrokerClientError> {
        validate_segment("employee_id", employee_id)?;
        validate_segment("mfa_id", mfa_id)?;
        let body = json!({ "value": value });
        let response = self.send(
            HttpMethod::Post,
            format!("/api/v1/users/{employee_id}/mfa/{mfa_id}/verify"),
            Some(body),
        )?;
        match response.status {
            204 => Ok(true),
            400 => Ok(false),
            429 => Err(BrokerClientError::MfaRateLimited {
                employee_id: employee_id.to_string(),
            }),
            _ => Err(service_error(CallSite::MfaVerify, &response)),
        }
    }
}

// ============================================================================
// SECTION: Recovery Method Operations
// ============================================================================

impl BrokerClient {
    /// Creates a recovery method for a user.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for unlisted status codes.
    pub fn create_method(
        &self,
        employee_id: &str,
        method: &Record,
    ) -> Result<Record, BrokerClientError> {
        validate_segment("employee_id", employee_id)?;
        let response = self.send(
            HttpMethod::Post,
            format!("/api/v1/users/{employee_id}/recovery-methods"),
            Some(Value::Object(method.clone())),
        )?;
        match response.status {
            200 => object_body(CallSite::CreateMethod, &response),
            _ => Err(service_error(CallSite::CreateMethod, &response)),
        }
    }

    /// Fetches a single recovery method.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for unlisted status codes.
    pub fn get_method(
        &self,
        employee_id: &str,
        method_id: &str,
    ) -> Result<Record, BrokerClientError> {
        validate_segment("employee_id", employee_id)?;
        validate_segment("method_id", method_id)?;
        let response = self.send(
            HttpMethod::Get,
            format!("/api/v1/users/{employee_id}/recovery-methods/{method_id}"),
            None,
        )?;
        match response.status {
            200 => object_body(CallSite::GetMethod, &response),
            _ => Err(service_error(CallSite::GetMethod, &response)),
        }
    }

    /// Fetches the recovery method map for a user.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for unlisted status codes.
    pub fn list_methods(&self, employee_id: &str) -> Result<Record, BrokerClientError> {
        validate_segment("employee_id", employee_id)?;
        let response = self.send(
            HttpMethod::Get,
            format!("/api/v1/users/{employee_id}/recovery-methods"),
            None,
        )?;
        match response.status {
            200 => object_body(CallSite::ListMethods, &response),
            _ => Err(service_error(CallSite::ListMethods, &response)),
        }
    }

    /// Verifies a recovery method value and returns the broker's record.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for unlisted status codes.
    pub fn verify_method(
        &self,
        employee_id: &str,
        method_id: &str,
        value: &str,
    ) -> Result<Record, BrokerClientError> {
        validate_segment("employee_id", employee_id)?;
        validate_segment("method_id", method_id)?;
        let body = json!({ "value": value });
        let response = self.send(
            HttpMethod::Post,
            format!("/api/v1/users/{employee_id}/recovery-methods/{method_id}/verify"),
            Some(body),
        )?;
        match response.status {
            200 => object_body(CallSite::VerifyMethod, &response),
            _ => Err(service_error(CallSite::VerifyMethod, &response)),
        }
    }

    /// Deletes a recovery method; the broker answers 200 or 204.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for unlisted status codes.
    pub fn delete_method(
        &self,
        employee_id: &str,
        method_id: &str,
    ) -> Result<(), BrokerClientError> {
        validate_segment("employee_id", employee_id)?;
        validate_segment("method_id", method_id)?;
        let response = self.send(
            HttpMethod::Delete,
            format!("/api/v1/users/{employee_id}/recovery-methods/{method_id}"),
            None,
        )?;
        match response.status {
            200 | 204 => Ok(()),
            _ => Err(service_error(CallSite::DeleteMethod, &response)),
        }
    }

    /// Requests re-delivery of a recovery method challenge.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerClientError::Service`] for unlisted status codes.
    pub fn resend_method(
        &self,
        employee_id: &str,
        method_id: &str,
    ) -> Result<bool, BrokerClientError> {
        validate_segment("employee_id", employee_id)?;
        validate_segment("method_id", method_id)?;
        let response = self.send(
            HttpMethod::Post,
            format!("/api/v1/users/{employee_id}/recovery-methods/{method_id}/resend"),
            None,
        )?;
        match response.status {
            200 | 204 => Ok(true),
            _ => Err(service_error(CallSite::ResendMethod, &response)),
        }
    }
}

// ============================================================================
// SECTION: Shared Dispatch
// ============================================================================

impl BrokerClient {
    /// Sends one request through the configured transport.
    fn send(
        &self,
        method: HttpMethod,
        path: String,
        body: Option<Value>,
    ) -> Result<BrokerResponse, BrokerClientError> {
        self.transport.execute(&BrokerRequest {
            method,
            path,
            body,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Serializes a user profile into a JSON request body.
fn profile_body(profile: &UserProfile) -> Result<Value, BrokerClientError> {
    serde_json::to_value(profile).map_err(|err| {
        BrokerClientError::Transport(format!("request serialization failed: {err}"))
    })
}

/// Rejects identifiers that are empty or carry URL-reserved characters.
fn validate_segment(label: &str, value: &str) -> Result<(), BrokerClientError> {
    if value.trim().is_empty() {
        return Err(BrokerClientError::Config(format!("{label} must not be empty")));
    }
    if value.contains(['/', '?', '#', '%']) {
        return Err(BrokerClientError::Config(format!(
            "{label} contains reserved characters"
        )));
    }
    Ok(())
}
