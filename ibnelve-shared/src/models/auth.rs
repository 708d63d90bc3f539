use serde::{Deserialize, Serialize};

use super::Timestamp;

/// Credentials posted to `api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account email address.
    pub email: String,

    /// Plain-text password, sent once over TLS.
    pub password: String,
}

/// Payload of a successful login envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    #[serde(default)]
    pub token: String,

    /// Email the token was issued for.
    #[serde(default)]
    pub email: String,

    /// Tenant the account belongs to.
    #[serde(default)]
    pub tenant_id: String,

    /// Token expiry as reported by the server.
    pub expires_at: Option<Timestamp>,
}

/// Account registration posted to `api/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Account email address.
    pub email: String,

    /// Chosen password.
    pub password: String,

    /// Tenant the new account joins.
    pub tenant_id: String,
}

/// Client-side view of the signed-in identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// Email of the signed-in account, empty when anonymous.
    pub email: String,

    /// Tenant of the signed-in account, empty when anonymous.
    pub tenant_id: String,

    /// Whether a session is active.
    pub is_authenticated: bool,
}

impl UserInfo {
    /// Builds an authenticated principal.
    #[must_use]
    pub fn authenticated(email: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            tenant_id: tenant_id.into(),
            is_authenticated: true,
        }
    }

    /// The unauthenticated principal `{"", "", false}`.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }
}
