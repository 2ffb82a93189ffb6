//! Types for Shelfwise server API requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration for connecting to a Shelfwise server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "https://library.example.com")
    pub url: String,
    /// Current access token (if authenticated)
    pub access_token: Option<String>,
    /// Refresh token for obtaining new access tokens
    pub refresh_token: Option<String>,
}

impl ServerConfig {
    /// Create a new server config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
            refresh_token: None,
        }
    }

    /// Create a config with existing tokens.
    pub fn with_tokens(
        url: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
    ) -> Self {
        Self {
            url: url.into(),
            access_token: Some(access_token.into()),
            refresh_token,
        }
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
    /// Location the member belongs to.
    pub lid: i64,
}

/// Response from successful login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Request body for token refresh.
#[derive(Debug, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response from token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Current member info, as served under the `me` envelope field.
///
/// The server includes more than we need here; unknown fields are ignored
/// and the ones we keep are optional because older servers omit some.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub user_id: String,
    pub lid: Option<i64>,
    pub rid: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MeEnvelope {
    pub me: UserInfo,
}

// =============================================================================
// Media Types
// =============================================================================

/// A single catalog record.
///
/// Every field is optional at the type level: a record being created starts
/// as a blank template with nothing set, and `mid`/`image` stay unset until
/// the server assigns them. Which fields must be filled before submission is
/// a workflow rule, not a schema rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub mid: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub published: Option<NaiveDate>,
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub genre: Option<String>,
    pub isbn: Option<String>,
    pub price: Option<f64>,
    pub length: Option<u32>,
    pub available: Option<bool>,
}

/// Envelope wrapping a fetched media record.
#[derive(Debug, Deserialize)]
pub(crate) struct MediaInfoEnvelope {
    pub info: MediaItem,
}

/// Response from creating a media record.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaCreated {
    /// Server-assigned record identifier.
    pub mid: String,
    /// Server-assigned cover image URL, when one was resolved.
    pub image: Option<String>,
}

// =============================================================================
// Role Types
// =============================================================================

/// The `seqs` payload: permission, limit, and lock sequences.
///
/// These are opaque to the client and relayed unvalidated; the server owns
/// their structure entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleSeqs {
    pub perms: Value,
    pub limits: Value,
    pub locks: Value,
}

/// A role as served by the detail endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleDetail {
    pub rid: String,
    pub name: String,
    pub seqs: RoleSeqs,
}

/// Response from creating a role.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleCreated {
    /// Server-assigned role identifier.
    pub rid: String,
}

/// Request body for full-replacement role edits.
#[derive(Debug, Serialize)]
pub(crate) struct RoleUpdateRequest {
    pub rid: String,
    pub name: String,
    pub seqs: RoleSeqs,
}

/// Request body for role creation.
#[derive(Debug, Serialize)]
pub(crate) struct RoleCreateRequest {
    pub name: String,
    pub seqs: RoleSeqs,
}

/// Request body for role removal.
#[derive(Debug, Serialize)]
pub(crate) struct RoleRemoveRequest {
    pub rid: String,
}

// =============================================================================
// Error Types
// =============================================================================

/// Error envelope carried by failure responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}
