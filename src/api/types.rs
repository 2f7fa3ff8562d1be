//! API request and response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ==================== Authentication ====================

/// Login request.
///
/// Both fields are optional on the wire so an absent field is reported as a
/// bad request rather than a deserialization failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Administrator email.
    #[serde(default)]
    pub email: Option<String>,
    /// Administrator password.
    #[serde(default)]
    pub password: Option<String>,
}

/// Login response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    /// Bearer token, valid for one hour.
    pub token: String,
    /// Authenticated user.
    pub user: UserInfo,
    /// Token expiration in seconds.
    pub expires_in: i64,
}

/// Response for a token check.
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub message: String,
    pub user: UserInfo,
}

/// User information.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    /// User email.
    pub email: String,
}

// ==================== Health ====================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}
