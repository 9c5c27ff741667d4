//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_id::UserId;

// ============================================================================
// Register
// ============================================================================

/// Register request
///
/// Absent fields deserialize as empty and are rejected by validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Register response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: UserId,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: &'static str,
    /// Unix seconds
    pub expires_at: i64,
    pub user_id: UserId,
    pub username: String,
}

// ============================================================================
// Me
// ============================================================================

/// Current user response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: UserId,
    pub username: String,
}
