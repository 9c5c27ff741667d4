//! Access Token Value Objects
//!
//! Compact HS256 JWS: `base64url(header).base64url(claims).base64url(mac)`.
//! Nothing here is persisted; validity is signature plus expiry.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_object::user_id::UserId;

/// The only signing algorithm accepted
pub const TOKEN_ALGORITHM: &str = "HS256";

/// JOSE header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self {
            alg: TOKEN_ALGORITHM.to_string(),
            typ: Some("JWT".to_string()),
        }
    }
}

/// Token claims, times in unix seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user id
    pub sub: Uuid,
    /// Issued at
    pub iat: i64,
    /// Expires at (exclusive)
    pub exp: i64,
}

impl TokenClaims {
    pub fn new(subject: UserId, issued_at: i64, ttl_secs: i64) -> Self {
        Self {
            sub: subject.into_uuid(),
            iat: issued_at,
            exp: issued_at.saturating_add(ttl_secs),
        }
    }

    pub fn subject(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }

    /// A token is dead from the expiry instant onwards
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

/// A signed token as handed to the caller
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_at: i64,
}

impl AccessToken {
    pub(crate) fn new(value: String, expires_at: i64) -> Self {
        Self { value, expires_at }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    /// Unix seconds
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
