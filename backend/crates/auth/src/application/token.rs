//! Token Service
//!
//! Issues and validates stateless bearer tokens. A token is valid iff its
//! MAC verifies under the configured secret and the current time is before
//! its expiry. There is no server-side revocation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};

use crate::application::config::AuthConfig;
use crate::domain::value_object::access_token::{
    AccessToken, TOKEN_ALGORITHM, TokenClaims, TokenHeader,
};
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Token issuer and validator
#[derive(Clone)]
pub struct TokenService {
    config: Arc<AuthConfig>,
}

impl TokenService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Issue a token for `subject` valid from now for the configured TTL
    pub fn issue(&self, subject: UserId) -> AuthResult<AccessToken> {
        self.issue_at(subject, Utc::now())
    }

    pub fn issue_at(&self, subject: UserId, now: DateTime<Utc>) -> AuthResult<AccessToken> {
        let claims = TokenClaims::new(subject, now.timestamp(), self.config.token_ttl_secs());

        let header = serde_json::to_vec(&TokenHeader::default())
            .map_err(|e| AuthError::Internal(format!("Token header encoding failed: {}", e)))?;
        let payload = serde_json::to_vec(&claims)
            .map_err(|e| AuthError::Internal(format!("Token claims encoding failed: {}", e)))?;

        let signing_input = format!("{}.{}", to_base64url(&header), to_base64url(&payload));
        let signature = hmac_sha256(&self.config.token_secret, signing_input.as_bytes());

        Ok(AccessToken::new(
            format!("{}.{}", signing_input, to_base64url(&signature)),
            claims.exp,
        ))
    }

    /// Resolve a token to the identity it was issued for
    pub fn validate(&self, token: &str) -> AuthResult<UserId> {
        self.validate_at(token, Utc::now())
    }

    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<UserId> {
        let claims = self.decode_verified(token)?;

        if claims.is_expired_at(now.timestamp()) {
            tracing::debug!(user_id = %claims.sub, exp = claims.exp, "Token expired");
            return Err(AuthError::TokenInvalid);
        }

        Ok(claims.subject())
    }

    /// Check structure, algorithm and MAC; only then trust the claims
    fn decode_verified(&self, token: &str) -> AuthResult<TokenClaims> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::TokenInvalid);
        };

        let header: TokenHeader = from_base64url(header_b64)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .ok_or(AuthError::TokenInvalid)?;
        if header.alg != TOKEN_ALGORITHM {
            return Err(AuthError::TokenInvalid);
        }

        let signature = from_base64url(signature_b64).map_err(|_| AuthError::TokenInvalid)?;
        let signing_input_len = header_b64.len() + 1 + payload_b64.len();
        let signing_input = &token.as_bytes()[..signing_input_len];
        if !verify_hmac_sha256(&self.config.token_secret, signing_input, &signature) {
            return Err(AuthError::TokenInvalid);
        }

        from_base64url(payload_b64)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .ok_or(AuthError::TokenInvalid)
    }
}
