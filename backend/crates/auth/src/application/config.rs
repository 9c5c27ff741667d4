//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

/// Default access token lifetime (15 minutes)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 key for signing access tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Access token lifetime
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            token_ttl: DEFAULT_TOKEN_TTL,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    ///
    /// Tokens signed with it do not survive a restart.
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Get token TTL in whole seconds
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
