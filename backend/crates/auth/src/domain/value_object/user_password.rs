//! User Password Value Object
//!
//! Domain wrapper over `platform::password`. Validation failures become
//! caller-facing messages; the hash is what gets persisted.

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input, zeroized when dropped
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a password
    ///
    /// ## Errors
    /// `AuthError::Validation` with a message naming the violated rule
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, .. } => {
                AuthError::Validation(format!("Password must be at least {} characters", min))
            }
            PasswordPolicyError::Empty => {
                AuthError::Validation("Password is required".to_string())
            }
        })?;

        Ok(Self(clear_text))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password in Argon2id PHC format
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password with a fresh salt
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        let hashed = raw
            .0
            .hash(pepper)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(Self(hashed))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AuthResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|_| AuthError::Internal("Invalid password hash in database".to_string()))?;

        Ok(Self(hashed))
    }

    /// Stand-in hash for accounts that do not exist; never verifies
    pub fn dummy() -> Self {
        Self(HashedPassword::dummy())
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    ///
    /// `pepper` must match the one used during hashing.
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }

    /// True if the stored hash predates the current algorithm
    pub fn needs_rehash(&self) -> bool {
        self.0.needs_rehash()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
