//! Password Hashing and Verification
//!
//! - Argon2id hashing (memory-hard, salted, PHC string output)
//! - Zeroization of clear-text passwords
//! - Constant-time digest comparison (inside the Argon2 verifier)
//! - Optional application-wide pepper

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Argon2id hash with default parameters that no password verifies against.
/// Verifying against it costs the same as verifying against a stored hash.
const DUMMY_PHC: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$SlZwq3ksDjvuvlJrYZWrrg$g42Vyhj/XbpoIOX+11swWnQK0hQlQ8Pw/ZGulgtAz3I";

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is the empty string
    #[error("Password cannot be empty")]
    Empty,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored hash is not a valid PHC string
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// - Does not implement `Clone`
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("secret1".to_string()).unwrap();
/// let hashed = password.hash(None).unwrap();
/// assert!(hashed.verify(&password, None));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Validate and wrap a password
    ///
    /// Length is counted in Unicode scalar values on the input as submitted.
    /// Any character is allowed, whitespace and control characters included.
    /// The stored form is NFKC-normalized so that visually identical input
    /// hashes identically.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw);

        if raw.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        let char_count = raw.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        Ok(Self(raw.nfkc().collect()))
    }

    /// Wrap without validation
    #[cfg(test)]
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash the password using Argon2id with a fresh random salt
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let password_bytes = self.peppered(pepper);

        // 128-bit salt
        let salt = SaltString::generate(&mut OsRng);

        // Argon2id, m=19456 (19 MiB), t=2, p=1
        let hash = Argon2::default()
            .hash_password(&password_bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string embeds the algorithm identifier, version, parameters,
/// salt and digest, so it is self-describing for verification.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// Fixed hash for verifying when there is no stored hash to check
    ///
    /// `verify` against it always fails, after the full Argon2 work.
    pub fn dummy() -> Self {
        Self {
            hash: DUMMY_PHC.to_string(),
        }
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// `pepper` must match the one used during hashing.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };

        // Digest comparison is constant-time inside the verifier
        Argon2::default()
            .verify_password(&password.peppered(pepper), &parsed_hash)
            .is_ok()
    }

    /// True if the hash was produced by something other than Argon2id
    pub fn needs_rehash(&self) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => parsed.algorithm != argon2::Algorithm::Argon2id.ident(),
            Err(_) => true,
        }
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
