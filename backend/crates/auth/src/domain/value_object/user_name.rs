//! User Name Value Object
//!
//! The login handle. Case-sensitive and stored exactly as submitted:
//! `alice` and `Alice` are different users.
//!
//! ## Invariants
//! - 1 to 80 characters (Unicode scalar values), any characters allowed

use derive_more::Display;
use thiserror::Error;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 80;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("Username is required")]
    Empty,

    #[error("Username must be at most {max} characters (got {length})")]
    TooLong { length: usize, max: usize },
}

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct UserName(String);

impl UserName {
    /// Validate and wrap a user name
    pub fn new(raw: impl Into<String>) -> Result<Self, UserNameError> {
        let raw = raw.into();

        if raw.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = raw.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        Ok(Self(raw))
    }

    /// Rebuild from a stored value, re-checking the invariants
    pub fn from_db(stored: &str) -> Result<Self, UserNameError> {
        Self::new(stored)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
