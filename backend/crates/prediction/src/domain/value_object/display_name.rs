//! Display Name Value Object
//!
//! Name of a league or team as shown to users.

use derive_more::Display;

use crate::error::{LedgerError, LedgerResult};

/// Maximum display name length, in characters
pub const DISPLAY_NAME_MAX_LENGTH: usize = 120;

/// Validated, trimmed display name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(raw: impl AsRef<str>) -> LedgerResult<Self> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(LedgerError::Validation("Name is required".to_string()));
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(LedgerError::Validation(format!(
                "Name must be at most {} characters",
                DISPLAY_NAME_MAX_LENGTH
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_trimmed() {
        let name = DisplayName::new("  Premier League ").unwrap();
        assert_eq!(name.as_str(), "Premier League");
        assert_eq!(name.to_string(), "Premier League");
    }

    #[test]
    fn test_display_name_rejects_blank_and_long() {
        assert!(DisplayName::new("   ").is_err());
        assert!(DisplayName::new("x".repeat(DISPLAY_NAME_MAX_LENGTH + 1)).is_err());
        assert!(DisplayName::new("x".repeat(DISPLAY_NAME_MAX_LENGTH)).is_ok());
    }
}
