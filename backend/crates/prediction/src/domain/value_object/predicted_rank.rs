//! Predicted Rank Value Object

use derive_more::Display;

use crate::error::{LedgerError, LedgerResult};

/// Predicted final table position, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct PredictedRank(i32);

impl PredictedRank {
    /// Validate a rank as submitted
    ///
    /// Accepts any integer width so that out-of-range input is a validation
    /// failure rather than a decoding one.
    pub fn new(rank: i64) -> LedgerResult<Self> {
        if rank < 1 {
            return Err(LedgerError::Validation(
                "Predicted rank must be at least 1".to_string(),
            ));
        }

        i32::try_from(rank)
            .map(Self)
            .map_err(|_| LedgerError::Validation("Predicted rank is too large".to_string()))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_lower_bound() {
        assert!(matches!(PredictedRank::new(0), Err(LedgerError::Validation(_))));
        assert!(matches!(PredictedRank::new(-3), Err(LedgerError::Validation(_))));
        assert_eq!(PredictedRank::new(1).unwrap().value(), 1);
    }

    #[test]
    fn test_rank_upper_bound() {
        assert!(PredictedRank::new(i64::from(i32::MAX)).is_ok());
        assert!(matches!(
            PredictedRank::new(i64::from(i32::MAX) + 1),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn test_rank_displays_as_number() {
        assert_eq!(PredictedRank::new(4).unwrap().to_string(), "4");
    }
}
