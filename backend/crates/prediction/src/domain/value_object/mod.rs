//! Value Object Module

pub mod display_name;
pub mod predicted_rank;

pub use kernel::id::{LeagueId, PredictionId, TeamId, UserId};
