//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{league::League, prediction::Prediction, team::Team};
pub use repository::{LeagueRepository, PredictionRepository, TeamRepository};
