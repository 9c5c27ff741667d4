//! Prediction Ledger Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Invariants
//! - Within one (user, league) a team is predicted at most once
//! - Within one (user, league) a rank is used at most once
//! - Both are enforced by storage in the same atomic unit as the write;
//!   a re-submission is rejected, never overwritten

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{ReferenceDataUseCase, SubmitPredictionUseCase};
pub use domain::{LeagueRepository, PredictionRepository, TeamRepository};
pub use error::{LedgerError, LedgerResult};
pub use infra::{InMemoryLedgerRepository, PgLedgerRepository};
pub use presentation::prediction_router;

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
