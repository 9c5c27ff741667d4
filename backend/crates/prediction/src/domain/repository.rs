//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{league::League, prediction::Prediction, team::Team};
use crate::error::LedgerResult;

/// Prediction repository trait
#[trait_variant::make(PredictionRepository: Send)]
pub trait LocalPredictionRepository {
    /// Record a prediction
    ///
    /// League and team existence and both uniqueness rules are checked in
    /// the same atomic unit as the write. Fails with `LeagueNotFound`,
    /// `TeamNotFound`, `TeamAlreadyPredicted` or `RankAlreadyUsed`; nothing
    /// is written on any failure.
    async fn insert(&self, prediction: &Prediction) -> LedgerResult<()>;
}

/// League repository trait
#[trait_variant::make(LeagueRepository: Send)]
pub trait LocalLeagueRepository {
    /// Create a league; `LeagueNameTaken` on a duplicate name
    async fn create_league(&self, league: &League) -> LedgerResult<()>;

    /// All leagues ordered by name
    async fn list_leagues(&self) -> LedgerResult<Vec<League>>;
}

/// Team repository trait
#[trait_variant::make(TeamRepository: Send)]
pub trait LocalTeamRepository {
    async fn create_team(&self, team: &Team) -> LedgerResult<()>;

    /// All teams ordered by name
    async fn list_teams(&self) -> LedgerResult<Vec<Team>>;
}
