//! Prediction Entity
//!
//! One user's claim that a team finishes a league at a given rank.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    LeagueId, PredictionId, TeamId, UserId, predicted_rank::PredictedRank,
};

/// Prediction entity
///
/// Write-once. Within one (user, league) each team and each rank appear at
/// most once.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub prediction_id: PredictionId,
    pub user_id: UserId,
    pub league_id: LeagueId,
    pub team_id: TeamId,
    pub predicted_rank: PredictedRank,
    pub created_at: DateTime<Utc>,
}

impl Prediction {
    pub fn new(
        user_id: UserId,
        league_id: LeagueId,
        team_id: TeamId,
        predicted_rank: PredictedRank,
    ) -> Self {
        Self {
            prediction_id: PredictionId::new(),
            user_id,
            league_id,
            team_id,
            predicted_rank,
            created_at: Utc::now(),
        }
    }
}
