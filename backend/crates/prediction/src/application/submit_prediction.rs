//! Submit Prediction Use Case
//!
//! Records one (league, team, rank) prediction for an authorized user.

use std::sync::Arc;

use crate::domain::entity::prediction::Prediction;
use crate::domain::repository::PredictionRepository;
use crate::domain::value_object::{
    LeagueId, PredictionId, TeamId, UserId, predicted_rank::PredictedRank,
};
use crate::error::LedgerResult;

/// Submit prediction input
pub struct SubmitPredictionInput {
    pub user_id: UserId,
    pub league_id: LeagueId,
    pub team_id: TeamId,
    /// As submitted; validated here
    pub predicted_rank: i64,
}

/// Submit prediction output
#[derive(Debug)]
pub struct SubmitPredictionOutput {
    pub prediction_id: PredictionId,
}

/// Submit prediction use case
pub struct SubmitPredictionUseCase<P>
where
    P: PredictionRepository,
{
    prediction_repo: Arc<P>,
}

impl<P> SubmitPredictionUseCase<P>
where
    P: PredictionRepository,
{
    pub fn new(prediction_repo: Arc<P>) -> Self {
        Self { prediction_repo }
    }

    /// Validate, then commit atomically
    ///
    /// Re-submitting an existing (team) or (rank) within a league is rejected,
    /// never overwritten. Nothing is retried.
    pub async fn execute(&self, input: SubmitPredictionInput) -> LedgerResult<SubmitPredictionOutput> {
        let predicted_rank = PredictedRank::new(input.predicted_rank)?;

        let prediction = Prediction::new(
            input.user_id,
            input.league_id,
            input.team_id,
            predicted_rank,
        );

        self.prediction_repo.insert(&prediction).await?;

        tracing::info!(
            prediction_id = %prediction.prediction_id,
            user_id = %prediction.user_id,
            league_id = %prediction.league_id,
            team_id = %prediction.team_id,
            predicted_rank = %prediction.predicted_rank,
            "Prediction recorded"
        );

        Ok(SubmitPredictionOutput {
            prediction_id: prediction.prediction_id,
        })
    }
}
