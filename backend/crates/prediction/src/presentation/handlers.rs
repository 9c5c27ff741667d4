//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;

use auth::AuthenticatedUser;

use crate::application::{ReferenceDataUseCase, SubmitPredictionInput, SubmitPredictionUseCase};
use crate::domain::repository::{LeagueRepository, PredictionRepository, TeamRepository};
use crate::error::{LedgerError, LedgerResult};
use crate::presentation::dto::{
    LeagueResponse, SubmitPredictionRequest, SubmitPredictionResponse, TeamResponse,
};

/// Shared state for ledger handlers
pub struct PredictionAppState<R>
where
    R: PredictionRepository + LeagueRepository + TeamRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> Clone for PredictionAppState<R>
where
    R: PredictionRepository + LeagueRepository + TeamRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

// ============================================================================
// Submit Prediction
// ============================================================================

/// POST /api/predictions
pub async fn submit_prediction<R>(
    State(state): State<PredictionAppState<R>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(req): Json<SubmitPredictionRequest>,
) -> LedgerResult<(StatusCode, Json<SubmitPredictionResponse>)>
where
    R: PredictionRepository + LeagueRepository + TeamRepository + Send + Sync + 'static,
{
    let input = SubmitPredictionInput {
        user_id: user.user_id,
        league_id: req.league_id.ok_or_else(|| required("leagueId"))?,
        team_id: req.team_id.ok_or_else(|| required("teamId"))?,
        predicted_rank: req.predicted_rank.ok_or_else(|| required("predictedRank"))?,
    };

    let use_case = SubmitPredictionUseCase::new(state.repo.clone());
    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitPredictionResponse {
            prediction_id: output.prediction_id,
        }),
    ))
}

fn required(field: &str) -> LedgerError {
    LedgerError::Validation(format!("{} is required", field))
}

// ============================================================================
// Reference Data
// ============================================================================

/// GET /api/leagues
pub async fn list_leagues<R>(
    State(state): State<PredictionAppState<R>>,
) -> LedgerResult<Json<Vec<LeagueResponse>>>
where
    R: PredictionRepository + LeagueRepository + TeamRepository + Send + Sync + 'static,
{
    let leagues = ReferenceDataUseCase::new(state.repo.clone())
        .list_leagues()
        .await?;

    Ok(Json(leagues.into_iter().map(LeagueResponse::from).collect()))
}

/// GET /api/teams
pub async fn list_teams<R>(
    State(state): State<PredictionAppState<R>>,
) -> LedgerResult<Json<Vec<TeamResponse>>>
where
    R: PredictionRepository + LeagueRepository + TeamRepository + Send + Sync + 'static,
{
    let teams = ReferenceDataUseCase::new(state.repo.clone())
        .list_teams()
        .await?;

    Ok(Json(teams.into_iter().map(TeamResponse::from).collect()))
}
