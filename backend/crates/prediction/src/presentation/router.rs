//! Prediction Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

use auth::{AccessGate, UserRepository, require_auth};

use crate::domain::repository::{LeagueRepository, PredictionRepository, TeamRepository};
use crate::presentation::handlers::{self, PredictionAppState};

/// Create the Prediction router
///
/// Mount under `/api`. Submitting requires a bearer token checked by `gate`;
/// the reference data listings are public.
pub fn prediction_router<R, U>(repo: Arc<R>, gate: AccessGate<U>) -> Router
where
    R: PredictionRepository + LeagueRepository + TeamRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let state = PredictionAppState { repo };

    Router::new()
        .route("/predictions", post(handlers::submit_prediction::<R>))
        .route_layer(from_fn_with_state(gate, require_auth::<U>))
        .route("/leagues", get(handlers::list_leagues::<R>))
        .route("/teams", get(handlers::list_teams::<R>))
        .with_state(state)
}
