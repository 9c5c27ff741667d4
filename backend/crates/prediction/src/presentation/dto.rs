//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::{league::League, team::Team};
use crate::domain::value_object::{LeagueId, PredictionId, TeamId};

// ============================================================================
// Submit Prediction
// ============================================================================

/// Submit prediction request
///
/// Every field is optional at the decoding stage so that an absent field is
/// reported as a validation failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPredictionRequest {
    pub league_id: Option<LeagueId>,
    pub team_id: Option<TeamId>,
    pub predicted_rank: Option<i64>,
}

/// Submit prediction response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPredictionResponse {
    pub prediction_id: PredictionId,
}

// ============================================================================
// Reference Data
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueResponse {
    pub league_id: LeagueId,
    pub name: String,
    pub external_id: Option<String>,
}

impl From<League> for LeagueResponse {
    fn from(league: League) -> Self {
        Self {
            league_id: league.league_id,
            name: league.name.as_str().to_string(),
            external_id: league.external_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub team_id: TeamId,
    pub name: String,
    pub external_id: Option<String>,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            team_id: team.team_id,
            name: team.name.as_str().to_string(),
            external_id: team.external_id,
        }
    }
}
