//! Reference Data Use Cases
//!
//! Leagues and teams that predictions point at.

use std::sync::Arc;

use crate::domain::entity::{league::League, team::Team};
use crate::domain::repository::{LeagueRepository, TeamRepository};
use crate::domain::value_object::display_name::DisplayName;
use crate::error::LedgerResult;

/// League/team catalogue
pub struct ReferenceDataUseCase<R>
where
    R: LeagueRepository + TeamRepository,
{
    repo: Arc<R>,
}

impl<R> ReferenceDataUseCase<R>
where
    R: LeagueRepository + TeamRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create_league(
        &self,
        name: &str,
        external_id: Option<String>,
    ) -> LedgerResult<League> {
        let league = League::new(DisplayName::new(name)?, normalize_external_id(external_id));
        self.repo.create_league(&league).await?;

        tracing::info!(league_id = %league.league_id, name = %league.name, "League created");

        Ok(league)
    }

    pub async fn create_team(&self, name: &str, external_id: Option<String>) -> LedgerResult<Team> {
        let team = Team::new(DisplayName::new(name)?, normalize_external_id(external_id));
        self.repo.create_team(&team).await?;

        tracing::info!(team_id = %team.team_id, name = %team.name, "Team created");

        Ok(team)
    }

    pub async fn list_leagues(&self) -> LedgerResult<Vec<League>> {
        self.repo.list_leagues().await
    }

    pub async fn list_teams(&self) -> LedgerResult<Vec<Team>> {
        self.repo.list_teams().await
    }
}

/// Blank external ids are stored as absent
fn normalize_external_id(external_id: Option<String>) -> Option<String> {
    external_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}
