//! In-Memory Repository Implementation
//!
//! Process-local ledger. Every check and the write it guards run under one
//! lock, which gives the same all-or-nothing outcome as the PostgreSQL
//! transaction plus unique indexes.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::entity::{league::League, prediction::Prediction, team::Team};
use crate::domain::repository::{LeagueRepository, PredictionRepository, TeamRepository};
use crate::domain::value_object::{LeagueId, PredictionId, TeamId, UserId};
use crate::error::{LedgerError, LedgerResult};

#[derive(Default)]
struct Ledger {
    leagues: HashMap<LeagueId, League>,
    teams: HashMap<TeamId, Team>,
    predictions: HashMap<PredictionId, Prediction>,
    team_keys: HashSet<(UserId, LeagueId, TeamId)>,
    rank_keys: HashSet<(UserId, LeagueId, i32)>,
}

/// In-memory ledger repository
#[derive(Clone, Default)]
pub struct InMemoryLedgerRepository {
    ledger: Arc<Mutex<Ledger>>,
}

impl InMemoryLedgerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Predictions made by `user_id` in `league_id`, ordered by rank
    pub fn predictions_for(&self, user_id: UserId, league_id: LeagueId) -> Vec<Prediction> {
        let ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        let mut found: Vec<Prediction> = ledger
            .predictions
            .values()
            .filter(|p| p.user_id == user_id && p.league_id == league_id)
            .cloned()
            .collect();
        found.sort_by_key(|p| p.predicted_rank);
        found
    }

    pub fn prediction_count(&self) -> usize {
        self.ledger
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .predictions
            .len()
    }
}

impl PredictionRepository for InMemoryLedgerRepository {
    async fn insert(&self, prediction: &Prediction) -> LedgerResult<()> {
        let mut ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);

        if !ledger.leagues.contains_key(&prediction.league_id) {
            return Err(LedgerError::LeagueNotFound);
        }
        if !ledger.teams.contains_key(&prediction.team_id) {
            return Err(LedgerError::TeamNotFound);
        }

        let team_key = (prediction.user_id, prediction.league_id, prediction.team_id);
        let rank_key = (
            prediction.user_id,
            prediction.league_id,
            prediction.predicted_rank.value(),
        );
        if ledger.team_keys.contains(&team_key) {
            return Err(LedgerError::TeamAlreadyPredicted);
        }
        if ledger.rank_keys.contains(&rank_key) {
            return Err(LedgerError::RankAlreadyUsed);
        }

        ledger.team_keys.insert(team_key);
        ledger.rank_keys.insert(rank_key);
        ledger
            .predictions
            .insert(prediction.prediction_id, prediction.clone());

        Ok(())
    }
}

impl LeagueRepository for InMemoryLedgerRepository {
    async fn create_league(&self, league: &League) -> LedgerResult<()> {
        let mut ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);

        if ledger.leagues.values().any(|l| l.name == league.name) {
            return Err(LedgerError::LeagueNameTaken);
        }

        ledger.leagues.insert(league.league_id, league.clone());
        Ok(())
    }

    async fn list_leagues(&self) -> LedgerResult<Vec<League>> {
        let ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        let mut leagues: Vec<League> = ledger.leagues.values().cloned().collect();
        leagues.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(leagues)
    }
}

impl TeamRepository for InMemoryLedgerRepository {
    async fn create_team(&self, team: &Team) -> LedgerResult<()> {
        let mut ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        ledger.teams.insert(team.team_id, team.clone());
        Ok(())
    }

    async fn list_teams(&self) -> LedgerResult<Vec<Team>> {
        let ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        let mut teams: Vec<Team> = ledger.teams.values().cloned().collect();
        teams.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(teams)
    }
}
