//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::error::ErrorKind;
use uuid::Uuid;

use crate::domain::entity::{league::League, prediction::Prediction, team::Team};
use crate::domain::repository::{LeagueRepository, PredictionRepository, TeamRepository};
use crate::domain::value_object::{LeagueId, TeamId, display_name::DisplayName};
use crate::error::{LedgerError, LedgerResult};

// Constraint names from the schema migration
const PREDICTION_TEAM_UNIQUE: &str = "predictions_user_league_team_key";
const PREDICTION_RANK_UNIQUE: &str = "predictions_user_league_rank_key";
const PREDICTION_USER_FK: &str = "predictions_user_id_fkey";
const PREDICTION_LEAGUE_FK: &str = "predictions_league_id_fkey";
const PREDICTION_TEAM_FK: &str = "predictions_team_id_fkey";
const LEAGUE_NAME_UNIQUE: &str = "leagues_name_key";

/// PostgreSQL-backed ledger repository
#[derive(Clone)]
pub struct PgLedgerRepository {
    pool: PgPool,
}

impl PgLedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Prediction Repository Implementation
// ============================================================================

impl PredictionRepository for PgLedgerRepository {
    async fn insert(&self, prediction: &Prediction) -> LedgerResult<()> {
        // Rolled back on drop unless committed
        let mut tx = self.pool.begin().await?;

        let league_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM leagues WHERE id = $1)")
                .bind(prediction.league_id.as_uuid())
                .fetch_one(&mut *tx)
                .await?;
        if !league_exists {
            return Err(LedgerError::LeagueNotFound);
        }

        let team_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM teams WHERE id = $1)")
                .bind(prediction.team_id.as_uuid())
                .fetch_one(&mut *tx)
                .await?;
        if !team_exists {
            return Err(LedgerError::TeamNotFound);
        }

        // Unique indexes serialize concurrent writers for the same
        // (user, league); the loser gets a constraint violation here.
        sqlx::query(
            r#"
            INSERT INTO predictions (
                id,
                user_id,
                league_id,
                team_id,
                predicted_rank,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(prediction.prediction_id.as_uuid())
        .bind(prediction.user_id.as_uuid())
        .bind(prediction.league_id.as_uuid())
        .bind(prediction.team_id.as_uuid())
        .bind(prediction.predicted_rank.value())
        .bind(prediction.created_at)
        .execute(&mut *tx)
        .await
        .map_err(classify_prediction_error)?;

        tx.commit().await?;

        Ok(())
    }
}

/// Map constraint violations to their ledger meaning
fn classify_prediction_error(err: sqlx::Error) -> LedgerError {
    let violation = match &err {
        sqlx::Error::Database(db_err) => match (db_err.kind(), db_err.constraint()) {
            (ErrorKind::UniqueViolation, Some(PREDICTION_TEAM_UNIQUE)) => {
                Some(LedgerError::TeamAlreadyPredicted)
            }
            (ErrorKind::UniqueViolation, Some(PREDICTION_RANK_UNIQUE)) => {
                Some(LedgerError::RankAlreadyUsed)
            }
            (ErrorKind::ForeignKeyViolation, Some(PREDICTION_USER_FK)) => {
                Some(LedgerError::UserNotFound)
            }
            (ErrorKind::ForeignKeyViolation, Some(PREDICTION_LEAGUE_FK)) => {
                Some(LedgerError::LeagueNotFound)
            }
            (ErrorKind::ForeignKeyViolation, Some(PREDICTION_TEAM_FK)) => {
                Some(LedgerError::TeamNotFound)
            }
            _ => None,
        },
        _ => None,
    };

    violation.unwrap_or(LedgerError::Database(err))
}

fn classify_league_error(err: sqlx::Error) -> LedgerError {
    let taken = match &err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(LEAGUE_NAME_UNIQUE)
        }
        _ => false,
    };

    if taken {
        LedgerError::LeagueNameTaken
    } else {
        LedgerError::Database(err)
    }
}

// ============================================================================
// League Repository Implementation
// ============================================================================

impl LeagueRepository for PgLedgerRepository {
    async fn create_league(&self, league: &League) -> LedgerResult<()> {
        sqlx::query(
            r#"
            INSERT INTO leagues (
                id,
                name,
                external_id,
                created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(league.league_id.as_uuid())
        .bind(league.name.as_str())
        .bind(league.external_id.as_deref())
        .bind(league.created_at)
        .execute(&self.pool)
        .await
        .map_err(classify_league_error)?;

        Ok(())
    }

    async fn list_leagues(&self) -> LedgerResult<Vec<League>> {
        let rows = sqlx::query_as::<_, ReferenceRow>(
            r#"
            SELECT
                id,
                name,
                external_id,
                created_at
            FROM leagues
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReferenceRow::into_league).collect()
    }
}

// ============================================================================
// Team Repository Implementation
// ============================================================================

impl TeamRepository for PgLedgerRepository {
    async fn create_team(&self, team: &Team) -> LedgerResult<()> {
        sqlx::query(
            r#"
            INSERT INTO teams (
                id,
                name,
                external_id,
                created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(team.team_id.as_uuid())
        .bind(team.name.as_str())
        .bind(team.external_id.as_deref())
        .bind(team.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_teams(&self) -> LedgerResult<Vec<Team>> {
        let rows = sqlx::query_as::<_, ReferenceRow>(
            r#"
            SELECT
                id,
                name,
                external_id,
                created_at
            FROM teams
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReferenceRow::into_team).collect()
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

/// Leagues and teams share a column layout
#[derive(sqlx::FromRow)]
struct ReferenceRow {
    id: Uuid,
    name: String,
    external_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl ReferenceRow {
    fn display_name(&self) -> LedgerResult<DisplayName> {
        DisplayName::new(&self.name)
            .map_err(|e| LedgerError::Internal(format!("Invalid name in database: {}", e)))
    }

    fn into_league(self) -> LedgerResult<League> {
        Ok(League {
            league_id: LeagueId::from_uuid(self.id),
            name: self.display_name()?,
            external_id: self.external_id,
            created_at: self.created_at,
        })
    }

    fn into_team(self) -> LedgerResult<Team> {
        Ok(Team {
            team_id: TeamId::from_uuid(self.id),
            name: self.display_name()?,
            external_id: self.external_id,
            created_at: self.created_at,
        })
    }
}
