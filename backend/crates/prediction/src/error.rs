//! Ledger Error Types
//!
//! Prediction-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Ledger-specific result type alias
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-specific error variants
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed or missing input; storage was not touched
    #[error("{0}")]
    Validation(String),

    /// (user, league, team) already has a prediction
    #[error("Team already predicted in this league")]
    TeamAlreadyPredicted,

    /// (user, league, rank) already has a prediction
    #[error("Rank already used in this league")]
    RankAlreadyUsed,

    /// League name already exists
    #[error("League name already exists")]
    LeagueNameTaken,

    #[error("League not found")]
    LeagueNotFound,

    #[error("Team not found")]
    TeamNotFound,

    /// The submitting user vanished between authorization and commit
    #[error("User not found")]
    UserNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Validation(_) => ErrorKind::BadRequest,
            LedgerError::TeamAlreadyPredicted
            | LedgerError::RankAlreadyUsed
            | LedgerError::LeagueNameTaken => ErrorKind::Conflict,
            LedgerError::LeagueNotFound | LedgerError::TeamNotFound | LedgerError::UserNotFound => {
                ErrorKind::NotFound
            }
            LedgerError::Database(_) | LedgerError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            LedgerError::Database(_) | LedgerError::Internal(_) => {
                AppError::internal("Persistence failure").with_action("Please try again later")
            }
            LedgerError::Validation(msg) => AppError::bad_request(msg.clone()),
            LedgerError::TeamAlreadyPredicted => AppError::conflict(self.to_string())
                .with_action("Each team can be predicted once per league"),
            LedgerError::RankAlreadyUsed => AppError::conflict(self.to_string())
                .with_action("Each rank can be used once per league"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            LedgerError::Database(e) => {
                tracing::error!(error = %e, "Ledger database error");
            }
            LedgerError::Internal(msg) => {
                tracing::error!(message = %msg, "Ledger internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Ledger error");
            }
        }
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        err.to_app_error()
    }
}
