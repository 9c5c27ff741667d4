//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or missing input; storage was not touched
    #[error("{0}")]
    Validation(String),

    /// User name already exists
    #[error("Username already exists")]
    UserNameTaken,

    /// Unknown user or wrong password. Deliberately does not say which.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// No bearer token on a protected call
    #[error("Missing bearer token")]
    MissingToken,

    /// Bad signature, malformed, or expired
    #[error("Invalid or expired token")]
    TokenInvalid,

    /// Token was valid but its subject no longer exists
    #[error("User not found")]
    UserNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::UserNameTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::TokenInvalid => {
                ErrorKind::Unauthorized
            }
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError
    ///
    /// Storage and internal details stay in the logs; the caller only sees
    /// a generic persistence message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Persistence failure").with_action("Please try again later")
            }
            AuthError::Validation(msg) => AppError::bad_request(msg.clone()),
            AuthError::UserNameTaken => {
                AppError::conflict(self.to_string()).with_action("Please choose another username")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TokenInvalid => {
                tracing::warn!("Rejected invalid or expired token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let unauthorized = self.kind() == ErrorKind::Unauthorized;
        let mut response = self.to_app_error().into_response();
        if unauthorized {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.to_app_error()
    }
}
