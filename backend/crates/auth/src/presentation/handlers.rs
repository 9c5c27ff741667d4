//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{SignInInput, SignInUseCase, SignUpInput, SignUpUseCase};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, MeResponse, RegisterRequest, RegisterResponse,
};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let input = SignUpInput {
        user_name: req.username,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: output.user_id,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let input = SignInInput {
        user_name: req.username,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(LoginResponse {
        expires_at: output.access_token.expires_at(),
        access_token: output.access_token.into_string(),
        token_type: "Bearer",
        user_id: output.user_id,
        username: output.user_name.as_str().to_string(),
    }))
}

// ============================================================================
// Me
// ============================================================================

/// GET /api/auth/me
pub async fn me(AuthenticatedUser(user): AuthenticatedUser) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: user.user_id,
        username: user.user_name.as_str().to_string(),
    })
}
