//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::AccessGate;
use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth;

/// Create the Auth router for any repository implementation
///
/// Mount under `/api/auth`.
pub fn auth_router<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let gate = AccessGate::new(repo.clone(), config.clone());
    let state = AuthAppState { repo, config };

    Router::new()
        .route("/me", get(handlers::me))
        .route_layer(from_fn_with_state(gate, require_auth::<R>))
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .with_state(state)
}
