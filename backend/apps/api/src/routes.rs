//! Router Composition
//!
//! Service banner routes plus the auth and prediction contexts.

use std::sync::Arc;

use auth::{AccessGate, AuthConfig, UserRepository, auth_router};
use axum::{Json, Router, routing::get};
use prediction::{LeagueRepository, PredictionRepository, TeamRepository, prediction_router};
use serde::Serialize;

pub const WELCOME_MESSAGE: &str = "Welcome to the Football Predictor API! Version 1.0";

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub greeting: &'static str,
    pub status: &'static str,
}

/// GET /
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE,
    })
}

/// GET /api/hello
pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        greeting: "Hello from the API!",
        status: "success",
    })
}

/// Build the application router over any repository implementations
pub fn app_router<U, L>(users: Arc<U>, ledger: Arc<L>, auth_config: Arc<AuthConfig>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    L: PredictionRepository + LeagueRepository + TeamRepository + Send + Sync + 'static,
{
    let gate = AccessGate::new(users.clone(), auth_config.clone());

    Router::new()
        .route("/", get(welcome))
        .route("/api/hello", get(hello))
        .nest("/api/auth", auth_router(users, auth_config))
        .nest("/api", prediction_router(ledger, gate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::InMemoryUserRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use prediction::InMemoryLedgerRepository;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        app_router(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryLedgerRepository::new()),
            Arc::new(AuthConfig::with_random_secret()),
        )
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_welcome() {
        let (status, body) = get_json(app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": WELCOME_MESSAGE}));
    }

    #[tokio::test]
    async fn test_hello() {
        let (status, body) = get_json(app(), "/api/hello").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"greeting": "Hello from the API!", "status": "success"})
        );
    }

    #[tokio::test]
    async fn test_contexts_are_mounted() {
        let (status, body) = get_json(app(), "/api/leagues").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, _) = get_json(app(), "/api/auth/me").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
