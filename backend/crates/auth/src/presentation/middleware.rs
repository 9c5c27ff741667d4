//! Auth Middleware
//!
//! Middleware for requiring a bearer token on protected routes.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::AccessGate;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;

/// The user resolved by [`require_auth`], stored in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

/// Middleware that requires a valid bearer token for a live user
///
/// Use with `axum::middleware::from_fn_with_state(gate, require_auth::<R>)`.
pub async fn require_auth<R>(
    State(gate): State<AccessGate<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Send + Sync + 'static,
{
    let token = bearer_token(req.headers())
        .map(str::to_owned)
        .ok_or(AuthError::MissingToken)?;

    let user = gate.authorize(&token).await?;

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
