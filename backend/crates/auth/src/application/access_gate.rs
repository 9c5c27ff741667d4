//! Access Gate
//!
//! Resolves a bearer token to a live user before protected work runs.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Token check plus existence check of the token's subject
pub struct AccessGate<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: TokenService,
}

impl<U> Clone for AccessGate<U>
where
    U: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            user_repo: self.user_repo.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

impl<U> AccessGate<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens: TokenService::new(config),
        }
    }

    /// Resolve a token to its user
    ///
    /// Fails with `TokenInvalid` for a bad or expired token and `UserNotFound`
    /// when the token is genuine but its subject is gone.
    pub async fn authorize(&self, token: &str) -> AuthResult<User> {
        let user_id = self.tokens.validate(token)?;

        self.user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Run `operation` on behalf of the token's user
    ///
    /// `operation` is never invoked when authorization fails.
    pub async fn guard<F, Fut, T, E>(&self, token: &str, operation: F) -> Result<T, E>
    where
        F: FnOnce(User) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<AuthError>,
    {
        let user = self.authorize(token).await?;
        operation(user).await
    }
}
