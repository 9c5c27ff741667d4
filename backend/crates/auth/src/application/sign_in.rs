//! Sign In Use Case
//!
//! Verifies credentials and issues an access token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    access_token::AccessToken,
    user_id::UserId,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub access_token: AccessToken,
    pub user_id: UserId,
    pub user_name: UserName,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: TokenService,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens: TokenService::new(config.clone()),
            config,
        }
    }

    /// Check a name/password pair against the store
    ///
    /// Unknown name and wrong password are indistinguishable to the caller.
    pub async fn verify(&self, user_name: &str, password: String) -> AuthResult<UserId> {
        self.authenticate(user_name, password)
            .await
            .map(|user| user.user_id)
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let user = self.authenticate(&input.user_name, input.password).await?;
        let access_token = self.tokens.issue(user.user_id)?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput {
            access_token,
            user_id: user.user_id,
            user_name: user.user_name,
        })
    }

    async fn authenticate(&self, user_name: &str, password: String) -> AuthResult<User> {
        // A password that could never have been registered cannot match
        let raw_password = RawPassword::new(password).map_err(|_| AuthError::InvalidCredentials)?;

        let found = match UserName::new(user_name) {
            Ok(user_name) => self.user_repo.find_by_user_name(&user_name).await?,
            Err(_) => None,
        };

        let Some(user) = found else {
            // Unknown names pay the same Argon2 cost as a wrong password
            UserPassword::dummy().verify(&raw_password, self.config.pepper());
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        if user.password_hash.needs_rehash() {
            tracing::warn!(user_id = %user.user_id, "Stored password hash uses a legacy algorithm");
        }

        Ok(user)
    }
}
