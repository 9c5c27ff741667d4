//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_id::UserId,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub password: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: UserId,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // Validate everything before touching storage
        let user_name =
            UserName::new(input.user_name).map_err(|e| AuthError::Validation(e.to_string()))?;
        let raw_password = RawPassword::new(input.password)?;

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let user = User::new(user_name, password_hash);

        // The store rejects a taken name atomically
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(SignUpOutput {
            user_id: user.user_id,
        })
    }
}
