//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{user_id::UserId, user_name::UserName};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    ///
    /// Name uniqueness is enforced by the store itself: of two concurrent
    /// creates with the same name exactly one succeeds, the other fails
    /// with `AuthError::UserNameTaken`.
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by exact (case-sensitive) user name
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;
}
