//! User Entity
//!
//! Identity record owned by the credential store.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    user_id::UserId, user_name::UserName, user_password::UserPassword,
};

/// User entity
///
/// Immutable after registration. The password hash never leaves the auth
/// crate's DTO boundary.
#[derive(Debug, Clone)]
pub struct User {
    /// Opaque, stable identifier
    pub user_id: UserId,
    /// Unique, case-sensitive login name
    pub user_name: UserName,
    /// Argon2id PHC string
    pub password_hash: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh identifier
    pub fn new(user_name: UserName, password_hash: UserPassword) -> Self {
        Self {
            user_id: UserId::new(),
            user_name,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
