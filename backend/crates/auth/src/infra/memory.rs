//! In-Memory Repository Implementation
//!
//! Process-local store with the same uniqueness guarantees as the
//! PostgreSQL repository. Used by tests and local tooling.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_id::UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Users {
    by_id: HashMap<UserId, User>,
    by_name: HashMap<String, UserId>,
}

/// In-memory auth repository
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<Users>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a user outright; existing tokens for it stop authorizing
    pub fn remove(&self, user_id: &UserId) -> Option<User> {
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        let user = users.by_id.remove(user_id)?;
        users.by_name.remove(user.user_name.as_str());
        Some(user)
    }

    pub fn len(&self) -> usize {
        self.users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .by_id
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);

        if users.by_name.contains_key(user.user_name.as_str()) {
            return Err(AuthError::UserNameTaken);
        }

        users
            .by_name
            .insert(user.user_name.as_str().to_string(), user.user_id);
        users.by_id.insert(user.user_id, user.clone());

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(users.by_id.get(user_id).cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(users
            .by_name
            .get(user_name.as_str())
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }
}
