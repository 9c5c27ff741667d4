//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_id::UserId, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// Unique constraint on `users.username`
const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_key";

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                username,
                password_hash,
                created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(classify_create_error)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                password_hash,
                created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                password_hash,
                created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

/// A duplicate name surfaces as a violation of the username unique key
fn classify_create_error(err: sqlx::Error) -> AuthError {
    let taken = match &err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation()
                && db_err.constraint() == Some(USERNAME_UNIQUE_CONSTRAINT)
        }
        _ => false,
    };

    if taken {
        AuthError::UserNameTaken
    } else {
        AuthError::Database(err)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let user_name = UserName::from_db(&self.username)
            .map_err(|e| AuthError::Internal(format!("Invalid username: {}", e)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.id),
            user_name,
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    #[derive(Debug, Clone, Copy)]
    enum Violation {
        Unique,
        ForeignKey,
    }

    /// Stand-in for a Postgres error carrying a constraint name
    #[derive(Debug)]
    struct ConstraintError {
        violation: Violation,
        constraint: Option<&'static str>,
    }

    impl fmt::Display for ConstraintError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:?} violation on {:?}", self.violation, self.constraint)
        }
    }

    impl StdError for ConstraintError {}

    impl DatabaseError for ConstraintError {
        fn message(&self) -> &str {
            "constraint violation"
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn kind(&self) -> ErrorKind {
            match self.violation {
                Violation::Unique => ErrorKind::UniqueViolation,
                Violation::ForeignKey => ErrorKind::ForeignKeyViolation,
            }
        }
    }

    fn db_error(violation: Violation, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ConstraintError {
            violation,
            constraint,
        }))
    }

    #[test]
    fn test_username_unique_violation_is_taken() {
        let err = classify_create_error(db_error(Violation::Unique, Some("users_username_key")));
        assert!(matches!(err, AuthError::UserNameTaken), "got {err:?}");
    }

    #[test]
    fn test_other_violations_stay_database_errors() {
        let cases = [
            db_error(Violation::Unique, Some("users_pkey")),
            db_error(Violation::Unique, None),
            db_error(Violation::ForeignKey, Some("users_username_key")),
            sqlx::Error::RowNotFound,
        ];

        for case in cases {
            let err = classify_create_error(case);
            assert!(matches!(err, AuthError::Database(_)), "got {err:?}");
            assert_eq!(err.status_code(), 500);
        }
    }
}
