//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration and login with username + password
//! - Stateless HS256 bearer tokens with a fixed lifetime
//! - Access gate that resolves a token to a live user
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, salted per user, optional pepper
//! - Login failures never reveal whether the name exists
//! - Tokens are not revocable; they expire

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{AccessGate, AuthConfig, TokenService};
pub use domain::{User, UserRepository};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryUserRepository, PgAuthRepository};
pub use presentation::{AuthenticatedUser, auth_router, require_auth};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
