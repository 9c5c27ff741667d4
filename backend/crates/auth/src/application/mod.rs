//! Application Layer
//!
//! Use cases and application services.

pub mod access_gate;
pub mod config;
pub mod sign_in;
pub mod sign_up;
pub mod token;

// Re-exports
pub use access_gate::AccessGate;
pub use config::AuthConfig;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token::TokenService;
