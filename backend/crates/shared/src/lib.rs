//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of vocabulary shared by the
//! auth and prediction contexts:
//! - Common error types and result aliases
//! - Typed entity identifiers
//!
//! Only things with the same meaning in every context belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
