//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256, base64url)
//! - Password hashing (Argon2id with salted PHC strings)

pub mod crypto;
pub mod password;
