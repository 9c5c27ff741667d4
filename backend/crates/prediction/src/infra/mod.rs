//! Infrastructure Layer
//!
//! Database implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryLedgerRepository;
pub use postgres::PgLedgerRepository;
