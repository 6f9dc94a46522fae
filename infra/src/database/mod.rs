//! Database module - MySQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management
//! - Store implementations for pins, attempts and blocks
//! - Schema bootstrap

pub mod connection;
pub mod mysql;
pub mod schema;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlAttemptStore, MySqlBlockStore, MySqlPinStore};
pub use schema::ensure_schema;
