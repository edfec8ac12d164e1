//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Spell storage (SQLite today, any relational store tomorrow)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;
pub mod types;

pub use error::RepoError;
pub use repos::*;
pub use testing::ClockPort;
pub use types::CatalogFilter;

#[cfg(test)]
pub use testing::MockClockPort;
