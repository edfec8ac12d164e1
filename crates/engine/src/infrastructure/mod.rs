//! Infrastructure layer - external dependencies.

pub mod clock;
pub mod config;
pub mod ports;
pub mod sqlite;
