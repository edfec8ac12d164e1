//! Grimoire Engine library.
//!
//! Spellbook lifecycle and catalog storage for characters.
//!
//! ## Structure
//!
//! - `use_cases/` - Spellbook and catalog operations
//! - `infrastructure/` - Ports, the SQLite adapter, clock and configuration
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Shared spell fixtures and throwaway databases for tests.
#[cfg(test)]
pub mod test_fixtures;


pub use app::App;
