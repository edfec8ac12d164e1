//! Common test helpers: spell field sets, fixed clocks and a throwaway
//! SQLite database.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::ports::ClockPort;
use crate::infrastructure::sqlite::SqliteRepositories;

// =============================================================================
// Clock
// =============================================================================

pub fn fixed_now() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

pub fn fixed_clock() -> Arc<dyn ClockPort> {
    Arc::new(FixedClock(fixed_now()))
}

// =============================================================================
// Spells
// =============================================================================

pub use grimoire_domain::fixtures as spells;

// =============================================================================
// Database
// =============================================================================

/// A fresh on-disk database. Keep the `TempDir` alive for the test's duration.
pub async fn temp_repositories() -> (tempfile::TempDir, SqliteRepositories) {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let db_path = temp_dir.path().join("grimoire.db");
    let repos = SqliteRepositories::connect(&db_path.to_string_lossy())
        .await
        .expect("open database");
    (temp_dir, repos)
}
