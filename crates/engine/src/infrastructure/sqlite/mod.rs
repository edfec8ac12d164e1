//! SQLite spell storage.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

mod catalog_repo;
mod learned_repo;
mod rows;
mod schema;


pub use catalog_repo::SqliteCatalogSpellRepo;
pub use learned_repo::SqliteLearnedSpellRepo;
pub use schema::ensure_schema;

/// Create all SQLite repositories from one connection pool.
pub struct SqliteRepositories {
    pub catalog: Arc<SqliteCatalogSpellRepo>,
    pub learned: Arc<SqliteLearnedSpellRepo>,
}

impl SqliteRepositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            catalog: Arc::new(SqliteCatalogSpellRepo::new(pool.clone())),
            learned: Arc::new(SqliteLearnedSpellRepo::new(pool)),
        }
    }

    /// Open (creating if needed) the database at `db_path` and ensure the schema.
    pub async fn connect(db_path: &str) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("connect", e))?;
        ensure_schema(&pool).await?;
        tracing::info!(db_path = %db_path, "Connected to spell database");
        Ok(Self::new(pool))
    }
}
