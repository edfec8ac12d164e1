//! SQLite schema initialization - tables and indexes.

use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

/// Create the spell tables if they do not exist.
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS catalog_spells (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            name_alt TEXT NOT NULL,
            name_key TEXT NOT NULL,
            name_alt_key TEXT NOT NULL,
            level INTEGER NOT NULL CHECK (level BETWEEN 0 AND 9),
            school TEXT NOT NULL,
            casting_time TEXT NOT NULL,
            duration TEXT NOT NULL,
            spell_range TEXT NOT NULL,
            source TEXT NOT NULL,
            verbal INTEGER NOT NULL,
            somatic INTEGER NOT NULL,
            material TEXT NOT NULL DEFAULT '',
            concentration INTEGER NOT NULL,
            ritual INTEGER NOT NULL,
            description TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_catalog_spells_name_alt_key ON catalog_spells (name_alt_key)",
        "CREATE INDEX IF NOT EXISTS idx_catalog_spells_level ON catalog_spells (level)",
        r#"
        CREATE TABLE IF NOT EXISTS learned_spells (
            id TEXT PRIMARY KEY,
            character_id TEXT NOT NULL,
            catalog_spell_id TEXT REFERENCES catalog_spells (id),
            is_prepared INTEGER NOT NULL DEFAULT 0,
            overrides TEXT NOT NULL DEFAULT '{}',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_learned_spells_character ON learned_spells (character_id)",
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;
    }

    tracing::info!("SQLite spell schema initialized (tables and indexes ensured)");
    Ok(())
}
