//! SQLite learned spell repository.
//!
//! Records are always read joined with their catalog entry, so callers get
//! a record that can resolve its effective values without a second query.

use async_trait::async_trait;
use grimoire_domain::{CatalogSpell, CharacterId, LearnedSpell, LearnedSpellId};
use sqlx::{Sqlite, SqlitePool};

use super::catalog_repo::insert_catalog_row;
use super::rows::{
    overrides_to_json, row_to_learned, write_error, JOINED_CATALOG_COLUMNS, LEARNED_COLUMNS,
};
use crate::infrastructure::ports::{LearnedSpellRepo, RepoError};

pub struct SqliteLearnedSpellRepo {
    pool: SqlitePool,
}

impl SqliteLearnedSpellRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn select_joined(where_clause: &str) -> String {
        format!(
            "SELECT {}, {} FROM learned_spells l \
             LEFT JOIN catalog_spells c ON c.id = l.catalog_spell_id \
             WHERE {}",
            LEARNED_COLUMNS, JOINED_CATALOG_COLUMNS, where_clause
        )
    }
}

async fn update_learned_row<'e, E>(executor: E, record: &LearnedSpell) -> Result<u64, RepoError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let overrides = overrides_to_json(record)?;
    let result = sqlx::query(
        "UPDATE learned_spells SET catalog_spell_id = ?, is_prepared = ?, overrides = ?, \
         updated_at = ? WHERE id = ?",
    )
    .bind(record.catalog_spell_id().map(|id| id.to_string()))
    .bind(record.is_prepared())
    .bind(overrides)
    .bind(record.updated_at())
    .bind(record.id().to_string())
    .execute(executor)
    .await
    .map_err(|e| write_error("update_learned_spell", e))?;
    Ok(result.rows_affected())
}

#[async_trait]
impl LearnedSpellRepo for SqliteLearnedSpellRepo {
    async fn list_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<LearnedSpell>, RepoError> {
        let sql = Self::select_joined("l.character_id = ? ORDER BY l.created_at, l.id");
        let rows = sqlx::query(&sql)
            .bind(character_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_learned_spells", e))?;

        rows.iter().map(row_to_learned).collect()
    }

    async fn get(&self, id: LearnedSpellId) -> Result<Option<LearnedSpell>, RepoError> {
        let sql = Self::select_joined("l.id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_learned_spell", e))?;

        row.as_ref().map(row_to_learned).transpose()
    }

    async fn insert(&self, record: &LearnedSpell) -> Result<(), RepoError> {
        let overrides = overrides_to_json(record)?;
        sqlx::query(
            "INSERT INTO learned_spells \
             (id, character_id, catalog_spell_id, is_prepared, overrides, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id().to_string())
        .bind(record.character_id().to_string())
        .bind(record.catalog_spell_id().map(|id| id.to_string()))
        .bind(record.is_prepared())
        .bind(overrides)
        .bind(record.created_at())
        .bind(record.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("insert_learned_spell", e))?;
        Ok(())
    }

    async fn update(&self, record: &LearnedSpell) -> Result<(), RepoError> {
        if update_learned_row(&self.pool, record).await? == 0 {
            return Err(RepoError::not_found("LearnedSpell", record.id()));
        }
        Ok(())
    }

    async fn delete(&self, id: LearnedSpellId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM learned_spells WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_learned_spell", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("LearnedSpell", id));
        }
        Ok(())
    }

    async fn count_prepared(
        &self,
        character_id: CharacterId,
        cantrips_only: bool,
    ) -> Result<u32, RepoError> {
        // Effective level: override, then catalog, then 0 for bare personal rows.
        let level_test = if cantrips_only { "= 0" } else { "> 0" };
        let sql = format!(
            "SELECT COUNT(*) FROM learned_spells l \
             LEFT JOIN catalog_spells c ON c.id = l.catalog_spell_id \
             WHERE l.character_id = ? AND l.is_prepared = 1 \
             AND COALESCE(json_extract(l.overrides, '$.level.value'), c.level, 0) {}",
            level_test
        );
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(character_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("count_prepared_spells", e))?;

        u32::try_from(count).map_err(|e| RepoError::database("count_prepared_spells", e))
    }

    async fn publish_and_link(
        &self,
        record: &LearnedSpell,
        catalog: &CatalogSpell,
    ) -> Result<(), RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("begin_transaction", e))?;

        insert_catalog_row(&mut *tx, catalog).await?;

        // Dropping `tx` without commit rolls the catalog insert back.
        if update_learned_row(&mut *tx, record).await? == 0 {
            return Err(RepoError::not_found("LearnedSpell", record.id()));
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("commit_transaction", e))?;

        tracing::debug!(
            learned_spell_id = %record.id(),
            catalog_spell_id = %catalog.id(),
            "Published personal spell and linked record"
        );
        Ok(())
    }
}
