//! SQLite catalog spell repository.

use async_trait::async_trait;
use grimoire_domain::{compare_names, name_key, CatalogSpell, CatalogSpellId};
use sqlx::{Sqlite, SqlitePool};

use super::rows::{row_to_catalog, write_error, CATALOG_COLUMNS};
use crate::infrastructure::ports::{CatalogFilter, CatalogSpellRepo, RepoError};

pub struct SqliteCatalogSpellRepo {
    pool: SqlitePool,
}

impl SqliteCatalogSpellRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Insert a catalog row on any executor, so promotion can reuse it inside a
/// transaction.
pub(super) async fn insert_catalog_row<'e, E>(
    executor: E,
    spell: &CatalogSpell,
) -> Result<(), RepoError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let fields = spell.fields();
    let query = format!(
        "INSERT INTO catalog_spells ({}, name_key, name_alt_key) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        CATALOG_COLUMNS
    );
    sqlx::query(&query)
        .bind(spell.id().to_string())
        .bind(&fields.name)
        .bind(&fields.name_alt)
        .bind(i64::from(fields.level.as_number()))
        .bind(fields.school.as_str())
        .bind(fields.casting_time.as_str())
        .bind(fields.duration.as_str())
        .bind(fields.range.as_str())
        .bind(fields.source.as_str())
        .bind(fields.verbal)
        .bind(fields.somatic)
        .bind(&fields.material)
        .bind(fields.concentration)
        .bind(fields.ritual)
        .bind(&fields.description)
        .bind(spell.created_at())
        .bind(spell.updated_at())
        .bind(spell.name_key())
        .bind(spell.alt_name_key())
        .execute(executor)
        .await
        .map_err(|e| write_error("insert_catalog_spell", e))?;
    Ok(())
}

/// Substring pattern over the stored name keys. LIKE wildcards in the
/// user's text match literally.
fn like_pattern(text: &str) -> String {
    let key = name_key(text);
    let mut escaped = String::with_capacity(key.len() + 2);
    escaped.push('%');
    for c in key.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl CatalogSpellRepo for SqliteCatalogSpellRepo {
    async fn list(&self, filter: CatalogFilter) -> Result<Vec<CatalogSpell>, RepoError> {
        let mut conditions: Vec<&str> = Vec::new();
        if filter.level.is_some() {
            conditions.push("level = ?");
        }
        if filter.school.is_some() {
            conditions.push("school = ?");
        }
        if filter.text.is_some() {
            conditions.push(
                "(name_key LIKE ? ESCAPE '\\' OR name_alt_key LIKE ? ESCAPE '\\')",
            );
        }

        let mut sql = format!("SELECT {} FROM catalog_spells", CATALOG_COLUMNS);
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY level, name_key, name");

        let mut query = sqlx::query(&sql);
        if let Some(level) = filter.level {
            query = query.bind(i64::from(level.as_number()));
        }
        if let Some(school) = filter.school {
            query = query.bind(school.as_str());
        }
        if let Some(text) = filter.text.as_deref() {
            let pattern = like_pattern(text);
            query = query.bind(pattern.clone()).bind(pattern);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_catalog_spells", e))?;

        let mut spells = rows
            .iter()
            .map(|row| row_to_catalog(row, ""))
            .collect::<Result<Vec<_>, _>>()?;
        // SQLite only folds ASCII; the display order ignores accents too.
        spells.sort_by(|a, b| {
            a.fields()
                .level
                .cmp(&b.fields().level)
                .then_with(|| compare_names(a.name(), b.name()))
        });
        Ok(spells)
    }

    async fn get(&self, id: CatalogSpellId) -> Result<Option<CatalogSpell>, RepoError> {
        let sql = format!("SELECT {} FROM catalog_spells WHERE id = ?", CATALOG_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_catalog_spell", e))?;

        row.map(|row| row_to_catalog(&row, "")).transpose()
    }

    async fn insert(&self, spell: &CatalogSpell) -> Result<(), RepoError> {
        insert_catalog_row(&self.pool, spell).await?;
        tracing::debug!(catalog_spell_id = %spell.id(), name = %spell.name(), "Inserted catalog spell");
        Ok(())
    }

    async fn update(&self, spell: &CatalogSpell) -> Result<(), RepoError> {
        let fields = spell.fields();
        let result = sqlx::query(
            "UPDATE catalog_spells SET name = ?, name_alt = ?, level = ?, school = ?, \
             casting_time = ?, duration = ?, spell_range = ?, source = ?, verbal = ?, \
             somatic = ?, material = ?, concentration = ?, ritual = ?, description = ?, \
             updated_at = ?, name_key = ?, name_alt_key = ? WHERE id = ?",
        )
        .bind(&fields.name)
        .bind(&fields.name_alt)
        .bind(i64::from(fields.level.as_number()))
        .bind(fields.school.as_str())
        .bind(fields.casting_time.as_str())
        .bind(fields.duration.as_str())
        .bind(fields.range.as_str())
        .bind(fields.source.as_str())
        .bind(fields.verbal)
        .bind(fields.somatic)
        .bind(&fields.material)
        .bind(fields.concentration)
        .bind(fields.ritual)
        .bind(&fields.description)
        .bind(spell.updated_at())
        .bind(spell.name_key())
        .bind(spell.alt_name_key())
        .bind(spell.id().to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("update_catalog_spell", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("CatalogSpell", spell.id()));
        }
        Ok(())
    }

    async fn find_by_alt_name(&self, name_alt: &str) -> Result<Option<CatalogSpell>, RepoError> {
        let sql = format!(
            "SELECT {} FROM catalog_spells WHERE name_alt_key = ?",
            CATALOG_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(name_key(name_alt))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("find_catalog_spell_by_alt_name", e))?;

        row.map(|row| row_to_catalog(&row, "")).transpose()
    }
}
