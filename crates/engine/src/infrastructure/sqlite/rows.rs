//! Row mapping between SQLite and domain types.

use chrono::{DateTime, Utc};
use grimoire_domain::{
    CatalogSpell, CatalogSpellId, CharacterId, LearnedSpell, LearnedSpellId, Overlay, SpellFields,
    SpellLevel,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Sqlite, Row};

use crate::infrastructure::ports::RepoError;

/// Catalog columns in insert/select order.
pub(super) const CATALOG_COLUMNS: &str = "id, name, name_alt, level, school, casting_time, \
     duration, spell_range, source, verbal, somatic, material, concentration, ritual, \
     description, created_at, updated_at";

/// Catalog columns of a `catalog_spells c` join, prefixed with `c_`.
pub(super) const JOINED_CATALOG_COLUMNS: &str = "c.id AS c_id, c.name AS c_name, \
     c.name_alt AS c_name_alt, c.level AS c_level, c.school AS c_school, \
     c.casting_time AS c_casting_time, c.duration AS c_duration, \
     c.spell_range AS c_spell_range, c.source AS c_source, c.verbal AS c_verbal, \
     c.somatic AS c_somatic, c.material AS c_material, \
     c.concentration AS c_concentration, c.ritual AS c_ritual, \
     c.description AS c_description, c.created_at AS c_created_at, \
     c.updated_at AS c_updated_at";

/// Learned-spell columns of a `learned_spells l` query.
pub(super) const LEARNED_COLUMNS: &str = "l.id, l.character_id, l.catalog_spell_id, \
     l.is_prepared, l.overrides, l.created_at, l.updated_at";

fn get<'r, T>(row: &'r SqliteRow, column: &str) -> Result<T, RepoError>
where
    T: sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    row.try_get(column)
        .map_err(|e| RepoError::database("decode_row", e))
}

fn parse_column<T>(row: &SqliteRow, column: &str) -> Result<T, RepoError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw: String = get(row, column)?;
    raw.parse::<T>()
        .map_err(|e| RepoError::serialization(format!("{}: {}", column, e)))
}

/// Map a catalog row. `prefix` is `""` for direct selects and `"c_"` for joins.
pub(super) fn row_to_catalog(row: &SqliteRow, prefix: &str) -> Result<CatalogSpell, RepoError> {
    let col = |name: &str| format!("{prefix}{name}");

    let level: i64 = get(row, &col("level"))?;
    let level = u8::try_from(level)
        .map_err(|e| RepoError::serialization(format!("level {}: {}", level, e)))
        .and_then(|l| SpellLevel::new(l).map_err(RepoError::serialization))?;

    let fields = SpellFields {
        name: get(row, &col("name"))?,
        name_alt: get(row, &col("name_alt"))?,
        level,
        school: parse_column(row, &col("school"))?,
        casting_time: parse_column(row, &col("casting_time"))?,
        duration: parse_column(row, &col("duration"))?,
        range: parse_column(row, &col("spell_range"))?,
        source: parse_column(row, &col("source"))?,
        verbal: get(row, &col("verbal"))?,
        somatic: get(row, &col("somatic"))?,
        material: get(row, &col("material"))?,
        concentration: get(row, &col("concentration"))?,
        ritual: get(row, &col("ritual"))?,
        description: get(row, &col("description"))?,
    };

    let id: CatalogSpellId = parse_column(row, &col("id"))?;
    let created_at: DateTime<Utc> = get(row, &col("created_at"))?;
    let updated_at: DateTime<Utc> = get(row, &col("updated_at"))?;

    Ok(CatalogSpell::from_parts(id, fields, created_at, updated_at))
}

/// Map a `learned_spells l LEFT JOIN catalog_spells c` row.
pub(super) fn row_to_learned(row: &SqliteRow) -> Result<LearnedSpell, RepoError> {
    let id: LearnedSpellId = parse_column(row, "id")?;
    let character_id: CharacterId = parse_column(row, "character_id")?;
    let catalog_spell_id = get::<Option<String>>(row, "catalog_spell_id")?
        .map(|raw| {
            raw.parse::<CatalogSpellId>()
                .map_err(|e| RepoError::serialization(format!("catalog_spell_id: {}", e)))
        })
        .transpose()?;

    let catalog_spell = match get::<Option<String>>(row, "c_id")? {
        Some(_) => Some(row_to_catalog(row, "c_")?),
        None => None,
    };

    let overrides_json: String = get(row, "overrides")?;
    let overrides: Overlay<SpellFields> = serde_json::from_str(&overrides_json)
        .map_err(|e| RepoError::serialization(format!("overrides of {}: {}", id, e)))?;

    Ok(LearnedSpell::from_parts(
        id,
        character_id,
        catalog_spell_id,
        catalog_spell,
        get(row, "is_prepared")?,
        overrides,
        get(row, "created_at")?,
        get(row, "updated_at")?,
    ))
}

pub(super) fn overrides_to_json(record: &LearnedSpell) -> Result<String, RepoError> {
    serde_json::to_string(record.overrides()).map_err(RepoError::serialization)
}

/// Classify a write failure: key, reference and check violations become
/// `ConstraintViolation`, everything else `Database`.
pub(super) fn write_error(operation: &'static str, err: sqlx::Error) -> RepoError {
    let violates_constraint = err.as_database_error().is_some_and(|db| {
        db.is_unique_violation() || db.is_foreign_key_violation() || db.is_check_violation()
    });
    if violates_constraint {
        RepoError::constraint(operation, err)
    } else {
        RepoError::database(operation, err)
    }
}
