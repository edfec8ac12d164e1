//! Repository port traits for spell storage.

use async_trait::async_trait;
use grimoire_domain::{CatalogSpell, CatalogSpellId, CharacterId, LearnedSpell, LearnedSpellId};

use super::error::RepoError;
use super::types::CatalogFilter;

// =============================================================================
// Catalog Store
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSpellRepo: Send + Sync {
    /// Catalog spells matching `filter`, ordered by level then name.
    async fn list(&self, filter: CatalogFilter) -> Result<Vec<CatalogSpell>, RepoError>;
    async fn get(&self, id: CatalogSpellId) -> Result<Option<CatalogSpell>, RepoError>;
    async fn insert(&self, spell: &CatalogSpell) -> Result<(), RepoError>;
    /// Replace the stored fields of an existing entry.
    async fn update(&self, spell: &CatalogSpell) -> Result<(), RepoError>;
    /// Entry whose alternate name equals `name_alt`, ignoring case.
    async fn find_by_alt_name(&self, name_alt: &str) -> Result<Option<CatalogSpell>, RepoError>;
}

// =============================================================================
// Learned Spell Store
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LearnedSpellRepo: Send + Sync {
    /// All records of a character, with catalog entries attached.
    async fn list_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<LearnedSpell>, RepoError>;
    /// One record, with its catalog entry attached.
    async fn get(&self, id: LearnedSpellId) -> Result<Option<LearnedSpell>, RepoError>;
    async fn insert(&self, record: &LearnedSpell) -> Result<(), RepoError>;
    /// Persist prepared flag, overrides and catalog link of an existing record.
    async fn update(&self, record: &LearnedSpell) -> Result<(), RepoError>;
    /// Hard delete.
    async fn delete(&self, id: LearnedSpellId) -> Result<(), RepoError>;
    /// Prepared records by effective level; personal records included.
    async fn count_prepared(
        &self,
        character_id: CharacterId,
        cantrips_only: bool,
    ) -> Result<u32, RepoError>;
    /// Insert `catalog` and save `record` (already re-linked to it) as one
    /// transaction. Neither write is visible if either fails.
    async fn publish_and_link(
        &self,
        record: &LearnedSpell,
        catalog: &CatalogSpell,
    ) -> Result<(), RepoError>;
}
