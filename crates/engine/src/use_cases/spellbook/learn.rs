//! Learn spell use case.
//!
//! Links a catalog spell to a character with no overrides.

use std::sync::Arc;

use grimoire_domain::{CatalogSpellId, CharacterId, LearnedSpell};

use crate::infrastructure::ports::{CatalogSpellRepo, ClockPort, LearnedSpellRepo};

use super::error::SpellbookError;

pub struct LearnSpell {
    catalog: Arc<dyn CatalogSpellRepo>,
    learned: Arc<dyn LearnedSpellRepo>,
    clock: Arc<dyn ClockPort>,
}

impl LearnSpell {
    pub fn new(
        catalog: Arc<dyn CatalogSpellRepo>,
        learned: Arc<dyn LearnedSpellRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            catalog,
            learned,
            clock,
        }
    }

    /// Learn `catalog_spell_id`. The returned record has its catalog entry
    /// attached for immediate display.
    ///
    /// # Errors
    /// * `NotFound` - no such catalog spell
    /// * `DuplicateLearn` - the character already holds a record for it
    pub async fn execute(
        &self,
        character_id: CharacterId,
        catalog_spell_id: CatalogSpellId,
    ) -> Result<LearnedSpell, SpellbookError> {
        let catalog = self
            .catalog
            .get(catalog_spell_id)
            .await?
            .ok_or_else(|| SpellbookError::not_found("CatalogSpell", catalog_spell_id))?;

        let known = self.learned.list_for_character(character_id).await?;
        if known
            .iter()
            .any(|record| record.catalog_spell_id() == Some(catalog_spell_id))
        {
            tracing::warn!(
                character_id = %character_id,
                catalog_spell_id = %catalog_spell_id,
                "Rejected duplicate learn"
            );
            return Err(SpellbookError::DuplicateLearn {
                name: catalog.name().to_string(),
            });
        }

        let record = LearnedSpell::learn(character_id, &catalog, self.clock.now());
        self.learned.insert(&record).await?;

        tracing::info!(
            character_id = %character_id,
            learned_spell_id = %record.id(),
            catalog_spell_id = %catalog_spell_id,
            name = %catalog.name(),
            "Spell learned"
        );
        Ok(record)
    }
}
