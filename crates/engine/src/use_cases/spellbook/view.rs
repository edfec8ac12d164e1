//! Read-side spellbook queries.

use std::sync::Arc;

use grimoire_domain::{
    group_by_level, CharacterId, EffectiveSpell, LearnedSpell, LevelGroup, PreparedCounts,
};

use crate::infrastructure::ports::LearnedSpellRepo;

use super::error::SpellbookError;

pub struct SpellbookView {
    learned: Arc<dyn LearnedSpellRepo>,
}

impl SpellbookView {
    pub fn new(learned: Arc<dyn LearnedSpellRepo>) -> Self {
        Self { learned }
    }

    pub async fn records(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<LearnedSpell>, SpellbookError> {
        Ok(self.learned.list_for_character(character_id).await?)
    }

    /// Every learned spell, resolved, in storage order.
    pub async fn list(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<EffectiveSpell>, SpellbookError> {
        let records = self.records(character_id).await?;
        Ok(records.iter().map(LearnedSpell::effective).collect())
    }

    /// Learned spells grouped by effective level.
    pub async fn grouped(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<LevelGroup>, SpellbookError> {
        let records = self.records(character_id).await?;
        Ok(group_by_level(&records))
    }

    /// Prepared cantrips and leveled spells, counted by the store.
    pub async fn prepared_counts(
        &self,
        character_id: CharacterId,
    ) -> Result<PreparedCounts, SpellbookError> {
        let cantrips = self.learned.count_prepared(character_id, true).await?;
        let leveled = self.learned.count_prepared(character_id, false).await?;
        Ok(PreparedCounts { cantrips, leveled })
    }
}
