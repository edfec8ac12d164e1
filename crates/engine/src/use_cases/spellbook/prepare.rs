//! Prepared-flag use case and preparation advice.
//!
//! The preparation limits are advisory. `execute` always applies the flag;
//! callers that want to warn first ask `advise`.

use std::sync::Arc;

use grimoire_domain::{
    CasterProfile, LearnedSpell, LearnedSpellId, PreparationAdvice, PreparationPolicy,
    PreparedCounts,
};

use crate::infrastructure::ports::{ClockPort, LearnedSpellRepo};

use super::error::SpellbookError;

pub struct SetPrepared {
    learned: Arc<dyn LearnedSpellRepo>,
    clock: Arc<dyn ClockPort>,
    policy: PreparationPolicy,
}

impl SetPrepared {
    pub fn new(
        learned: Arc<dyn LearnedSpellRepo>,
        clock: Arc<dyn ClockPort>,
        policy: PreparationPolicy,
    ) -> Self {
        Self {
            learned,
            clock,
            policy,
        }
    }

    pub fn policy(&self) -> &PreparationPolicy {
        &self.policy
    }

    pub async fn execute(
        &self,
        id: LearnedSpellId,
        is_prepared: bool,
    ) -> Result<LearnedSpell, SpellbookError> {
        let mut record = self.load(id).await?;
        record.set_prepared(is_prepared, self.clock.now());
        self.learned.update(&record).await?;

        tracing::info!(
            learned_spell_id = %id,
            character_id = %record.character_id(),
            is_prepared,
            "Prepared flag set"
        );
        Ok(record)
    }

    /// Advise on preparing `id` given the character's other prepared spells.
    pub async fn advise(
        &self,
        id: LearnedSpellId,
        caster: CasterProfile,
    ) -> Result<PreparationAdvice, SpellbookError> {
        let record = self.load(id).await?;
        let is_cantrip = record.effective().is_cantrip();

        let mut prepared = self
            .learned
            .count_prepared(record.character_id(), is_cantrip)
            .await?;
        // The spell itself does not count against its own preparation.
        if record.is_prepared() {
            prepared = prepared.saturating_sub(1);
        }

        let counts = if is_cantrip {
            PreparedCounts {
                cantrips: prepared,
                leveled: 0,
            }
        } else {
            PreparedCounts {
                cantrips: 0,
                leveled: prepared,
            }
        };
        let advice = self.policy.assess(&counts, &caster, is_cantrip);
        if !advice.is_within_limit() {
            tracing::debug!(learned_spell_id = %id, ?advice, "Preparation would exceed limit");
        }
        Ok(advice)
    }

    async fn load(&self, id: LearnedSpellId) -> Result<LearnedSpell, SpellbookError> {
        self.learned
            .get(id)
            .await?
            .ok_or_else(|| SpellbookError::not_found("LearnedSpell", id))
    }
}
