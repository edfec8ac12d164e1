//! Create personal spell use case.

use std::sync::Arc;

use grimoire_domain::{CharacterId, LearnedSpell, SpellDraft};

use crate::infrastructure::ports::{ClockPort, LearnedSpellRepo};

use super::error::SpellbookError;

/// Creates a spell known only to one character.
///
/// A personal spell has nothing to fall back on, so every required field
/// must be supplied up front.
pub struct CreatePersonalSpell {
    learned: Arc<dyn LearnedSpellRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CreatePersonalSpell {
    pub fn new(learned: Arc<dyn LearnedSpellRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { learned, clock }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        draft: SpellDraft,
    ) -> Result<LearnedSpell, SpellbookError> {
        let fields = draft.validate().map_err(|e| {
            tracing::warn!(character_id = %character_id, error = %e, "Rejected personal spell");
            SpellbookError::from(e)
        })?;

        let record = LearnedSpell::personal(character_id, fields, self.clock.now())?;
        self.learned.insert(&record).await?;

        tracing::info!(
            character_id = %character_id,
            learned_spell_id = %record.id(),
            name = %record.effective().fields.name,
            "Personal spell created"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockClockPort, MockLearnedSpellRepo};
    use crate::test_fixtures::{fixed_clock, spells};
    use chrono::TimeZone;

    #[tokio::test]
    async fn when_fields_missing_lists_them_and_writes_nothing() {
        let mut learned = MockLearnedSpellRepo::new();
        learned.expect_insert().never();

        let draft = SpellDraft {
            name: Some("Shadow Bolt".into()),
            name_alt: Some("   ".into()),
            level: Some(1),
            school: Some("necromancy".into()),
            ..Default::default()
        };

        let use_case = CreatePersonalSpell::new(Arc::new(learned), fixed_clock());
        let result = use_case.execute(CharacterId::new(), draft).await;

        match result {
            Err(SpellbookError::IncompleteFields { missing }) => assert_eq!(
                missing,
                vec!["name_alt", "casting_time", "duration", "range", "source", "description"]
            ),
            other => panic!("expected IncompleteFields, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn when_label_unknown_returns_validation() {
        let mut learned = MockLearnedSpellRepo::new();
        learned.expect_insert().never();

        let mut draft = SpellDraft::from_fields(&spells::shadow_bolt());
        draft.school = Some("chronomancy".into());

        let use_case = CreatePersonalSpell::new(Arc::new(learned), fixed_clock());
        let result = use_case.execute(CharacterId::new(), draft).await;

        assert!(matches!(result, Err(SpellbookError::Validation(_))));
    }

    #[tokio::test]
    async fn when_complete_resolves_to_submitted_fields() {
        let character_id = CharacterId::new();
        let mut learned = MockLearnedSpellRepo::new();
        learned
            .expect_insert()
            .withf(move |record| record.is_personal() && record.character_id() == character_id)
            .times(1)
            .returning(|_| Ok(()));

        let draft = SpellDraft::from_fields(&spells::shadow_bolt());
        let use_case = CreatePersonalSpell::new(Arc::new(learned), fixed_clock());
        let record = use_case.execute(character_id, draft).await.unwrap();

        assert_eq!(record.catalog_spell_id(), None);
        assert_eq!(record.effective().fields, spells::shadow_bolt());
    }

    #[tokio::test]
    async fn timestamps_come_from_the_clock() {
        let now = chrono::Utc.timestamp_opt(1_650_000_000, 0).unwrap();
        let mut clock = MockClockPort::new();
        clock.expect_now().times(1).return_const(now);
        let mut learned = MockLearnedSpellRepo::new();
        learned.expect_insert().returning(|_| Ok(()));

        let use_case = CreatePersonalSpell::new(Arc::new(learned), Arc::new(clock));
        let record = use_case
            .execute(
                CharacterId::new(),
                SpellDraft::from_fields(&spells::shadow_bolt()),
            )
            .await
            .unwrap();

        assert_eq!(record.created_at(), now);
        assert_eq!(record.updated_at(), now);
    }
}
