//! Edit learned spell use case.
//!
//! Patches a record's overrides. The catalog is never written, even when the
//! record is catalog-backed.

use std::sync::Arc;

use grimoire_domain::{LearnedSpell, LearnedSpellId, SpellPatch};

use crate::infrastructure::ports::{ClockPort, LearnedSpellRepo};

use super::error::SpellbookError;

pub struct EditLearnedSpell {
    learned: Arc<dyn LearnedSpellRepo>,
    clock: Arc<dyn ClockPort>,
}

impl EditLearnedSpell {
    pub fn new(learned: Arc<dyn LearnedSpellRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { learned, clock }
    }

    /// Apply `patch`: `Set` entries replace or add overrides, `Clear`
    /// entries drop them so the catalog value shows again. Fields not named
    /// are untouched.
    pub async fn execute(
        &self,
        id: LearnedSpellId,
        patch: SpellPatch,
    ) -> Result<LearnedSpell, SpellbookError> {
        let mut record = self
            .learned
            .get(id)
            .await?
            .ok_or_else(|| SpellbookError::not_found("LearnedSpell", id))?;

        record.edit(&patch, self.clock.now()).map_err(|e| {
            tracing::warn!(learned_spell_id = %id, error = %e, "Rejected spell edit");
            SpellbookError::from(e)
        })?;
        self.learned.update(&record).await?;

        tracing::info!(
            learned_spell_id = %id,
            changed_fields = patch.len(),
            overrides = record.overrides().len(),
            "Learned spell edited"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockLearnedSpellRepo;
    use crate::test_fixtures::{fixed_clock, fixed_now, spells};
    use grimoire_domain::{CatalogSpell, CharacterId, FieldSource, SpellField};

    fn learned_fireball() -> LearnedSpell {
        let catalog = CatalogSpell::publish(spells::fireball(), fixed_now()).unwrap();
        LearnedSpell::learn(CharacterId::new(), &catalog, fixed_now())
    }

    #[tokio::test]
    async fn when_record_missing_returns_not_found() {
        let mut learned = MockLearnedSpellRepo::new();
        learned.expect_get().returning(|_| Ok(None));
        learned.expect_update().never();

        let use_case = EditLearnedSpell::new(Arc::new(learned), fixed_clock());
        let result = use_case
            .execute(
                LearnedSpellId::new(),
                SpellPatch::new().set(SpellField::Description, "custom text"),
            )
            .await;

        assert!(matches!(result, Err(SpellbookError::NotFound { .. })));
    }

    #[tokio::test]
    async fn override_pins_only_the_edited_field() {
        let record = learned_fireball();
        let id = record.id();
        let mut learned = MockLearnedSpellRepo::new();
        learned
            .expect_get()
            .returning(move |_| Ok(Some(record.clone())));
        learned
            .expect_update()
            .withf(|record| {
                record.overrides().overridden_fields() == vec![SpellField::Description]
            })
            .times(1)
            .returning(|_| Ok(()));

        let use_case = EditLearnedSpell::new(Arc::new(learned), fixed_clock());
        let edited = use_case
            .execute(
                id,
                SpellPatch::new().set(SpellField::Description, "custom text"),
            )
            .await
            .unwrap();

        let effective = edited.effective();
        assert_eq!(effective.fields.description, "custom text");
        assert_eq!(effective.fields.name, "Fireball");
        assert_eq!(effective.fields.level.as_number(), 3);
        assert_eq!(effective.source_of(SpellField::Name), FieldSource::Catalog);
    }

    #[tokio::test]
    async fn clear_restores_catalog_value() {
        let mut record = learned_fireball();
        record
            .edit(
                &SpellPatch::new().set(SpellField::Description, "custom text"),
                fixed_now(),
            )
            .unwrap();
        let id = record.id();

        let mut learned = MockLearnedSpellRepo::new();
        learned
            .expect_get()
            .returning(move |_| Ok(Some(record.clone())));
        learned
            .expect_update()
            .withf(|record| record.overrides().is_empty())
            .returning(|_| Ok(()));

        let use_case = EditLearnedSpell::new(Arc::new(learned), fixed_clock());
        let edited = use_case
            .execute(id, SpellPatch::new().clear(SpellField::Description))
            .await
            .unwrap();

        assert_eq!(
            edited.effective().fields.description,
            spells::fireball().description
        );
    }
}
