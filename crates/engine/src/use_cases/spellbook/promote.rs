//! Promote to catalog use case.
//!
//! Publishes a personal spell as a new catalog entry and re-links the
//! record to it. One-way: catalog-backed records cannot be promoted.

use std::sync::Arc;

use grimoire_domain::{CatalogSpell, DomainError, LearnedSpell, LearnedSpellId, SpellDraft};

use crate::infrastructure::ports::{CatalogSpellRepo, ClockPort, LearnedSpellRepo};

use super::error::SpellbookError;

pub struct PromoteToCatalog {
    catalog: Arc<dyn CatalogSpellRepo>,
    learned: Arc<dyn LearnedSpellRepo>,
    clock: Arc<dyn ClockPort>,
}

impl PromoteToCatalog {
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

    /// Publish `draft` and link record `id` to it.
    ///
    /// Every check runs before the single transactional write, so on any
    /// error neither the catalog nor the record has changed.
    ///
    /// # Errors
    /// * `IncompleteFields` / `Validation` - the draft is not publishable
    /// * `NotFound` - no such record
    /// * `AlreadyInCatalog` - the record already has a catalog link
    /// * `DuplicateCatalogEntry` - a catalog spell has the same alternate name
    pub async fn execute(
        &self,
        id: LearnedSpellId,
        draft: SpellDraft,
    ) -> Result<LearnedSpell, SpellbookError> {
        let fields = draft.validate().map_err(|e| {
            tracing::warn!(learned_spell_id = %id, error = %e, "Rejected promotion draft");
            SpellbookError::from(e)
        })?;

        let mut record = self
            .learned
            .get(id)
            .await?
            .ok_or_else(|| SpellbookError::not_found("LearnedSpell", id))?;
        if !record.is_personal() {
            tracing::warn!(learned_spell_id = %id, "Rejected promotion of catalog-backed spell");
            return Err(SpellbookError::AlreadyInCatalog);
        }

        if let Some(existing) = self.catalog.find_by_alt_name(&fields.name_alt).await? {
            tracing::warn!(
                learned_spell_id = %id,
                existing_catalog_spell_id = %existing.id(),
                name_alt = %fields.name_alt,
                "Rejected promotion with duplicate alternate name"
            );
            return Err(SpellbookError::DuplicateCatalogEntry {
                name_alt: existing.name_alt().to_string(),
            });
        }

        let now = self.clock.now();
        let catalog = CatalogSpell::publish(fields, now)?;
        record
            .link_to_catalog(catalog.clone(), now)
            .map_err(|e| match e {
                DomainError::InvalidStateTransition(_) => SpellbookError::AlreadyInCatalog,
                other => other.into(),
            })?;
        self.learned
            .publish_and_link(&record, &catalog)
            .await
            .map_err(|e| SpellbookError::from_catalog_write(e, catalog.name_alt()))?;

        tracing::info!(
            learned_spell_id = %id,
            catalog_spell_id = %catalog.id(),
            name = %catalog.name(),
            "Personal spell promoted to catalog"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCatalogSpellRepo, MockLearnedSpellRepo, RepoError};
    use crate::test_fixtures::{fixed_clock, fixed_now, spells};
    use grimoire_domain::CharacterId;

    fn personal_shadow_bolt() -> LearnedSpell {
        LearnedSpell::personal(CharacterId::new(), spells::shadow_bolt(), fixed_now()).unwrap()
    }

    fn use_case(catalog: MockCatalogSpellRepo, learned: MockLearnedSpellRepo) -> PromoteToCatalog {
        PromoteToCatalog::new(Arc::new(catalog), Arc::new(learned), fixed_clock())
    }

    #[tokio::test]
    async fn promoted_record_resolves_to_submitted_fields_without_overrides() {
        let record = personal_shadow_bolt();
        let id = record.id();
        let before = record.effective().fields;

        let mut catalog = MockCatalogSpellRepo::new();
        catalog
            .expect_find_by_alt_name()
            .withf(|name| name == "Trait d'ombre")
            .returning(|_| Ok(None));
        let mut learned = MockLearnedSpellRepo::new();
        learned
            .expect_get()
            .returning(move |_| Ok(Some(record.clone())));
        learned
            .expect_publish_and_link()
            .withf(|record, catalog| {
                record.catalog_spell_id() == Some(catalog.id()) && record.overrides().is_empty()
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let draft = SpellDraft::from_fields(&spells::shadow_bolt());
        let promoted = use_case(catalog, learned).execute(id, draft).await.unwrap();

        assert!(!promoted.is_personal());
        assert!(promoted.overrides().is_empty());
        assert_eq!(promoted.effective().fields, before);
        assert_eq!(promoted.effective().fields, spells::shadow_bolt());
    }

    #[tokio::test]
    async fn when_draft_incomplete_nothing_is_read_or_written() {
        let catalog = MockCatalogSpellRepo::new();
        let mut learned = MockLearnedSpellRepo::new();
        learned.expect_get().never();
        learned.expect_publish_and_link().never();

        let mut draft = SpellDraft::from_fields(&spells::shadow_bolt());
        draft.description = Some(" ".into());

        let result = use_case(catalog, learned)
            .execute(LearnedSpellId::new(), draft)
            .await;
        assert!(matches!(
            result,
            Err(SpellbookError::IncompleteFields { ref missing }) if missing == &vec!["description".to_string()]
        ));
    }

    #[tokio::test]
    async fn when_record_is_catalog_backed_returns_already_in_catalog() {
        let catalog_spell = CatalogSpell::publish(spells::fireball(), fixed_now()).unwrap();
        let record = LearnedSpell::learn(CharacterId::new(), &catalog_spell, fixed_now());
        let id = record.id();

        let mut catalog = MockCatalogSpellRepo::new();
        catalog.expect_find_by_alt_name().never();
        let mut learned = MockLearnedSpellRepo::new();
        learned
            .expect_get()
            .returning(move |_| Ok(Some(record.clone())));
        learned.expect_publish_and_link().never();

        let result = use_case(catalog, learned)
            .execute(id, SpellDraft::from_fields(&spells::fireball()))
            .await;
        assert!(matches!(result, Err(SpellbookError::AlreadyInCatalog)));
    }

    #[tokio::test]
    async fn when_alt_name_taken_returns_duplicate_catalog_entry() {
        let record = personal_shadow_bolt();
        let id = record.id();
        let mut taken = spells::shadow_bolt();
        taken.name_alt = "TRAIT D'OMBRE".into();
        let existing = CatalogSpell::publish(taken, fixed_now()).unwrap();

        let mut catalog = MockCatalogSpellRepo::new();
        catalog
            .expect_find_by_alt_name()
            .returning(move |_| Ok(Some(existing.clone())));
        let mut learned = MockLearnedSpellRepo::new();
        learned
            .expect_get()
            .returning(move |_| Ok(Some(record.clone())));
        learned.expect_publish_and_link().never();

        let result = use_case(catalog, learned)
            .execute(id, SpellDraft::from_fields(&spells::shadow_bolt()))
            .await;
        assert!(matches!(
            result,
            Err(SpellbookError::DuplicateCatalogEntry { .. })
        ));
    }

    #[tokio::test]
    async fn when_store_rejects_write_returns_store_unavailable() {
        let record = personal_shadow_bolt();
        let id = record.id();

        let mut catalog = MockCatalogSpellRepo::new();
        catalog.expect_find_by_alt_name().returning(|_| Ok(None));
        let mut learned = MockLearnedSpellRepo::new();
        learned
            .expect_get()
            .returning(move |_| Ok(Some(record.clone())));
        learned
            .expect_publish_and_link()
            .returning(|_, _| Err(RepoError::database("commit_transaction", "disk full")));

        let result = use_case(catalog, learned)
            .execute(id, SpellDraft::from_fields(&spells::shadow_bolt()))
            .await;
        assert!(matches!(result, Err(SpellbookError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn when_alt_name_is_taken_concurrently_returns_duplicate_catalog_entry() {
        let record = personal_shadow_bolt();
        let id = record.id();

        let mut catalog = MockCatalogSpellRepo::new();
        catalog.expect_find_by_alt_name().returning(|_| Ok(None));
        let mut learned = MockLearnedSpellRepo::new();
        learned
            .expect_get()
            .returning(move |_| Ok(Some(record.clone())));
        learned.expect_publish_and_link().returning(|_, _| {
            Err(RepoError::constraint(
                "insert_catalog_spell",
                "UNIQUE constraint failed: catalog_spells.name_alt_key",
            ))
        });

        let result = use_case(catalog, learned)
            .execute(id, SpellDraft::from_fields(&spells::shadow_bolt()))
            .await;
        assert!(matches!(
            result,
            Err(SpellbookError::DuplicateCatalogEntry { ref name_alt }) if name_alt == "Trait d'ombre"
        ));
    }
}
