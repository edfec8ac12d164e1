//! Catalog use cases.
//!
//! Search, direct publication and administrator edits of shared catalog
//! spells. Edits here propagate to every learned record that does not
//! override the edited fields.

use std::sync::Arc;

use grimoire_domain::{CatalogSpell, CatalogSpellId, SpellDraft, SpellPatch};

use crate::infrastructure::ports::{CatalogFilter, CatalogSpellRepo, ClockPort};
use crate::use_cases::spellbook::SpellbookError;

/// Container for catalog use cases.
pub struct CatalogUseCases {
    pub ops: Arc<CatalogOps>,
}

impl CatalogUseCases {
    pub fn new(ops: Arc<CatalogOps>) -> Self {
        Self { ops }
    }
}

/// Catalog operations.
pub struct CatalogOps {
    catalog: Arc<dyn CatalogSpellRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CatalogOps {
    pub fn new(catalog: Arc<dyn CatalogSpellRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { catalog, clock }
    }

    pub async fn search(
        &self,
        filter: CatalogFilter,
    ) -> Result<Vec<CatalogSpell>, SpellbookError> {
        Ok(self.catalog.list(filter).await?)
    }

    pub async fn get(&self, id: CatalogSpellId) -> Result<CatalogSpell, SpellbookError> {
        self.catalog
            .get(id)
            .await?
            .ok_or_else(|| SpellbookError::not_found("CatalogSpell", id))
    }

    /// Publish a new catalog spell, with the same checks as promotion.
    pub async fn publish(&self, draft: SpellDraft) -> Result<CatalogSpell, SpellbookError> {
        let fields = draft.validate()?;
        self.ensure_alt_name_free(&fields.name_alt, None).await?;

        let spell = CatalogSpell::publish(fields, self.clock.now())?;
        self.catalog
            .insert(&spell)
            .await
            .map_err(|e| SpellbookError::from_catalog_write(e, spell.name_alt()))?;

        tracing::info!(
            catalog_spell_id = %spell.id(),
            name = %spell.name(),
            "Catalog spell published"
        );
        Ok(spell)
    }

    /// Replace catalog field values. Fields cannot be cleared.
    pub async fn edit(
        &self,
        id: CatalogSpellId,
        patch: SpellPatch,
    ) -> Result<CatalogSpell, SpellbookError> {
        let mut spell = self.get(id).await?;
        spell.apply_edit(&patch, self.clock.now()).map_err(|e| {
            tracing::warn!(catalog_spell_id = %id, error = %e, "Rejected catalog edit");
            SpellbookError::from(e)
        })?;
        self.ensure_alt_name_free(spell.name_alt(), Some(id)).await?;
        self.catalog
            .update(&spell)
            .await
            .map_err(|e| SpellbookError::from_catalog_write(e, spell.name_alt()))?;

        tracing::info!(
            catalog_spell_id = %id,
            changed_fields = patch.len(),
            "Catalog spell edited"
        );
        Ok(spell)
    }

    async fn ensure_alt_name_free(
        &self,
        name_alt: &str,
        except: Option<CatalogSpellId>,
    ) -> Result<(), SpellbookError> {
        match self.catalog.find_by_alt_name(name_alt).await? {
            Some(existing) if Some(existing.id()) != except => {
                tracing::warn!(
                    existing_catalog_spell_id = %existing.id(),
                    name_alt = %name_alt,
                    "Rejected duplicate alternate name"
                );
                Err(SpellbookError::DuplicateCatalogEntry {
                    name_alt: existing.name_alt().to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}
