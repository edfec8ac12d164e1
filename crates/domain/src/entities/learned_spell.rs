//! Learned spell - a character's link to a spell plus per-field overrides.
//!
//! # Two states
//!
//! - **Catalog-backed**: `catalog_spell_id` is set. Every field not in the
//!   overlay tracks the catalog entry, including later catalog edits.
//! - **Personal**: no catalog link. The overlay holds every field; there is
//!   nothing to fall back to.
//!
//! A personal record becomes catalog-backed exactly once, through
//! [`LearnedSpell::link_to_catalog`]. There is no way back.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog_spell::CatalogSpell;
use super::spell_fields::{SpellField, SpellFields};
use crate::error::DomainError;
use crate::ids::{CatalogSpellId, CharacterId, LearnedSpellId};
use crate::overlay::{FieldSource, Overlay, OverlayPatch};

/// A character's learned spell.
///
/// # Invariants
///
/// - A personal record (no catalog link) is created with every field
///   overridden and every required text field non-blank
/// - `is_prepared` is a concrete flag of the record, never an override
/// - An attached catalog spell always matches `catalog_spell_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnedSpell {
    id: LearnedSpellId,
    character_id: CharacterId,
    catalog_spell_id: Option<CatalogSpellId>,
    /// Join-resolved catalog entry, when loaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    catalog_spell: Option<CatalogSpell>,
    is_prepared: bool,
    overrides: Overlay<SpellFields>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LearnedSpell {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Learn a catalog spell: linked, no overrides, not prepared.
    pub fn learn(character_id: CharacterId, catalog: &CatalogSpell, now: DateTime<Utc>) -> Self {
        Self {
            id: LearnedSpellId::new(),
            character_id,
            catalog_spell_id: Some(catalog.id()),
            catalog_spell: Some(catalog.clone()),
            is_prepared: false,
            overrides: Overlay::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a personal spell with every field overridden.
    ///
    /// # Errors
    ///
    /// `DomainError::IncompleteFields` if a required text field is blank.
    pub fn personal(
        character_id: CharacterId,
        fields: SpellFields,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        fields.ensure_complete()?;
        Ok(Self {
            id: LearnedSpellId::new(),
            character_id,
            catalog_spell_id: None,
            catalog_spell: None,
            is_prepared: false,
            overrides: Overlay::from_fields(&fields),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstruct from storage. `catalog_spell` is the join-resolved entry,
    /// if the store loaded it.
    pub fn from_parts(
        id: LearnedSpellId,
        character_id: CharacterId,
        catalog_spell_id: Option<CatalogSpellId>,
        catalog_spell: Option<CatalogSpell>,
        is_prepared: bool,
        overrides: Overlay<SpellFields>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let catalog_spell = catalog_spell.filter(|c| Some(c.id()) == catalog_spell_id);
        Self {
            id,
            character_id,
            catalog_spell_id,
            catalog_spell,
            is_prepared,
            overrides,
            created_at,
            updated_at,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> LearnedSpellId {
        self.id
    }

    pub fn character_id(&self) -> CharacterId {
        self.character_id
    }

    pub fn catalog_spell_id(&self) -> Option<CatalogSpellId> {
        self.catalog_spell_id
    }

    pub fn catalog_spell(&self) -> Option<&CatalogSpell> {
        self.catalog_spell.as_ref()
    }

    pub fn is_personal(&self) -> bool {
        self.catalog_spell_id.is_none()
    }

    pub fn is_prepared(&self) -> bool {
        self.is_prepared
    }

    pub fn overrides(&self) -> &Overlay<SpellFields> {
        &self.overrides
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Attach the join-resolved catalog entry. Ignored if it is not the
    /// entry this record links to.
    pub fn attach_catalog(&mut self, catalog: CatalogSpell) {
        if Some(catalog.id()) == self.catalog_spell_id {
            self.catalog_spell = Some(catalog);
        }
    }

    /// Merge a field-level patch into the overrides. Never touches the
    /// catalog entry. On error the record is unchanged.
    pub fn edit(
        &mut self,
        patch: &OverlayPatch<SpellFields>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.overrides.apply(patch)?;
        self.updated_at = now;
        Ok(())
    }

    pub fn set_prepared(&mut self, is_prepared: bool, now: DateTime<Utc>) {
        self.is_prepared = is_prepared;
        self.updated_at = now;
    }

    /// Re-link a personal record to a freshly published catalog entry and
    /// drop every override, so the record shows exactly the catalog values.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidStateTransition` if the record already has a
    /// catalog link.
    pub fn link_to_catalog(
        &mut self,
        catalog: CatalogSpell,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if let Some(existing) = self.catalog_spell_id {
            return Err(DomainError::invalid_state_transition(format!(
                "Learned spell {} is already linked to catalog spell {}",
                self.id, existing
            )));
        }
        self.catalog_spell_id = Some(catalog.id());
        self.catalog_spell = Some(catalog);
        self.overrides.clear_all();
        self.updated_at = now;
        Ok(())
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Compute the effective value of every field.
    ///
    /// Per field: override, else the attached catalog value, else the safe
    /// default. Pure and infallible.
    pub fn effective(&self) -> EffectiveSpell {
        let base = self.catalog_spell.as_ref().map(CatalogSpell::fields);
        EffectiveSpell {
            learned_spell_id: self.id,
            catalog_spell_id: self.catalog_spell_id,
            is_prepared: self.is_prepared,
            is_personal: self.is_personal(),
            has_catalog: base.is_some(),
            overridden: self.overrides.overridden_fields().into_iter().collect(),
            fields: self.overrides.resolve(base),
        }
    }
}

/// The display view of a learned spell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveSpell {
    pub learned_spell_id: LearnedSpellId,
    pub catalog_spell_id: Option<CatalogSpellId>,
    pub is_prepared: bool,
    pub is_personal: bool,
    /// Whether a catalog entry was available to resolve against
    pub has_catalog: bool,
    /// Fields whose value comes from the record's own overrides
    pub overridden: BTreeSet<SpellField>,
    pub fields: SpellFields,
}

impl EffectiveSpell {
    pub fn source_of(&self, field: SpellField) -> FieldSource {
        if self.overridden.contains(&field) {
            FieldSource::Override
        } else if self.has_catalog {
            FieldSource::Catalog
        } else {
            FieldSource::Default
        }
    }

    pub fn is_cantrip(&self) -> bool {
        self.fields.level.is_cantrip()
    }
}
