//! Catalog spell - the canonical, shared spell definition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::spell_fields::SpellFields;
use crate::error::DomainError;
use crate::ids::CatalogSpellId;
use crate::names::name_key;
use crate::overlay::{FieldChange, FieldSet, OverlayPatch};

/// A published spell any character can learn.
///
/// # Invariants
///
/// - Every enumerated field holds an allowed value (enforced by the types)
/// - Name, alternate name and description are non-blank
///   (checked by [`CatalogSpell::publish`] and [`CatalogSpell::apply_edit`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSpell {
    id: CatalogSpellId,
    fields: SpellFields,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CatalogSpell {
    /// Publish a new catalog entry from a complete field set.
    pub fn publish(fields: SpellFields, now: DateTime<Utc>) -> Result<Self, DomainError> {
        fields.ensure_complete()?;
        Ok(Self {
            id: CatalogSpellId::new(),
            fields,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstruct from storage.
    pub fn from_parts(
        id: CatalogSpellId,
        fields: SpellFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            fields,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> CatalogSpellId {
        self.id
    }

    pub fn fields(&self) -> &SpellFields {
        &self.fields
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    pub fn name_alt(&self) -> &str {
        &self.fields.name_alt
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Lookup key of the display name.
    pub fn name_key(&self) -> String {
        name_key(&self.fields.name)
    }

    /// Lookup key of the alternate name. Two catalog entries collide exactly
    /// when these keys are equal.
    pub fn alt_name_key(&self) -> String {
        name_key(&self.fields.name_alt)
    }

    /// Administrator edit of the canonical record.
    ///
    /// Catalog fields cannot be cleared, only replaced. The edit is
    /// all-or-nothing: on error the spell is unchanged.
    pub fn apply_edit(
        &mut self,
        patch: &OverlayPatch<SpellFields>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        patch.check_kinds()?;
        let mut edited = self.fields.clone();
        for (field, change) in patch.iter() {
            match change {
                FieldChange::Set(value) => edited.set(field, value.clone())?,
                FieldChange::Clear => {
                    return Err(DomainError::validation(format!(
                        "Catalog field '{}' cannot be cleared",
                        field
                    )))
                }
            }
        }
        edited.ensure_complete()?;
        self.fields = edited;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{fireball, lightning_lure};
    use crate::entities::SpellField;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn publish_requires_complete_fields() {
        let mut fields = fireball();
        fields.name_alt = " ".into();
        assert!(matches!(
            CatalogSpell::publish(fields, now()),
            Err(DomainError::IncompleteFields { .. })
        ));
    }

    #[test]
    fn edit_replaces_fields_and_bumps_updated_at() {
        let mut spell = CatalogSpell::publish(fireball(), now()).unwrap();
        let later = now() + chrono::Duration::hours(1);
        spell
            .apply_edit(
                &OverlayPatch::new().set(SpellField::Description, "Updated text"),
                later,
            )
            .unwrap();
        assert_eq!(spell.fields().description, "Updated text");
        assert_eq!(spell.updated_at(), later);
        assert_eq!(spell.created_at(), now());
    }

    #[test]
    fn edit_cannot_clear_or_blank_fields() {
        let mut spell = CatalogSpell::publish(fireball(), now()).unwrap();
        assert!(spell
            .apply_edit(&OverlayPatch::new().clear(SpellField::Name), now())
            .is_err());
        assert!(spell
            .apply_edit(&OverlayPatch::new().set(SpellField::Name, ""), now())
            .is_err());
        assert_eq!(spell.name(), "Fireball");
    }

    #[test]
    fn alt_name_key_ignores_case_and_padding() {
        let spell = CatalogSpell::publish(fireball(), now()).unwrap();
        assert_eq!(spell.alt_name_key(), name_key("  BOULE DE FEU "));
        assert_ne!(spell.alt_name_key(), name_key("Boule de glace"));
    }

    #[test]
    fn alt_name_key_folds_non_ascii_case() {
        let spell = CatalogSpell::publish(lightning_lure(), now()).unwrap();
        assert_eq!(spell.alt_name_key(), "éclair de foudre");
        assert_eq!(spell.alt_name_key(), name_key("ÉCLAIR DE FOUDRE"));
        assert_eq!(spell.name_key(), "lightning lure");
    }
}
