//! Grimoire domain: spell catalog entries, learned-spell overlays and the
//! rules that resolve what a character actually sees.
//!
//! Everything here is synchronous and free of I/O.

extern crate self as grimoire_domain;

pub mod entities;
pub mod error;
#[cfg(any(test, feature = "testing"))]
pub mod fixtures;
pub mod ids;
pub mod names;
pub mod overlay;
pub mod preparation;
pub mod spellbook;

pub use entities::{
    CastingTime, CatalogSpell, EffectiveSpell, LearnedSpell, SourceBook, SpellDraft,
    SpellDuration, SpellField, SpellFields, SpellLevel, SpellRange, SpellSchool, SpellValue,
    MAX_SPELL_LEVEL,
};
pub use error::DomainError;
pub use names::{compare_names, name_key, sort_key};
pub use ids::{CatalogSpellId, CharacterId, LearnedSpellId};
pub use overlay::{FieldChange, FieldSet, FieldSource, Overlay, OverlayPatch};
pub use preparation::{
    CantripTable, CantripTier, CasterProfile, PreparationAdvice, PreparationPolicy,
};
pub use spellbook::{group_by_level, LevelGroup, PreparedCounts};

/// Patch type for learned-spell overrides and catalog edits.
pub type SpellPatch = OverlayPatch<SpellFields>;
