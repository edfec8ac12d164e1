//! Spell entities: catalog definitions, learned records and their fields.

mod catalog_spell;
mod learned_spell;
mod spell;
mod spell_draft;
pub(crate) mod spell_fields;

pub use catalog_spell::CatalogSpell;
pub use learned_spell::{EffectiveSpell, LearnedSpell};
pub use spell::{
    CastingTime, SourceBook, SpellDuration, SpellLevel, SpellRange, SpellSchool, MAX_SPELL_LEVEL,
};
pub use spell_draft::SpellDraft;
pub use spell_fields::{SpellField, SpellFields, SpellValue};
