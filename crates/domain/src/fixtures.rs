//! Ready-made spell field sets for tests, in this crate and downstream.

#![allow(clippy::unwrap_used)]

use crate::entities::{
    CastingTime, SourceBook, SpellDuration, SpellFields, SpellLevel, SpellRange, SpellSchool,
};

pub fn fireball() -> SpellFields {
    SpellFields {
        name: "Fireball".into(),
        name_alt: "Boule de feu".into(),
        level: SpellLevel::new(3).unwrap(),
        school: SpellSchool::Evocation,
        casting_time: CastingTime::Action,
        duration: SpellDuration::Instantaneous,
        range: SpellRange::Feet150,
        source: SourceBook::PlayersHandbook,
        verbal: true,
        somatic: true,
        material: "a tiny ball of bat guano and sulfur".into(),
        concentration: false,
        ritual: false,
        description: "A bright streak flashes from your pointing finger...".into(),
    }
}

pub fn shadow_bolt() -> SpellFields {
    SpellFields {
        name: "Shadow Bolt".into(),
        name_alt: "Trait d'ombre".into(),
        level: SpellLevel::new(1).unwrap(),
        school: SpellSchool::Necromancy,
        casting_time: CastingTime::Action,
        duration: SpellDuration::Instantaneous,
        range: SpellRange::Feet120,
        source: SourceBook::Homebrew,
        verbal: true,
        somatic: false,
        material: String::new(),
        concentration: false,
        ritual: false,
        description: "A bolt of darkness strikes one creature.".into(),
    }
}

pub fn fire_bolt() -> SpellFields {
    SpellFields {
        name: "Fire Bolt".into(),
        name_alt: "Trait de feu".into(),
        level: SpellLevel::CANTRIP,
        school: SpellSchool::Evocation,
        casting_time: CastingTime::Action,
        duration: SpellDuration::Instantaneous,
        range: SpellRange::Feet120,
        source: SourceBook::PlayersHandbook,
        verbal: true,
        somatic: true,
        material: String::new(),
        concentration: false,
        ritual: false,
        description: "You hurl a mote of fire.".into(),
    }
}

/// A catalog entry whose alternate name carries non-ASCII letters.
pub fn lightning_lure() -> SpellFields {
    SpellFields {
        name: "Lightning Lure".into(),
        name_alt: "Éclair de foudre".into(),
        level: SpellLevel::CANTRIP,
        school: SpellSchool::Evocation,
        casting_time: CastingTime::Action,
        duration: SpellDuration::Instantaneous,
        range: SpellRange::Feet10,
        source: SourceBook::PlayersHandbook,
        verbal: true,
        somatic: false,
        material: "a metal weapon".into(),
        concentration: false,
        ritual: false,
        description: "You create a lash of lightning energy.".into(),
    }
}
