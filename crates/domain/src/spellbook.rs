//! Read-side helpers over a character's learned spells.

use serde::{Deserialize, Serialize};

use crate::entities::{EffectiveSpell, LearnedSpell, SpellLevel};
use crate::names::compare_names;

/// Spells of one effective level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelGroup {
    pub level: SpellLevel,
    pub spells: Vec<EffectiveSpell>,
}

/// Group learned spells by effective level, ascending; within a level,
/// sort by effective name ignoring case and accents.
pub fn group_by_level(records: &[LearnedSpell]) -> Vec<LevelGroup> {
    let mut resolved: Vec<EffectiveSpell> = records.iter().map(LearnedSpell::effective).collect();
    resolved.sort_by(|a, b| {
        a.fields
            .level
            .cmp(&b.fields.level)
            .then_with(|| compare_names(&a.fields.name, &b.fields.name))
    });

    let mut groups: Vec<LevelGroup> = Vec::new();
    for spell in resolved {
        match groups.last_mut() {
            Some(group) if group.level == spell.fields.level => group.spells.push(spell),
            _ => groups.push(LevelGroup {
                level: spell.fields.level,
                spells: vec![spell],
            }),
        }
    }
    groups
}

/// Prepared spells split into cantrips and leveled spells.
///
/// Personal spells count exactly like catalog-backed ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedCounts {
    pub cantrips: u32,
    pub leveled: u32,
}

impl PreparedCounts {
    pub fn tally(records: &[LearnedSpell]) -> Self {
        records
            .iter()
            .filter(|r| r.is_prepared())
            .fold(Self::default(), |mut counts, record| {
                if record.effective().is_cantrip() {
                    counts.cantrips += 1;
                } else {
                    counts.leveled += 1;
                }
                counts
            })
    }

    pub fn total(&self) -> u32 {
        self.cantrips.saturating_add(self.leveled)
    }
}
