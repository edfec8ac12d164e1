//! Preparation limits.
//!
//! These are game-balance guidelines, not data-integrity rules: nothing in
//! the spell store enforces them. Callers ask for advice and decide whether
//! to prepare anyway.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::spellbook::PreparedCounts;

/// The caster whose limits are being computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasterProfile {
    /// Score of the spellcasting ability (e.g. INT for a wizard)
    pub casting_ability_score: i32,
    pub caster_level: u8,
}

impl CasterProfile {
    pub fn new(casting_ability_score: i32, caster_level: u8) -> Self {
        Self {
            casting_ability_score,
            caster_level,
        }
    }

    /// Ability modifier, rounded down: 9 -> -1, 10 -> 0, 17 -> 3.
    pub fn ability_modifier(&self) -> i32 {
        self.casting_ability_score.saturating_sub(10).div_euclid(2)
    }
}

/// One row of the cantrip table: from `min_level` on, `count` cantrips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CantripTier {
    pub min_level: u8,
    pub count: u32,
}

/// Level-indexed cantrip limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CantripTable(Vec<CantripTier>);

impl CantripTable {
    /// Build a table; tiers are sorted by level.
    ///
    /// # Errors
    ///
    /// `DomainError::Validation` if the table is empty or two tiers share a
    /// level.
    pub fn new(mut tiers: Vec<CantripTier>) -> Result<Self, DomainError> {
        if tiers.is_empty() {
            return Err(DomainError::validation("Cantrip table cannot be empty"));
        }
        tiers.sort_by_key(|t| t.min_level);
        if tiers.windows(2).any(|w| w[0].min_level == w[1].min_level) {
            return Err(DomainError::validation(
                "Cantrip table has duplicate levels",
            ));
        }
        Ok(Self(tiers))
    }

    /// Cantrip limit at `caster_level`; 0 below the first tier.
    pub fn limit(&self, caster_level: u8) -> u32 {
        self.0
            .iter()
            .rev()
            .find(|t| t.min_level <= caster_level)
            .map(|t| t.count)
            .unwrap_or(0)
    }

    pub fn tiers(&self) -> &[CantripTier] {
        &self.0
    }
}

impl Default for CantripTable {
    /// Full-caster progression: 3 cantrips at 1st level, 4 at 4th, 5 at 10th.
    fn default() -> Self {
        Self(vec![
            CantripTier {
                min_level: 1,
                count: 3,
            },
            CantripTier {
                min_level: 4,
                count: 4,
            },
            CantripTier {
                min_level: 10,
                count: 5,
            },
        ])
    }
}

/// Parses `level:count` pairs separated by commas, e.g. `1:3,4:4,10:5`.
impl FromStr for CantripTable {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiers = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                let (level, count) = part.split_once(':').ok_or_else(|| {
                    DomainError::parse(format!("Expected level:count, got '{}'", part))
                })?;
                let min_level = level.trim().parse::<u8>().map_err(|e| {
                    DomainError::parse(format!("Bad cantrip tier level '{}': {}", level, e))
                })?;
                let count = count.trim().parse::<u32>().map_err(|e| {
                    DomainError::parse(format!("Bad cantrip tier count '{}': {}", count, e))
                })?;
                Ok(CantripTier { min_level, count })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Self::new(tiers)
    }
}

impl fmt::Display for CantripTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|t| format!("{}:{}", t.min_level, t.count))
            .collect();
        f.write_str(&parts.join(","))
    }
}

/// Result of checking a preparation against the limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PreparationAdvice {
    /// Preparing one more spell stays within the limit.
    WithinLimit { limit: u32, remaining: u32 },
    /// Preparing one more spell would exceed the limit.
    OverLimit { limit: u32, prepared: u32 },
}

impl PreparationAdvice {
    pub fn is_within_limit(&self) -> bool {
        matches!(self, PreparationAdvice::WithinLimit { .. })
    }
}

/// Soft caps on prepared spells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparationPolicy {
    cantrips: CantripTable,
}

impl PreparationPolicy {
    pub fn new(cantrips: CantripTable) -> Self {
        Self { cantrips }
    }

    pub fn cantrip_table(&self) -> &CantripTable {
        &self.cantrips
    }

    /// `max(1, modifier + caster level)` leveled spells.
    pub fn leveled_limit(&self, caster: &CasterProfile) -> u32 {
        let limit = caster
            .ability_modifier()
            .saturating_add(i32::from(caster.caster_level));
        u32::try_from(limit.max(1)).unwrap_or(1)
    }

    pub fn cantrip_limit(&self, caster: &CasterProfile) -> u32 {
        self.cantrips.limit(caster.caster_level)
    }

    /// Advise on preparing one more spell of the given kind.
    pub fn assess(
        &self,
        counts: &PreparedCounts,
        caster: &CasterProfile,
        is_cantrip: bool,
    ) -> PreparationAdvice {
        let (limit, prepared) = if is_cantrip {
            (self.cantrip_limit(caster), counts.cantrips)
        } else {
            (self.leveled_limit(caster), counts.leveled)
        };
        if prepared < limit {
            PreparationAdvice::WithinLimit {
                limit,
                remaining: limit - prepared,
            }
        } else {
            PreparationAdvice::OverLimit { limit, prepared }
        }
    }
}
