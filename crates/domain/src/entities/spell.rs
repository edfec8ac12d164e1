//! Spell enumerations shared by catalog spells and learned-spell overrides.
//!
//! Every enumerated spell attribute is drawn from a fixed list. Values are
//! stored and serialized by their snake-case key and displayed by label;
//! parsing accepts either form, case-insensitively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! spell_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $($variant:ident => ($key:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl $name {
            /// Every allowed value, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Storage key (snake case).
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            /// Human-readable label.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| {
                        v.as_str().eq_ignore_ascii_case(needle)
                            || v.label().eq_ignore_ascii_case(needle)
                    })
                    .ok_or_else(|| {
                        DomainError::parse(format!("Unknown {} '{}'", $what, s))
                    })
            }
        }
    };
}

spell_enum! {
    /// School of magic.
    SpellSchool, "spell school" {
        Abjuration => ("abjuration", "Abjuration"),
        Conjuration => ("conjuration", "Conjuration"),
        Divination => ("divination", "Divination"),
        Enchantment => ("enchantment", "Enchantment"),
        Evocation => ("evocation", "Evocation"),
        Illusion => ("illusion", "Illusion"),
        Necromancy => ("necromancy", "Necromancy"),
        Transmutation => ("transmutation", "Transmutation"),
    }
}

impl Default for SpellSchool {
    fn default() -> Self {
        SpellSchool::Abjuration
    }
}

impl Default for CastingTime {
    fn default() -> Self {
        CastingTime::Action
    }
}

impl Default for SpellDuration {
    fn default() -> Self {
        SpellDuration::Instantaneous
    }
}

impl Default for SpellRange {
    fn default() -> Self {
        SpellRange::SelfOnly
    }
}

impl Default for SourceBook {
    fn default() -> Self {
        SourceBook::Homebrew
    }
}

spell_enum! {
    /// How long it takes to cast a spell.
    CastingTime, "casting time" {
        Action => ("action", "1 action"),
        BonusAction => ("bonus_action", "1 bonus action"),
        Reaction => ("reaction", "1 reaction"),
        OneMinute => ("1_minute", "1 minute"),
        TenMinutes => ("10_minutes", "10 minutes"),
        OneHour => ("1_hour", "1 hour"),
        EightHours => ("8_hours", "8 hours"),
        TwelveHours => ("12_hours", "12 hours"),
        TwentyFourHours => ("24_hours", "24 hours"),
    }
}

spell_enum! {
    /// How long a spell's effects last. Concentration is tracked as a
    /// separate flag, not as part of the duration.
    SpellDuration, "duration" {
        Instantaneous => ("instantaneous", "Instantaneous"),
        OneRound => ("1_round", "1 round"),
        SixRounds => ("6_rounds", "6 rounds"),
        OneMinute => ("1_minute", "1 minute"),
        TenMinutes => ("10_minutes", "10 minutes"),
        OneHour => ("1_hour", "1 hour"),
        TwoHours => ("2_hours", "2 hours"),
        EightHours => ("8_hours", "8 hours"),
        TwentyFourHours => ("24_hours", "24 hours"),
        SevenDays => ("7_days", "7 days"),
        TenDays => ("10_days", "10 days"),
        ThirtyDays => ("30_days", "30 days"),
        UntilDispelled => ("until_dispelled", "Until dispelled"),
        Special => ("special", "Special"),
    }
}

spell_enum! {
    /// Range of a spell.
    SpellRange, "range" {
        SelfOnly => ("self", "Self"),
        Touch => ("touch", "Touch"),
        Feet5 => ("5_feet", "5 feet"),
        Feet10 => ("10_feet", "10 feet"),
        Feet30 => ("30_feet", "30 feet"),
        Feet60 => ("60_feet", "60 feet"),
        Feet90 => ("90_feet", "90 feet"),
        Feet100 => ("100_feet", "100 feet"),
        Feet120 => ("120_feet", "120 feet"),
        Feet150 => ("150_feet", "150 feet"),
        Feet300 => ("300_feet", "300 feet"),
        Feet500 => ("500_feet", "500 feet"),
        OneMile => ("1_mile", "1 mile"),
        FiveHundredMiles => ("500_miles", "500 miles"),
        Sight => ("sight", "Sight"),
        Unlimited => ("unlimited", "Unlimited"),
        Special => ("special", "Special"),
    }
}

spell_enum! {
    /// Source book a spell was published in.
    SourceBook, "source book" {
        PlayersHandbook => ("phb", "Player's Handbook"),
        Xanathars => ("xge", "Xanathar's Guide to Everything"),
        Tashas => ("tce", "Tasha's Cauldron of Everything"),
        SwordCoast => ("scag", "Sword Coast Adventurer's Guide"),
        Wildemount => ("egw", "Explorer's Guide to Wildemount"),
        Fizban => ("ftd", "Fizban's Treasury of Dragons"),
        Strixhaven => ("scc", "Strixhaven: A Curriculum of Chaos"),
        Homebrew => ("homebrew", "Homebrew"),
    }
}

/// Maximum spell level for D&D-like systems.
pub const MAX_SPELL_LEVEL: u8 = 9;

/// Spell level, `0..=9`; 0 is a cantrip.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct SpellLevel(u8);

impl SpellLevel {
    pub const CANTRIP: SpellLevel = SpellLevel(0);

    /// Create a validated spell level.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the level exceeds 9.
    pub fn new(level: u8) -> Result<Self, DomainError> {
        if level > MAX_SPELL_LEVEL {
            return Err(DomainError::validation(format!(
                "Spell level must be between 0 and {}, got {}",
                MAX_SPELL_LEVEL, level
            )));
        }
        Ok(Self(level))
    }

    /// Convert to numeric level (cantrip = 0).
    pub fn as_number(&self) -> u8 {
        self.0
    }

    /// Check if this is a cantrip.
    pub fn is_cantrip(&self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for SpellLevel {
    type Error = DomainError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<SpellLevel> for u8 {
    fn from(level: SpellLevel) -> u8 {
        level.0
    }
}

impl fmt::Display for SpellLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_cantrip() {
            f.write_str("Cantrip")
        } else {
            write!(f, "Level {}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spell_level_bounds() {
        assert!(SpellLevel::new(0).unwrap().is_cantrip());
        assert_eq!(SpellLevel::new(9).unwrap().as_number(), 9);
        assert!(matches!(
            SpellLevel::new(10),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn spell_level_rejects_out_of_range_json() {
        assert!(serde_json::from_str::<SpellLevel>("3").is_ok());
        assert!(serde_json::from_str::<SpellLevel>("12").is_err());
    }

    #[test]
    fn spell_level_display() {
        assert_eq!(SpellLevel::CANTRIP.to_string(), "Cantrip");
        assert_eq!(SpellLevel::new(3).unwrap().to_string(), "Level 3");
    }

    #[test]
    fn enums_parse_key_or_label() {
        assert_eq!("evocation".parse::<SpellSchool>().unwrap(), SpellSchool::Evocation);
        assert_eq!("Evocation".parse::<SpellSchool>().unwrap(), SpellSchool::Evocation);
        assert_eq!("1 bonus action".parse::<CastingTime>().unwrap(), CastingTime::BonusAction);
        assert_eq!("150_feet".parse::<SpellRange>().unwrap(), SpellRange::Feet150);
        assert_eq!(" PHB ".parse::<SourceBook>().unwrap(), SourceBook::PlayersHandbook);
    }

    #[test]
    fn unknown_enum_value_is_parse_error() {
        let err = "Chronurgy".parse::<SpellSchool>().unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
        assert!(err.to_string().contains("spell school"));
    }

    #[test]
    fn there_are_eight_schools() {
        assert_eq!(SpellSchool::ALL.len(), 8);
        assert_eq!(SpellSchool::default(), SpellSchool::Abjuration);
    }

    #[test]
    fn enums_serialize_as_keys() {
        let json = serde_json::to_string(&SpellDuration::UntilDispelled).unwrap();
        assert_eq!(json, "\"until_dispelled\"");
        let back: SpellDuration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SpellDuration::UntilDispelled);
    }
}
