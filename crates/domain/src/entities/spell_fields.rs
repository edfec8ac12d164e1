//! The displayable attribute set of a spell.
//!
//! [`SpellFields`] is what a catalog spell stores and what a learned record
//! can override field by field.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::spell::{CastingTime, SourceBook, SpellDuration, SpellLevel, SpellRange, SpellSchool};
use crate::error::DomainError;
use crate::overlay::FieldSet;

/// Every displayable spell attribute.
///
/// Public fields: any combination of values is a valid field set. Required
/// text checks live in [`SpellFields::missing_required`] and are applied at
/// the points where completeness matters (publishing, personal spells).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellFields {
    /// Display name
    pub name: String,
    /// Alternate-language name; informal uniqueness key (case-insensitive)
    pub name_alt: String,
    pub level: SpellLevel,
    pub school: SpellSchool,
    pub casting_time: CastingTime,
    pub duration: SpellDuration,
    pub range: SpellRange,
    pub source: SourceBook,
    pub verbal: bool,
    pub somatic: bool,
    /// Material component text; empty means no material component
    pub material: String,
    pub concentration: bool,
    pub ritual: bool,
    /// Full description of the spell's effects
    pub description: String,
}

impl SpellFields {
    /// Required text fields that are empty after trimming.
    pub fn missing_required(&self) -> Vec<SpellField> {
        [
            (SpellField::Name, &self.name),
            (SpellField::NameAlt, &self.name_alt),
            (SpellField::Description, &self.description),
        ]
        .into_iter()
        .filter(|(_, text)| text.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Fail with `IncompleteFields` if any required text field is blank.
    pub fn ensure_complete(&self) -> Result<(), DomainError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::incomplete(missing.iter().map(|f| f.as_str())))
        }
    }

    /// Component shorthand, e.g. "V, S, M (a pinch of sulfur)".
    pub fn components_label(&self) -> String {
        let mut parts = Vec::new();
        if self.verbal {
            parts.push("V".to_string());
        }
        if self.somatic {
            parts.push("S".to_string());
        }
        if !self.material.trim().is_empty() {
            parts.push(format!("M ({})", self.material.trim()));
        }
        parts.join(", ")
    }
}

/// Name of one displayable spell attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellField {
    Name,
    NameAlt,
    Level,
    School,
    CastingTime,
    Duration,
    Range,
    Source,
    Verbal,
    Somatic,
    Material,
    Concentration,
    Ritual,
    Description,
}

impl SpellField {
    pub const ALL: &'static [SpellField] = &[
        SpellField::Name,
        SpellField::NameAlt,
        SpellField::Level,
        SpellField::School,
        SpellField::CastingTime,
        SpellField::Duration,
        SpellField::Range,
        SpellField::Source,
        SpellField::Verbal,
        SpellField::Somatic,
        SpellField::Material,
        SpellField::Concentration,
        SpellField::Ritual,
        SpellField::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpellField::Name => "name",
            SpellField::NameAlt => "name_alt",
            SpellField::Level => "level",
            SpellField::School => "school",
            SpellField::CastingTime => "casting_time",
            SpellField::Duration => "duration",
            SpellField::Range => "range",
            SpellField::Source => "source",
            SpellField::Verbal => "verbal",
            SpellField::Somatic => "somatic",
            SpellField::Material => "material",
            SpellField::Concentration => "concentration",
            SpellField::Ritual => "ritual",
            SpellField::Description => "description",
        }
    }
}

impl fmt::Display for SpellField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed value of one spell attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SpellValue {
    Text(String),
    Level(SpellLevel),
    School(SpellSchool),
    CastingTime(CastingTime),
    Duration(SpellDuration),
    Range(SpellRange),
    Source(SourceBook),
    Flag(bool),
}

impl From<String> for SpellValue {
    fn from(value: String) -> Self {
        SpellValue::Text(value)
    }
}

impl From<&str> for SpellValue {
    fn from(value: &str) -> Self {
        SpellValue::Text(value.to_string())
    }
}

impl From<SpellLevel> for SpellValue {
    fn from(value: SpellLevel) -> Self {
        SpellValue::Level(value)
    }
}

impl From<SpellSchool> for SpellValue {
    fn from(value: SpellSchool) -> Self {
        SpellValue::School(value)
    }
}

impl From<CastingTime> for SpellValue {
    fn from(value: CastingTime) -> Self {
        SpellValue::CastingTime(value)
    }
}

impl From<SpellDuration> for SpellValue {
    fn from(value: SpellDuration) -> Self {
        SpellValue::Duration(value)
    }
}

impl From<SpellRange> for SpellValue {
    fn from(value: SpellRange) -> Self {
        SpellValue::Range(value)
    }
}

impl From<SourceBook> for SpellValue {
    fn from(value: SourceBook) -> Self {
        SpellValue::Source(value)
    }
}

impl From<bool> for SpellValue {
    fn from(value: bool) -> Self {
        SpellValue::Flag(value)
    }
}

impl FieldSet for SpellFields {
    type Field = SpellField;
    type Value = SpellValue;

    fn fields() -> &'static [SpellField] {
        SpellField::ALL
    }

    fn accepts(field: SpellField, value: &SpellValue) -> bool {
        use SpellField as F;
        use SpellValue as V;
        matches!(
            (field, value),
            (F::Name | F::NameAlt | F::Material | F::Description, V::Text(_))
                | (F::Level, V::Level(_))
                | (F::School, V::School(_))
                | (F::CastingTime, V::CastingTime(_))
                | (F::Duration, V::Duration(_))
                | (F::Range, V::Range(_))
                | (F::Source, V::Source(_))
                | (F::Verbal | F::Somatic | F::Concentration | F::Ritual, V::Flag(_))
        )
    }

    fn get(&self, field: SpellField) -> SpellValue {
        match field {
            SpellField::Name => SpellValue::Text(self.name.clone()),
            SpellField::NameAlt => SpellValue::Text(self.name_alt.clone()),
            SpellField::Level => SpellValue::Level(self.level),
            SpellField::School => SpellValue::School(self.school),
            SpellField::CastingTime => SpellValue::CastingTime(self.casting_time),
            SpellField::Duration => SpellValue::Duration(self.duration),
            SpellField::Range => SpellValue::Range(self.range),
            SpellField::Source => SpellValue::Source(self.source),
            SpellField::Verbal => SpellValue::Flag(self.verbal),
            SpellField::Somatic => SpellValue::Flag(self.somatic),
            SpellField::Material => SpellValue::Text(self.material.clone()),
            SpellField::Concentration => SpellValue::Flag(self.concentration),
            SpellField::Ritual => SpellValue::Flag(self.ritual),
            SpellField::Description => SpellValue::Text(self.description.clone()),
        }
    }

    fn set(&mut self, field: SpellField, value: SpellValue) -> Result<(), DomainError> {
        match (field, value) {
            (SpellField::Name, SpellValue::Text(v)) => self.name = v,
            (SpellField::NameAlt, SpellValue::Text(v)) => self.name_alt = v,
            (SpellField::Level, SpellValue::Level(v)) => self.level = v,
            (SpellField::School, SpellValue::School(v)) => self.school = v,
            (SpellField::CastingTime, SpellValue::CastingTime(v)) => self.casting_time = v,
            (SpellField::Duration, SpellValue::Duration(v)) => self.duration = v,
            (SpellField::Range, SpellValue::Range(v)) => self.range = v,
            (SpellField::Source, SpellValue::Source(v)) => self.source = v,
            (SpellField::Verbal, SpellValue::Flag(v)) => self.verbal = v,
            (SpellField::Somatic, SpellValue::Flag(v)) => self.somatic = v,
            (SpellField::Material, SpellValue::Text(v)) => self.material = v,
            (SpellField::Concentration, SpellValue::Flag(v)) => self.concentration = v,
            (SpellField::Ritual, SpellValue::Flag(v)) => self.ritual = v,
            (SpellField::Description, SpellValue::Text(v)) => self.description = v,
            (field, value) => {
                return Err(DomainError::validation(format!(
                    "Value {:?} has the wrong kind for field '{}'",
                    value, field
                )))
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::fireball;
    use super::*;

    #[test]
    fn get_then_set_covers_every_field() {
        let source = fireball();
        let mut target = SpellFields::default();
        for &field in SpellField::ALL {
            target.set(field, source.get(field)).unwrap();
        }
        assert_eq!(target, source);
    }

    #[test]
    fn every_field_accepts_its_own_value() {
        let fields = fireball();
        for &field in SpellField::ALL {
            assert!(SpellFields::accepts(field, &fields.get(field)), "{field}");
        }
    }

    #[test]
    fn level_does_not_accept_text() {
        assert!(!SpellFields::accepts(SpellField::Level, &"3".into()));
        let mut fields = SpellFields::default();
        assert!(fields.set(SpellField::Ritual, "yes".into()).is_err());
    }

    #[test]
    fn defaults_are_safe() {
        let d = SpellFields::default();
        assert_eq!(d.name, "");
        assert_eq!(d.level, SpellLevel::CANTRIP);
        assert_eq!(d.school, SpellSchool::Abjuration);
        assert!(!d.verbal && !d.concentration && !d.ritual);
    }

    #[test]
    fn missing_required_checks_trimmed_text() {
        let mut fields = fireball();
        fields.name = "   ".into();
        fields.description = String::new();
        assert_eq!(
            fields.missing_required(),
            vec![SpellField::Name, SpellField::Description]
        );
        assert!(matches!(
            fields.ensure_complete(),
            Err(DomainError::IncompleteFields { .. })
        ));
    }

    #[test]
    fn empty_material_is_allowed() {
        let mut fields = fireball();
        fields.material = String::new();
        assert!(fields.ensure_complete().is_ok());
        assert_eq!(fields.components_label(), "V, S");
    }

    #[test]
    fn spell_value_json_shape() {
        let json = serde_json::to_value(SpellValue::Level(SpellLevel::new(3).unwrap())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "level", "value": 3}));
    }
}
