//! Untrusted spell form input.
//!
//! A draft collects what a form submitted for a personal spell or a
//! catalog publication. Validation is all-or-nothing: every missing field is
//! reported together, and nothing is built unless all are present.

use serde::{Deserialize, Serialize};

use super::spell::SpellLevel;
use super::spell_fields::{SpellField, SpellFields};
use crate::error::DomainError;

/// Raw spell submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpellDraft {
    pub name: Option<String>,
    pub name_alt: Option<String>,
    pub level: Option<u8>,
    pub school: Option<String>,
    pub casting_time: Option<String>,
    pub duration: Option<String>,
    pub range: Option<String>,
    pub source: Option<String>,
    pub verbal: bool,
    pub somatic: bool,
    /// Empty means no material component.
    pub material: String,
    pub concentration: bool,
    pub ritual: bool,
    pub description: Option<String>,
}

impl SpellDraft {
    /// A draft pre-filled from an existing field set, e.g. to publish a
    /// personal spell exactly as it currently resolves.
    pub fn from_fields(fields: &SpellFields) -> Self {
        Self {
            name: Some(fields.name.clone()),
            name_alt: Some(fields.name_alt.clone()),
            level: Some(fields.level.as_number()),
            school: Some(fields.school.as_str().to_string()),
            casting_time: Some(fields.casting_time.as_str().to_string()),
            duration: Some(fields.duration.as_str().to_string()),
            range: Some(fields.range.as_str().to_string()),
            source: Some(fields.source.as_str().to_string()),
            verbal: fields.verbal,
            somatic: fields.somatic,
            material: fields.material.clone(),
            concentration: fields.concentration,
            ritual: fields.ritual,
            description: Some(fields.description.clone()),
        }
    }

    /// Validate into a complete field set.
    ///
    /// # Errors
    ///
    /// - `DomainError::IncompleteFields` listing every absent or blank field
    /// - `DomainError::Parse` for an enumeration label outside its list
    /// - `DomainError::Validation` for a level above 9
    pub fn validate(&self) -> Result<SpellFields, DomainError> {
        let name = present(&self.name);
        let name_alt = present(&self.name_alt);
        let school = present(&self.school);
        let casting_time = present(&self.casting_time);
        let duration = present(&self.duration);
        let range = present(&self.range);
        let source = present(&self.source);
        let description = present(&self.description);

        let missing: Vec<&'static str> = [
            (SpellField::Name, name.is_some()),
            (SpellField::NameAlt, name_alt.is_some()),
            (SpellField::Level, self.level.is_some()),
            (SpellField::School, school.is_some()),
            (SpellField::CastingTime, casting_time.is_some()),
            (SpellField::Duration, duration.is_some()),
            (SpellField::Range, range.is_some()),
            (SpellField::Source, source.is_some()),
            (SpellField::Description, description.is_some()),
        ]
        .into_iter()
        .filter(|(_, ok)| !ok)
        .map(|(field, _)| field.as_str())
        .collect();

        let (
            Some(name),
            Some(name_alt),
            Some(level),
            Some(school),
            Some(casting_time),
            Some(duration),
            Some(range),
            Some(source),
            Some(description),
        ) = (
            name,
            name_alt,
            self.level,
            school,
            casting_time,
            duration,
            range,
            source,
            description,
        )
        else {
            return Err(DomainError::incomplete(missing));
        };

        Ok(SpellFields {
            name: name.to_string(),
            name_alt: name_alt.to_string(),
            level: SpellLevel::new(level)?,
            school: school.parse()?,
            casting_time: casting_time.parse()?,
            duration: duration.parse()?,
            range: range.parse()?,
            source: source.parse()?,
            verbal: self.verbal,
            somatic: self.somatic,
            material: self.material.trim().to_string(),
            concentration: self.concentration,
            ritual: self.ritual,
            description: description.to_string(),
        })
    }
}

/// Trimmed text, or `None` when absent or blank.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
