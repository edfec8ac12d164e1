//! Two-layer field overlay.
//!
//! An [`Overlay`] is a sparse patch layer over a complete field set. Reading
//! a field checks the patch first, then an optional base record (for spells,
//! the linked catalog entry), then the field set's static defaults.
//!
//! "Not overridden" is a distinct state from "overridden with an empty or
//! false value": an override holding `""` still wins over the base.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

/// A complete, fixed set of named fields with typed values.
///
/// `Default` is the safe-default table used when neither the patch layer nor
/// a base record supplies a value.
pub trait FieldSet: Clone + Default + fmt::Debug + PartialEq {
    type Field: Copy + Ord + fmt::Debug + fmt::Display + 'static;
    type Value: Clone + PartialEq + fmt::Debug;

    /// Every field, in display order.
    fn fields() -> &'static [Self::Field];

    /// Whether `value` has the right kind for `field`.
    fn accepts(field: Self::Field, value: &Self::Value) -> bool;

    fn get(&self, field: Self::Field) -> Self::Value;

    /// Write one field.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the value kind does not match.
    fn set(&mut self, field: Self::Field, value: Self::Value) -> Result<(), DomainError>;
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    Override,
    Catalog,
    Default,
}

/// One requested change to an overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum FieldChange<V> {
    /// Set (or replace) the override.
    Set(V),
    /// Remove the override so the base value shows through again.
    Clear,
}

/// A field-level edit request. Fields not named are left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPatch<S: FieldSet> {
    changes: BTreeMap<S::Field, FieldChange<S::Value>>,
}

impl<S: FieldSet> Default for OverlayPatch<S> {
    fn default() -> Self {
        Self {
            changes: BTreeMap::new(),
        }
    }
}

impl<S: FieldSet> OverlayPatch<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A patch that sets every field of `fields`.
    pub fn set_all(fields: &S) -> Self {
        let changes = S::fields()
            .iter()
            .map(|&f| (f, FieldChange::Set(fields.get(f))))
            .collect();
        Self { changes }
    }

    pub fn set(mut self, field: S::Field, value: impl Into<S::Value>) -> Self {
        self.changes.insert(field, FieldChange::Set(value.into()));
        self
    }

    pub fn clear(mut self, field: S::Field) -> Self {
        self.changes.insert(field, FieldChange::Clear);
        self
    }

    pub fn change(mut self, field: S::Field, change: FieldChange<S::Value>) -> Self {
        self.changes.insert(field, change);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (S::Field, &FieldChange<S::Value>)> {
        self.changes.iter().map(|(f, c)| (*f, c))
    }

    /// Fail on the first `Set` whose value kind does not match its field.
    pub fn check_kinds(&self) -> Result<(), DomainError> {
        for (field, change) in &self.changes {
            if let FieldChange::Set(value) = change {
                if !S::accepts(*field, value) {
                    return Err(kind_mismatch(*field, value));
                }
            }
        }
        Ok(())
    }
}

/// Sparse per-field overrides over a base field set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(
    transparent,
    bound(serialize = "S::Field: Serialize, S::Value: Serialize")
)]
pub struct Overlay<S: FieldSet> {
    values: BTreeMap<S::Field, S::Value>,
}

impl<S: FieldSet> Default for Overlay<S> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<S: FieldSet> Overlay<S> {
    /// An overlay with nothing overridden.
    pub fn new() -> Self {
        Self::default()
    }

    /// An overlay overriding every field with the values in `fields`.
    pub fn from_fields(fields: &S) -> Self {
        let values = S::fields().iter().map(|&f| (f, fields.get(f))).collect();
        Self { values }
    }

    pub fn get(&self, field: S::Field) -> Option<&S::Value> {
        self.values.get(&field)
    }

    pub fn set(&mut self, field: S::Field, value: S::Value) -> Result<(), DomainError> {
        if !S::accepts(field, &value) {
            return Err(kind_mismatch(field, &value));
        }
        self.values.insert(field, value);
        Ok(())
    }

    /// Remove an override, returning the value it held.
    pub fn clear(&mut self, field: S::Field) -> Option<S::Value> {
        self.values.remove(&field)
    }

    pub fn clear_all(&mut self) {
        self.values.clear();
    }

    /// Apply a patch. Either every change is applied or none is.
    pub fn apply(&mut self, patch: &OverlayPatch<S>) -> Result<(), DomainError> {
        patch.check_kinds()?;
        for (field, change) in patch.iter() {
            match change {
                FieldChange::Set(value) => {
                    self.values.insert(field, value.clone());
                }
                FieldChange::Clear => {
                    self.values.remove(&field);
                }
            }
        }
        Ok(())
    }

    pub fn is_overridden(&self, field: S::Field) -> bool {
        self.values.contains_key(&field)
    }

    pub fn overridden_fields(&self) -> Vec<S::Field> {
        self.values.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Fields of the complete set that are not overridden.
    pub fn missing_fields(&self) -> Vec<S::Field> {
        S::fields()
            .iter()
            .copied()
            .filter(|f| !self.values.contains_key(f))
            .collect()
    }

    /// Resolve every field: override, then base, then default.
    ///
    /// Never fails; kinds are checked when overrides are written.
    pub fn resolve(&self, base: Option<&S>) -> S {
        let mut resolved = base.cloned().unwrap_or_default();
        for (field, value) in &self.values {
            let written = resolved.set(*field, value.clone());
            debug_assert!(written.is_ok(), "override for {field} has the wrong kind");
        }
        resolved
    }

    pub fn source_of(&self, field: S::Field, has_base: bool) -> FieldSource {
        if self.is_overridden(field) {
            FieldSource::Override
        } else if has_base {
            FieldSource::Catalog
        } else {
            FieldSource::Default
        }
    }
}

impl<'de, S> Deserialize<'de> for Overlay<S>
where
    S: FieldSet,
    S::Field: Deserialize<'de>,
    S::Value: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = BTreeMap::<S::Field, S::Value>::deserialize(deserializer)?;
        let mut overlay = Overlay::new();
        for (field, value) in values {
            overlay
                .set(field, value)
                .map_err(serde::de::Error::custom)?;
        }
        Ok(overlay)
    }
}

fn kind_mismatch<F: fmt::Display, V: fmt::Debug>(field: F, value: &V) -> DomainError {
    DomainError::validation(format!(
        "Value {:?} has the wrong kind for field '{}'",
        value, field
    ))
}
