//! Spellbook operation errors.

use grimoire_domain::DomainError;

use crate::infrastructure::ports::RepoError;

/// Errors surfaced by spellbook and catalog operations.
///
/// Validation failures are raised before any write; store failures pass
/// through unchanged and are never retried here.
#[derive(Debug, thiserror::Error)]
pub enum SpellbookError {
    #[error("Spell already learned: {name}")]
    DuplicateLearn { name: String },
    #[error("Missing required fields: {}", .missing.join(", "))]
    IncompleteFields { missing: Vec<String> },
    #[error("A catalog spell named '{name_alt}' already exists")]
    DuplicateCatalogEntry { name_alt: String },
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("Spell is already in the catalog")]
    AlreadyInCatalog,
    #[error("Validation error: {0}")]
    Validation(DomainError),
    #[error("Spell store unavailable: {0}")]
    StoreUnavailable(RepoError),
}

impl SpellbookError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl SpellbookError {
    /// Map a failed catalog write. A key violation there means another
    /// writer took the alternate name after the duplicate check ran.
    pub fn from_catalog_write(err: RepoError, name_alt: &str) -> Self {
        match err {
            RepoError::ConstraintViolation { .. } => Self::DuplicateCatalogEntry {
                name_alt: name_alt.to_string(),
            },
            other => other.into(),
        }
    }
}

impl From<RepoError> for SpellbookError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { entity_type, id } => Self::NotFound {
                entity: entity_type,
                id,
            },
            other => Self::StoreUnavailable(other),
        }
    }
}

impl From<DomainError> for SpellbookError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::IncompleteFields { missing } => Self::IncompleteFields { missing },
            other => Self::Validation(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_not_found_keeps_its_context() {
        let err: SpellbookError = RepoError::not_found("LearnedSpell", "abc").into();
        assert!(matches!(
            err,
            SpellbookError::NotFound { entity: "LearnedSpell", ref id } if id == "abc"
        ));
    }

    #[test]
    fn other_repo_errors_mean_store_unavailable() {
        let err: SpellbookError = RepoError::database("insert", "disk I/O error").into();
        assert!(matches!(err, SpellbookError::StoreUnavailable(_)));
        assert!(err.to_string().contains("disk I/O error"));
    }

    #[test]
    fn incomplete_fields_pass_through() {
        let err: SpellbookError = DomainError::incomplete(["name", "school"]).into();
        assert_eq!(err.to_string(), "Missing required fields: name, school");
    }

    #[test]
    fn state_transition_errors_are_validation_errors() {
        let err: SpellbookError =
            DomainError::InvalidStateTransition("cannot unprepare a forgotten spell".into()).into();
        assert!(matches!(
            err,
            SpellbookError::Validation(DomainError::InvalidStateTransition(_))
        ));
    }

    #[test]
    fn catalog_key_violation_is_a_duplicate_entry() {
        let err = SpellbookError::from_catalog_write(
            RepoError::constraint("insert_catalog_spell", "UNIQUE constraint failed"),
            "Éclair de foudre",
        );
        assert!(matches!(
            err,
            SpellbookError::DuplicateCatalogEntry { ref name_alt } if name_alt == "Éclair de foudre"
        ));

        let err = SpellbookError::from_catalog_write(
            RepoError::database("insert_catalog_spell", "disk full"),
            "Éclair de foudre",
        );
        assert!(matches!(err, SpellbookError::StoreUnavailable(_)));
    }
}
