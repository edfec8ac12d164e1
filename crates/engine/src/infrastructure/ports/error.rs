//! Errors returned by the spell store ports.

/// A failed store operation. Carries enough context to log without the
/// caller adding any.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// No row with this id.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The store itself failed (connection, I/O, SQL).
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// A stored value could not be mapped to or from its domain type.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The store rejected a write that breaks a key or reference.
    #[error("Constraint violation in {operation}: {message}")]
    ConstraintViolation {
        operation: &'static str,
        message: String,
    },
}

impl RepoError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    pub fn constraint(operation: &'static str, message: impl ToString) -> Self {
        Self::ConstraintViolation {
            operation,
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
