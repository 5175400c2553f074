//! The core's error taxonomy.
//!
//! Every operation fails with one of seven kinds. The boundary layer maps
//! [`CoreError::kind`] to a response; nothing here knows about HTTP.

use armory_domain::{DependentCounts, DomainError, EntityKind};

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A field is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// A foreign key does not resolve.
    #[error("{field} references a {target} that does not exist: {value}")]
    Reference {
        field: &'static str,
        target: EntityKind,
        value: i64,
    },

    /// The store refused a foreign key, typically because its parent was
    /// deleted after validation.
    #[error("{entity} references a row that no longer exists: {message}")]
    UnresolvedReference {
        entity: &'static str,
        message: String,
    },

    /// A primary key does not resolve.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Uniqueness or single-active-assignment violation.
    #[error("{0}")]
    Conflict(String),

    /// Rows still depend on the target.
    #[error("{kind} {id} is still referenced: {dependents}")]
    Blocked {
        kind: EntityKind,
        id: i64,
        dependents: DependentCounts,
    },

    #[error("Invalid {kind} status transition from {from} to {to}")]
    InvalidTransition {
        kind: String,
        from: String,
        to: String,
    },

    /// The store failed. Never retried.
    #[error("Store error in {entity}.{operation}: {message}")]
    Store {
        entity: &'static str,
        operation: &'static str,
        message: String,
    },
}

impl CoreError {
    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            kind: kind.as_str(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Stable name of the error kind, as rendered at the boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::Reference { .. } | Self::UnresolvedReference { .. } => "RefError",
            Self::NotFound { .. } => "NotFound",
            Self::Conflict(_) => "Conflict",
            Self::Blocked { .. } => "Blocked",
            Self::InvalidTransition { .. } => "InvalidTransition",
            Self::Store { .. } => "StoreError",
        }
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::Parse(msg) => Self::Validation(msg),
            DomainError::InvalidStateTransition { kind, from, to } => Self::InvalidTransition {
                kind: kind.to_string(),
                from,
                to,
            },
        }
    }
}

impl From<RepoError> for CoreError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { entity_type, id } => Self::NotFound {
                kind: entity_type,
                id,
            },
            RepoError::ConstraintViolation {
                entity_type,
                message,
            } => Self::Conflict(format!("{} rejected by store: {}", entity_type, message)),
            RepoError::DanglingReference {
                entity_type,
                message,
            } => Self::UnresolvedReference {
                entity: entity_type,
                message,
            },
            RepoError::Database {
                entity_type,
                operation,
                message,
            } => Self::Store {
                entity: entity_type,
                operation,
                message,
            },
            RepoError::Serialization(message) => Self::Store {
                entity: "store",
                operation: "decode",
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_transition_maps_to_invalid_transition() {
        let err: CoreError =
            DomainError::invalid_state_transition("WeaponAssignment", "Returned", "Active").into();
        assert_eq!(err.kind(), "InvalidTransition");
        assert_eq!(
            err.to_string(),
            "Invalid WeaponAssignment status transition from Returned to Active"
        );
    }

    #[test]
    fn parse_errors_are_validation_errors() {
        let err: CoreError = DomainError::parse("Unknown weapon status: Broken").into();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn repo_errors_keep_their_context() {
        let err: CoreError = RepoError::database("Weapon", "insert", "disk full").into();
        assert_eq!(err.kind(), "StoreError");
        assert!(err.to_string().contains("Weapon.insert"));

        let err: CoreError = RepoError::constraint("WeaponAssignment", "UNIQUE failed").into();
        assert_eq!(err.kind(), "Conflict");

        let err: CoreError = RepoError::not_found("Weapon", 10).into();
        assert_eq!(err.kind(), "NotFound");

        let err: CoreError =
            RepoError::dangling_reference("Weapon", "FOREIGN KEY constraint failed").into();
        assert_eq!(err.kind(), "RefError");
    }
}
