//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Database operation failed - includes entity and operation names for tracing.
    #[error("Database error in {entity_type}.{operation}: {message}")]
    Database {
        entity_type: &'static str,
        operation: &'static str,
        message: String,
    },

    /// A stored value could not be decoded into its domain type.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A store constraint (unique index, check, guarded update) rejected the write.
    #[error("Constraint violation on {entity_type}: {message}")]
    ConstraintViolation {
        entity_type: &'static str,
        message: String,
    },

    /// A foreign key no longer resolves, e.g. its parent was deleted mid-request.
    #[error("Dangling reference on {entity_type}: {message}")]
    DanglingReference {
        entity_type: &'static str,
        message: String,
    },
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with entity and operation context.
    pub fn database(
        entity_type: &'static str,
        operation: &'static str,
        message: impl ToString,
    ) -> Self {
        Self::Database {
            entity_type,
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a ConstraintViolation error.
    pub fn constraint(entity_type: &'static str, message: impl ToString) -> Self {
        Self::ConstraintViolation {
            entity_type,
            message: message.to_string(),
        }
    }

    /// Create a DanglingReference error.
    pub fn dangling_reference(entity_type: &'static str, message: impl ToString) -> Self {
        Self::DanglingReference {
            entity_type,
            message: message.to_string(),
        }
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
