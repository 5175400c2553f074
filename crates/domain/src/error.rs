//! Unified error types for the domain layer
//!
//! Entity constructors, patches and state machines all report through
//! [`DomainError`], so the engine can map one type onto its taxonomy.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (missing or malformed field)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for enum names, dates and money)
    #[error("Parse error: {0}")]
    Parse(String),

    /// State transition not allowed by the entity's lifecycle
    #[error("Invalid {kind} status transition from {from} to {to}")]
    InvalidStateTransition {
        kind: &'static str,
        from: String,
        to: String,
    },
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// Use this when a required field is empty, a value is out of range,
    /// or two fields disagree (e.g. an end date before its start date).
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// # Example
    /// ```ignore
    /// impl FromStr for WeaponStatus {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "Active" => Ok(Self::Active),
    ///             _ => Err(DomainError::parse(format!("Unknown weapon status: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid state transition error
    pub fn invalid_state_transition(
        kind: &'static str,
        from: impl ToString,
        to: impl ToString,
    ) -> Self {
        Self::InvalidStateTransition {
            kind,
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}
