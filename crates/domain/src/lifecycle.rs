//! Status state machines.
//!
//! Statuses only move when a caller asks. Nothing here looks at a clock
//! except where the caller hands in the reference date.

use std::fmt;

use crate::{DomainError, EntityKind};

/// A status enumeration with a fixed transition graph.
pub trait Lifecycle: Copy + Eq + fmt::Display {
    const KIND: EntityKind;

    /// Whether the graph has an edge `self -> next`.
    fn allows(self, next: Self) -> bool;

    /// Whether no edge leaves this status.
    fn is_terminal(self) -> bool;

    /// Moves to `next`, or fails with an invalid transition.
    ///
    /// Requesting the current status is a no-op.
    fn transition_to(self, next: Self) -> Result<Self, DomainError> {
        if self == next || self.allows(next) {
            Ok(next)
        } else {
            Err(DomainError::invalid_state_transition(
                Self::KIND.as_str(),
                self,
                next,
            ))
        }
    }
}
