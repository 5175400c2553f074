//! WeaponAssignment entity - one custody record per issue of a weapon
//!
//! A row is born Active and ends Returned or Lost. Closed rows never
//! reopen; reissuing a weapon creates a new row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{require_not_before, trimmed};
use crate::{DomainError, EntityKind, Lifecycle, Reference, SoldierId, UnitId, WeaponId};

named_enum! {
    pub enum AssignmentStatus ("assignment status") {
        Active => "Active",
        Returned => "Returned",
        Lost => "Lost",
    }
}

impl Lifecycle for AssignmentStatus {
    const KIND: EntityKind = EntityKind::WeaponAssignment;

    fn allows(self, next: Self) -> bool {
        use AssignmentStatus::*;
        matches!((self, next), (Active, Returned) | (Active, Lost))
    }

    fn is_terminal(self) -> bool {
        self != AssignmentStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponAssignment {
    pub weapon_id: WeaponId,
    pub soldier_id: SoldierId,
    pub unit_id: UnitId,
    pub assignment_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub status: AssignmentStatus,
    pub notes: String,
}

impl WeaponAssignment {
    /// Status every new assignment starts in. Not caller-settable.
    pub const INITIAL_STATUS: AssignmentStatus = AssignmentStatus::Active;

    pub fn open(
        weapon_id: WeaponId,
        soldier_id: SoldierId,
        unit_id: UnitId,
        assignment_date: NaiveDate,
    ) -> Self {
        Self {
            weapon_id,
            soldier_id,
            unit_id,
            assignment_date,
            return_date: None,
            status: Self::INITIAL_STATUS,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == AssignmentStatus::Active
    }

    /// Ends custody as `Returned` or `Lost` on `date`.
    ///
    /// Fails with an invalid transition unless the row is Active and the
    /// target is a closing status; fails validation if `date` precedes the
    /// assignment date.
    pub fn close(&mut self, to: AssignmentStatus, date: NaiveDate) -> Result<(), DomainError> {
        if !self.status.allows(to) {
            return Err(DomainError::invalid_state_transition(
                AssignmentStatus::KIND.as_str(),
                self.status,
                to,
            ));
        }
        require_not_before(date, self.assignment_date, "return_date", "assignment_date")?;
        self.status = to;
        self.return_date = Some(date);
        Ok(())
    }

    /// ReturnDate is set exactly when the row is no longer Active.
    pub fn is_consistent(&self) -> bool {
        self.return_date.is_some() == !self.is_active()
    }

    pub fn references(&self) -> Vec<Reference> {
        vec![
            Reference::required("weapon_id", EntityKind::Weapon, self.weapon_id),
            Reference::required("soldier_id", EntityKind::Soldier, self.soldier_id),
            Reference::required("unit_id", EntityKind::MilitaryUnit, self.unit_id),
        ]
    }
}

/// Create request for an assignment. The status is always Active.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewWeaponAssignment {
    pub weapon_id: Option<WeaponId>,
    pub soldier_id: Option<SoldierId>,
    pub unit_id: Option<UnitId>,
    pub assignment_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl NewWeaponAssignment {
    pub fn into_assignment(self) -> Result<WeaponAssignment, DomainError> {
        let missing = |field: &str| DomainError::validation(format!("{} is required", field));
        let assignment = WeaponAssignment::open(
            self.weapon_id.ok_or_else(|| missing("weapon_id"))?,
            self.soldier_id.ok_or_else(|| missing("soldier_id"))?,
            self.unit_id.ok_or_else(|| missing("unit_id"))?,
            self.assignment_date
                .ok_or_else(|| missing("assignment_date"))?,
        );
        Ok(assignment.with_notes(trimmed(self.notes.as_deref())))
    }
}

/// Partial update for an assignment.
///
/// Only `notes` is edited in place. A `status` of Returned or Lost is
/// routed to the custody workflow with `return_date` (or today).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WeaponAssignmentPatch {
    pub notes: Option<String>,
    pub status: Option<AssignmentStatus>,
    pub return_date: Option<NaiveDate>,
}
