//! WeaponMaintenance entity - service records against a weapon
//!
//! `end_date` is present exactly when the record is Completed or Cancelled.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{require_not_before, trimmed};
use crate::{Cost, DomainError, EntityKind, Lifecycle, Reference, WeaponId};

named_enum! {
    pub enum MaintenanceType ("maintenance type") {
        Regular => "Regular",
        Repair => "Repair",
        Upgrade => "Upgrade",
        Inspection => "Inspection",
    }
}

named_enum! {
    pub enum MaintenanceStatus ("maintenance status") {
        Scheduled => "Scheduled",
        InProgress => "InProgress",
        Completed => "Completed",
        Cancelled => "Cancelled",
    }
}

impl Lifecycle for MaintenanceStatus {
    const KIND: EntityKind = EntityKind::WeaponMaintenance;

    fn allows(self, next: Self) -> bool {
        use MaintenanceStatus::*;
        matches!(
            (self, next),
            (Scheduled, InProgress)
                | (InProgress, Completed)
                | (Scheduled, Cancelled)
                | (InProgress, Cancelled)
        )
    }

    fn is_terminal(self) -> bool {
        matches!(self, MaintenanceStatus::Completed | MaintenanceStatus::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponMaintenance {
    pub weapon_id: WeaponId,
    #[serde(rename = "type")]
    pub maintenance_type: MaintenanceType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub technician: String,
    pub status: MaintenanceStatus,
    pub cost: Cost,
    pub notes: String,
}

impl WeaponMaintenance {
    pub const DEFAULT_TYPE: MaintenanceType = MaintenanceType::Regular;
    pub const DEFAULT_STATUS: MaintenanceStatus = MaintenanceStatus::Scheduled;
    pub const DEFAULT_COST: Cost = Cost::ZERO;

    pub fn schedule(weapon_id: WeaponId, start_date: NaiveDate) -> Self {
        Self {
            weapon_id,
            maintenance_type: Self::DEFAULT_TYPE,
            start_date,
            end_date: None,
            technician: String::new(),
            status: Self::DEFAULT_STATUS,
            cost: Self::DEFAULT_COST,
            notes: String::new(),
        }
    }

    pub fn with_type(mut self, maintenance_type: MaintenanceType) -> Self {
        self.maintenance_type = maintenance_type;
        self
    }

    /// Moves the record along its lifecycle.
    ///
    /// Entering Completed or Cancelled stamps `end_date` with `date`.
    pub fn advance(&mut self, to: MaintenanceStatus, date: NaiveDate) -> Result<(), DomainError> {
        if to == self.status {
            return Ok(());
        }
        let next = self.status.transition_to(to)?;
        if next.is_terminal() {
            require_not_before(date, self.start_date, "end_date", "start_date")?;
            self.end_date = Some(date);
        }
        self.status = next;
        Ok(())
    }

    pub fn references(&self) -> Vec<Reference> {
        vec![Reference::required("weapon_id", EntityKind::Weapon, self.weapon_id)]
    }

    fn check_end_date(&self) -> Result<(), DomainError> {
        match (self.status.is_terminal(), self.end_date) {
            (true, Some(end)) => require_not_before(end, self.start_date, "end_date", "start_date"),
            (true, None) => Err(DomainError::validation(format!(
                "end_date is required when status is {}",
                self.status
            ))),
            (false, Some(_)) => Err(DomainError::validation(format!(
                "end_date must be empty while status is {}",
                self.status
            ))),
            (false, None) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewWeaponMaintenance {
    pub weapon_id: Option<WeaponId>,
    #[serde(rename = "type")]
    pub maintenance_type: Option<MaintenanceType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub technician: Option<String>,
    pub status: Option<MaintenanceStatus>,
    pub cost: Option<Cost>,
    pub notes: Option<String>,
}

impl NewWeaponMaintenance {
    pub fn into_maintenance(self) -> Result<WeaponMaintenance, DomainError> {
        let weapon_id = self
            .weapon_id
            .ok_or_else(|| DomainError::validation("weapon_id is required"))?;
        let start_date = self
            .start_date
            .ok_or_else(|| DomainError::validation("start_date is required"))?;
        let record = WeaponMaintenance {
            weapon_id,
            maintenance_type: self
                .maintenance_type
                .unwrap_or(WeaponMaintenance::DEFAULT_TYPE),
            start_date,
            end_date: self.end_date,
            technician: trimmed(self.technician.as_deref()),
            status: self.status.unwrap_or(WeaponMaintenance::DEFAULT_STATUS),
            cost: self.cost.unwrap_or(WeaponMaintenance::DEFAULT_COST),
            notes: trimmed(self.notes.as_deref()),
        };
        record.check_end_date()?;
        Ok(record)
    }
}

/// Partial update for a maintenance record.
///
/// A `status` change goes through [`WeaponMaintenance::advance`];
/// `end_date` is the closing date used when it reaches a terminal status.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WeaponMaintenancePatch {
    pub weapon_id: Option<WeaponId>,
    #[serde(rename = "type")]
    pub maintenance_type: Option<MaintenanceType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub technician: Option<String>,
    pub status: Option<MaintenanceStatus>,
    pub cost: Option<Cost>,
    pub notes: Option<String>,
}

impl WeaponMaintenancePatch {
    pub fn apply(self, target: &mut WeaponMaintenance, today: NaiveDate) -> Result<(), DomainError> {
        if let Some(weapon_id) = self.weapon_id {
            target.weapon_id = weapon_id;
        }
        if let Some(maintenance_type) = self.maintenance_type {
            target.maintenance_type = maintenance_type;
        }
        if let Some(start_date) = self.start_date {
            target.start_date = start_date;
        }
        if let Some(technician) = self.technician {
            target.technician = technician.trim().to_string();
        }
        if let Some(cost) = self.cost {
            target.cost = cost;
        }
        if let Some(notes) = self.notes {
            target.notes = notes.trim().to_string();
        }
        match self.status {
            Some(status) if status != target.status => {
                target.advance(status, self.end_date.unwrap_or(today))?;
            }
            _ => {
                if let Some(end_date) = self.end_date {
                    target.end_date = Some(end_date);
                }
            }
        }
        target.check_end_date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scheduled() -> WeaponMaintenance {
        WeaponMaintenance::schedule(WeaponId::new(10), date(2024, 4, 1))
    }

    #[test]
    fn lifecycle_edges() {
        use MaintenanceStatus::*;
        assert!(Scheduled.transition_to(InProgress).is_ok());
        assert!(InProgress.transition_to(Completed).is_ok());
        assert!(Scheduled.transition_to(Cancelled).is_ok());
        assert!(InProgress.transition_to(Cancelled).is_ok());
        assert!(Scheduled.transition_to(Completed).is_err());
        assert!(Completed.transition_to(InProgress).is_err());
        assert!(Cancelled.transition_to(Scheduled).is_err());
        assert!(InProgress.transition_to(Scheduled).is_err());
    }

    #[test]
    fn completing_stamps_end_date() {
        let mut m = scheduled();
        m.advance(MaintenanceStatus::InProgress, date(2024, 4, 2)).unwrap();
        assert_eq!(m.end_date, None);
        m.advance(MaintenanceStatus::Completed, date(2024, 4, 5)).unwrap();
        assert_eq!(m.end_date, Some(date(2024, 4, 5)));
        assert!(m.check_end_date().is_ok());
    }

    #[test]
    fn skipping_in_progress_is_invalid() {
        let mut m = scheduled();
        let err = m.advance(MaintenanceStatus::Completed, date(2024, 4, 5)).unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_state_transition("WeaponMaintenance", "Scheduled", "Completed")
        );
        assert_eq!(m.status, MaintenanceStatus::Scheduled);
    }

    #[test]
    fn create_enforces_end_date_rule() {
        let completed_without_end = NewWeaponMaintenance {
            weapon_id: Some(WeaponId::new(10)),
            start_date: Some(date(2024, 4, 1)),
            status: Some(MaintenanceStatus::Completed),
            ..Default::default()
        };
        assert!(completed_without_end.into_maintenance().is_err());

        let scheduled_with_end = NewWeaponMaintenance {
            weapon_id: Some(WeaponId::new(10)),
            start_date: Some(date(2024, 4, 1)),
            end_date: Some(date(2024, 4, 2)),
            ..Default::default()
        };
        assert!(scheduled_with_end.into_maintenance().is_err());
    }

    #[test]
    fn create_applies_named_defaults() {
        let m = NewWeaponMaintenance {
            weapon_id: Some(WeaponId::new(10)),
            start_date: Some(date(2024, 4, 1)),
            ..Default::default()
        }
        .into_maintenance()
        .unwrap();
        assert_eq!(m.maintenance_type, WeaponMaintenance::DEFAULT_TYPE);
        assert_eq!(m.status, MaintenanceStatus::Scheduled);
        assert_eq!(m.cost, Cost::ZERO);
    }

    #[test]
    fn patch_cancel_uses_today_without_end_date() {
        let mut m = scheduled();
        WeaponMaintenancePatch {
            status: Some(MaintenanceStatus::Cancelled),
            ..Default::default()
        }
        .apply(&mut m, date(2024, 4, 9))
        .unwrap();
        assert_eq!(m.status, MaintenanceStatus::Cancelled);
        assert_eq!(m.end_date, Some(date(2024, 4, 9)));
    }

    #[test]
    fn cost_serializes_with_two_digits() {
        let mut m = scheduled();
        m.cost = "125.5".parse().unwrap();
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["cost"], "125.50");
        assert_eq!(json["type"], "Regular");
    }
}
