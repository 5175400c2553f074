//! Soldier entity - personnel who take custody of weapons

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{double_option, require_not_before, required_text, trimmed};
use crate::{DomainError, EntityKind, Reference, UnitId};

named_enum! {
    pub enum SoldierStatus ("soldier status") {
        Active => "Active",
        Inactive => "Inactive",
        OnLeave => "OnLeave",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Soldier {
    pub first_name: String,
    pub last_name: String,
    pub rank: String,
    pub serial_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub join_date: NaiveDate,
    pub unit_id: UnitId,
    pub status: SoldierStatus,
    pub specialization: String,
}

impl Soldier {
    pub const DEFAULT_STATUS: SoldierStatus = SoldierStatus::Active;

    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        serial_number: impl Into<String>,
        join_date: NaiveDate,
        unit_id: UnitId,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            rank: String::new(),
            serial_number: serial_number.into(),
            date_of_birth: None,
            join_date,
            unit_id,
            status: Self::DEFAULT_STATUS,
            specialization: String::new(),
        }
    }

    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = rank.into();
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn references(&self) -> Vec<Reference> {
        vec![Reference::required("unit_id", EntityKind::MilitaryUnit, self.unit_id)]
    }

    fn check_dates(&self) -> Result<(), DomainError> {
        if let Some(born) = self.date_of_birth {
            require_not_before(self.join_date, born, "join_date", "date_of_birth")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewSoldier {
    pub first_name: String,
    pub last_name: String,
    pub rank: Option<String>,
    pub serial_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub join_date: Option<NaiveDate>,
    pub unit_id: Option<UnitId>,
    pub status: Option<SoldierStatus>,
    pub specialization: Option<String>,
}

impl NewSoldier {
    pub fn into_soldier(self) -> Result<Soldier, DomainError> {
        let join_date = self
            .join_date
            .ok_or_else(|| DomainError::validation("join_date is required"))?;
        let unit_id = self
            .unit_id
            .ok_or_else(|| DomainError::validation("unit_id is required"))?;
        let soldier = Soldier {
            first_name: required_text(&self.first_name, "first_name")?,
            last_name: required_text(&self.last_name, "last_name")?,
            rank: trimmed(self.rank.as_deref()),
            serial_number: required_text(&self.serial_number, "serial_number")?,
            date_of_birth: self.date_of_birth,
            join_date,
            unit_id,
            status: self.status.unwrap_or(Soldier::DEFAULT_STATUS),
            specialization: trimmed(self.specialization.as_deref()),
        };
        soldier.check_dates()?;
        Ok(soldier)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SoldierPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub rank: Option<String>,
    pub serial_number: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub join_date: Option<NaiveDate>,
    pub unit_id: Option<UnitId>,
    pub status: Option<SoldierStatus>,
    pub specialization: Option<String>,
}

impl SoldierPatch {
    pub fn apply(self, target: &mut Soldier) -> Result<(), DomainError> {
        if let Some(first_name) = self.first_name {
            target.first_name = required_text(&first_name, "first_name")?;
        }
        if let Some(last_name) = self.last_name {
            target.last_name = required_text(&last_name, "last_name")?;
        }
        if let Some(rank) = self.rank {
            target.rank = rank.trim().to_string();
        }
        if let Some(serial) = self.serial_number {
            target.serial_number = required_text(&serial, "serial_number")?;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            target.date_of_birth = date_of_birth;
        }
        if let Some(join_date) = self.join_date {
            target.join_date = join_date;
        }
        if let Some(unit_id) = self.unit_id {
            target.unit_id = unit_id;
        }
        if let Some(status) = self.status {
            target.status = status;
        }
        if let Some(specialization) = self.specialization {
            target.specialization = specialization.trim().to_string();
        }
        target.check_dates()
    }
}
