//! MilitaryUnit entity - organisational owners of soldiers and custody

use serde::{Deserialize, Serialize};

use crate::common::{required_text, trimmed};
use crate::DomainError;

named_enum! {
    pub enum UnitStatus ("unit status") {
        Active => "Active",
        Inactive => "Inactive",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilitaryUnit {
    pub name: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    pub location: String,
    pub commanding_officer: String,
    pub status: UnitStatus,
}

impl MilitaryUnit {
    pub const DEFAULT_STATUS: UnitStatus = UnitStatus::Active;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit_type: String::new(),
            location: String::new(),
            commanding_officer: String::new(),
            status: Self::DEFAULT_STATUS,
        }
    }

    pub fn with_type(mut self, unit_type: impl Into<String>) -> Self {
        self.unit_type = unit_type.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewMilitaryUnit {
    pub name: String,
    #[serde(rename = "type")]
    pub unit_type: Option<String>,
    pub location: Option<String>,
    pub commanding_officer: Option<String>,
    pub status: Option<UnitStatus>,
}

impl NewMilitaryUnit {
    pub fn into_unit(self) -> Result<MilitaryUnit, DomainError> {
        Ok(MilitaryUnit {
            name: required_text(&self.name, "name")?,
            unit_type: trimmed(self.unit_type.as_deref()),
            location: trimmed(self.location.as_deref()),
            commanding_officer: trimmed(self.commanding_officer.as_deref()),
            status: self.status.unwrap_or(MilitaryUnit::DEFAULT_STATUS),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MilitaryUnitPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub unit_type: Option<String>,
    pub location: Option<String>,
    pub commanding_officer: Option<String>,
    pub status: Option<UnitStatus>,
}

impl MilitaryUnitPatch {
    pub fn apply(self, target: &mut MilitaryUnit) -> Result<(), DomainError> {
        if let Some(name) = self.name {
            target.name = required_text(&name, "name")?;
        }
        if let Some(unit_type) = self.unit_type {
            target.unit_type = unit_type.trim().to_string();
        }
        if let Some(location) = self.location {
            target.location = location.trim().to_string();
        }
        if let Some(officer) = self.commanding_officer {
            target.commanding_officer = officer.trim().to_string();
        }
        if let Some(status) = self.status {
            target.status = status;
        }
        Ok(())
    }
}
