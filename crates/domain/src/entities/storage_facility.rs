//! StorageFacility entity - armouries and depots holding stock
//!
//! A facility's lifecycle ends in `Decommissioned`. Entering it is gated
//! by the same dependency count as deletion; that check needs the store,
//! so the engine runs it before calling [`FacilityStatus::transition_to`].

use serde::{Deserialize, Serialize};

use crate::common::{required_text, trimmed};
use crate::{DomainError, EntityKind, Lifecycle};

named_enum! {
    pub enum SecurityLevel ("security level") {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Maximum => "Maximum",
    }
}

named_enum! {
    pub enum FacilityStatus ("facility status") {
        Operational => "Operational" | "Active",
        UnderMaintenance => "UnderMaintenance",
        Decommissioned => "Decommissioned",
    }
}

impl Lifecycle for FacilityStatus {
    const KIND: EntityKind = EntityKind::StorageFacility;

    fn allows(self, next: Self) -> bool {
        use FacilityStatus::*;
        matches!(
            (self, next),
            (Operational, UnderMaintenance)
                | (UnderMaintenance, Operational)
                | (Operational, Decommissioned)
                | (UnderMaintenance, Decommissioned)
        )
    }

    fn is_terminal(self) -> bool {
        self == FacilityStatus::Decommissioned
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageFacility {
    pub name: String,
    pub location: String,
    pub capacity: u32,
    pub security_level: SecurityLevel,
    pub status: FacilityStatus,
}

impl StorageFacility {
    pub const DEFAULT_CAPACITY: u32 = 0;
    pub const DEFAULT_SECURITY_LEVEL: SecurityLevel = SecurityLevel::Medium;
    pub const DEFAULT_STATUS: FacilityStatus = FacilityStatus::Operational;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: String::new(),
            capacity: Self::DEFAULT_CAPACITY,
            security_level: Self::DEFAULT_SECURITY_LEVEL,
            status: Self::DEFAULT_STATUS,
        }
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewStorageFacility {
    pub name: String,
    pub location: Option<String>,
    pub capacity: Option<u32>,
    pub security_level: Option<SecurityLevel>,
    pub status: Option<FacilityStatus>,
}

impl NewStorageFacility {
    pub fn into_facility(self) -> Result<StorageFacility, DomainError> {
        Ok(StorageFacility {
            name: required_text(&self.name, "name")?,
            location: trimmed(self.location.as_deref()),
            capacity: self.capacity.unwrap_or(StorageFacility::DEFAULT_CAPACITY),
            security_level: self
                .security_level
                .unwrap_or(StorageFacility::DEFAULT_SECURITY_LEVEL),
            status: self.status.unwrap_or(StorageFacility::DEFAULT_STATUS),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageFacilityPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<u32>,
    pub security_level: Option<SecurityLevel>,
    pub status: Option<FacilityStatus>,
}

impl StorageFacilityPatch {
    /// Whether applying this patch would decommission a live facility.
    pub fn decommissions(&self, current: &StorageFacility) -> bool {
        self.status == Some(FacilityStatus::Decommissioned)
            && current.status != FacilityStatus::Decommissioned
    }

    pub fn apply(self, target: &mut StorageFacility) -> Result<(), DomainError> {
        if let Some(name) = self.name {
            target.name = required_text(&name, "name")?;
        }
        if let Some(location) = self.location {
            target.location = location.trim().to_string();
        }
        if let Some(capacity) = self.capacity {
            target.capacity = capacity;
        }
        if let Some(level) = self.security_level {
            target.security_level = level;
        }
        if let Some(status) = self.status {
            target.status = target.status.transition_to(status)?;
        }
        Ok(())
    }
}
