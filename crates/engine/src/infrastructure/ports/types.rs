//! Data shapes crossing the port boundary.

use armory_domain::{
    Ammunition, AmmunitionId, AssignmentId, DependentCounts, FacilityId, MaintenanceId,
    Manufacturer, ManufacturerId, MilitaryUnit, Record, Soldier, SoldierId, StorageFacility,
    UnitId, Weapon, WeaponAssignment, WeaponId, WeaponMaintenance,
};
use serde::Serialize;

pub type ManufacturerRecord = Record<ManufacturerId, Manufacturer>;
pub type UnitRecord = Record<UnitId, MilitaryUnit>;
pub type FacilityRecord = Record<FacilityId, StorageFacility>;
pub type WeaponRecord = Record<WeaponId, Weapon>;
pub type SoldierRecord = Record<SoldierId, Soldier>;
pub type AssignmentRecord = Record<AssignmentId, WeaponAssignment>;
pub type MaintenanceRecord = Record<MaintenanceId, WeaponMaintenance>;
pub type AmmunitionRecord = Record<AmmunitionId, Ammunition>;

/// Result of a guarded delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// No row had the id.
    Missing,
    /// Dependents exist; nothing was deleted.
    Blocked(DependentCounts),
}

// =============================================================================
// Report rows
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManufacturerSummary {
    #[serde(flatten)]
    pub manufacturer: ManufacturerRecord,
    pub weapon_count: u64,
    pub ammunition_count: u64,
}

/// A unit with its soldiers and, through them, their assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitSummary {
    #[serde(flatten)]
    pub unit: UnitRecord,
    pub soldier_count: u64,
    pub assignment_count: u64,
    pub active_assignment_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacilityOccupancy {
    #[serde(flatten)]
    pub facility: FacilityRecord,
    pub weapon_count: u64,
    pub ammunition_lot_count: u64,
    pub ammunition_quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeaponListing {
    #[serde(flatten)]
    pub weapon: WeaponRecord,
    pub manufacturer_name: String,
    pub facility_name: Option<String>,
    pub assigned_unit_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmmunitionListing {
    #[serde(flatten)]
    pub ammunition: AmmunitionRecord,
    pub manufacturer_name: String,
    pub facility_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintenanceListing {
    #[serde(flatten)]
    pub maintenance: MaintenanceRecord,
    pub weapon_name: String,
    pub weapon_serial_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentListing {
    #[serde(flatten)]
    pub assignment: AssignmentRecord,
    pub weapon_name: String,
    pub weapon_serial_number: String,
    pub soldier_name: String,
    pub unit_name: String,
}

/// Number of rows of one kind holding one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}
