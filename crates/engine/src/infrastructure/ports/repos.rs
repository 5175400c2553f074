//! Repository port traits - one per entity kind, plus the cross-entity ports.

use async_trait::async_trait;
use armory_domain::{
    Ammunition, AmmunitionId, AmmunitionStatus, AssignmentId, DependentCounts, EntityKind,
    FacilityId, FacilityStatus, MaintenanceId, Manufacturer, ManufacturerId, MilitaryUnit,
    Soldier, SoldierId, StorageFacility, UnitId, Weapon, WeaponAssignment, WeaponId,
    WeaponMaintenance, WeaponStatus,
};
use chrono::NaiveDate;

use super::error::RepoError;
use super::types::{
    AmmunitionListing, AmmunitionRecord, AssignmentListing, AssignmentRecord, DeleteOutcome,
    FacilityOccupancy, FacilityRecord, MaintenanceListing, MaintenanceRecord,
    ManufacturerRecord, ManufacturerSummary, SoldierRecord, StatusCount, UnitRecord,
    UnitSummary, WeaponListing, WeaponRecord,
};

// =============================================================================
// Organisation
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManufacturerRepo: Send + Sync {
    async fn get(&self, id: ManufacturerId) -> Result<Option<ManufacturerRecord>, RepoError>;
    async fn list(&self) -> Result<Vec<ManufacturerRecord>, RepoError>;
    async fn insert(&self, manufacturer: &Manufacturer) -> Result<ManufacturerId, RepoError>;
    /// Overwrites the row. Returns false when no row has `id`.
    async fn update(&self, id: ManufacturerId, manufacturer: &Manufacturer)
        -> Result<bool, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitRepo: Send + Sync {
    async fn get(&self, id: UnitId) -> Result<Option<UnitRecord>, RepoError>;
    async fn list(&self) -> Result<Vec<UnitRecord>, RepoError>;
    async fn insert(&self, unit: &MilitaryUnit) -> Result<UnitId, RepoError>;
    async fn update(&self, id: UnitId, unit: &MilitaryUnit) -> Result<bool, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FacilityRepo: Send + Sync {
    async fn get(&self, id: FacilityId) -> Result<Option<FacilityRecord>, RepoError>;
    async fn list(&self) -> Result<Vec<FacilityRecord>, RepoError>;
    async fn insert(&self, facility: &StorageFacility) -> Result<FacilityId, RepoError>;
    async fn update(&self, id: FacilityId, facility: &StorageFacility) -> Result<bool, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SoldierRepo: Send + Sync {
    async fn get(&self, id: SoldierId) -> Result<Option<SoldierRecord>, RepoError>;
    async fn list(&self) -> Result<Vec<SoldierRecord>, RepoError>;
    async fn find_by_serial(&self, serial_number: &str) -> Result<Option<SoldierRecord>, RepoError>;
    async fn insert(&self, soldier: &Soldier) -> Result<SoldierId, RepoError>;
    async fn update(&self, id: SoldierId, soldier: &Soldier) -> Result<bool, RepoError>;
}

// =============================================================================
// Equipment
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeaponRepo: Send + Sync {
    async fn get(&self, id: WeaponId) -> Result<Option<WeaponRecord>, RepoError>;
    async fn list(&self) -> Result<Vec<WeaponRecord>, RepoError>;
    async fn find_by_serial(&self, serial_number: &str) -> Result<Option<WeaponRecord>, RepoError>;
    async fn insert(&self, weapon: &Weapon) -> Result<WeaponId, RepoError>;
    /// Overwrites every column except `assigned_unit_id`, which only
    /// [`CustodyRepo`] writes.
    async fn update(&self, id: WeaponId, weapon: &Weapon) -> Result<bool, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaintenanceRepo: Send + Sync {
    async fn get(&self, id: MaintenanceId) -> Result<Option<MaintenanceRecord>, RepoError>;
    async fn list(&self) -> Result<Vec<MaintenanceRecord>, RepoError>;
    async fn insert(&self, record: &WeaponMaintenance) -> Result<MaintenanceId, RepoError>;
    async fn update(&self, id: MaintenanceId, record: &WeaponMaintenance)
        -> Result<bool, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AmmunitionRepo: Send + Sync {
    async fn get(&self, id: AmmunitionId) -> Result<Option<AmmunitionRecord>, RepoError>;
    async fn list(&self) -> Result<Vec<AmmunitionRecord>, RepoError>;
    async fn insert(&self, lot: &Ammunition) -> Result<AmmunitionId, RepoError>;
    async fn update(&self, id: AmmunitionId, lot: &Ammunition) -> Result<bool, RepoError>;
    /// Moves one lot from `from` to the terminal status `to`, leaving every
    /// other column alone. The write only lands if the stored row still has
    /// status `from` and still satisfies the guard of `to` as of `today`.
    async fn refresh_status(
        &self,
        id: AmmunitionId,
        from: AmmunitionStatus,
        to: AmmunitionStatus,
        today: NaiveDate,
    ) -> Result<bool, RepoError>;
}

// =============================================================================
// Custody (assignments and the weapon's assigned unit, always together)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssignmentRepo: Send + Sync {
    async fn get(&self, id: AssignmentId) -> Result<Option<AssignmentRecord>, RepoError>;
    async fn list(&self) -> Result<Vec<AssignmentRecord>, RepoError>;
    async fn find_active_for_weapon(
        &self,
        weapon_id: WeaponId,
    ) -> Result<Option<AssignmentRecord>, RepoError>;
    async fn update_notes(&self, id: AssignmentId, notes: &str) -> Result<bool, RepoError>;
}

/// Writes that touch an assignment and its weapon in one transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustodyRepo: Send + Sync {
    /// Inserts the Active row and points the weapon at its unit.
    ///
    /// A second Active row for the weapon fails with a constraint violation.
    async fn open(&self, assignment: &WeaponAssignment) -> Result<AssignmentId, RepoError>;

    /// Stores the closed row and clears the weapon's unit, optionally
    /// changing the weapon's status too.
    ///
    /// Fails with a constraint violation if the stored row is no longer Active.
    async fn close(
        &self,
        id: AssignmentId,
        closed: &WeaponAssignment,
        weapon_status: Option<WeaponStatus>,
    ) -> Result<(), RepoError>;

    /// Deletes the row; an Active row also clears the weapon's unit.
    async fn remove(&self, id: AssignmentId) -> Result<bool, RepoError>;
}

// =============================================================================
// References and deletion
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceRepo: Send + Sync {
    /// Point lookup by primary key on the kind's table.
    async fn exists(&self, kind: EntityKind, id: i64) -> Result<bool, RepoError>;

    /// Rows of every dependent kind pointing at `id`, zeros included.
    async fn count_dependents(&self, kind: EntityKind, id: i64)
        -> Result<DependentCounts, RepoError>;

    /// Counts dependents and deletes the row only when none exist, in one
    /// transaction.
    async fn delete_unreferenced(&self, kind: EntityKind, id: i64)
        -> Result<DeleteOutcome, RepoError>;

    /// Stored status of a facility, `None` if it does not exist.
    async fn facility_status(&self, id: FacilityId) -> Result<Option<FacilityStatus>, RepoError>;
}

// =============================================================================
// Reporting
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportRepo: Send + Sync {
    async fn manufacturer_summaries(&self) -> Result<Vec<ManufacturerSummary>, RepoError>;
    async fn unit_summaries(&self) -> Result<Vec<UnitSummary>, RepoError>;
    async fn facility_occupancy(&self) -> Result<Vec<FacilityOccupancy>, RepoError>;
    async fn weapon_listings(&self) -> Result<Vec<WeaponListing>, RepoError>;
    async fn ammunition_listings(&self) -> Result<Vec<AmmunitionListing>, RepoError>;
    async fn maintenance_listings(&self) -> Result<Vec<MaintenanceListing>, RepoError>;
    async fn assignment_listings(&self) -> Result<Vec<AssignmentListing>, RepoError>;
    /// Row counts grouped by status. Statuses with no rows are absent.
    async fn status_counts(&self, kind: EntityKind) -> Result<Vec<StatusCount>, RepoError>;
}
