//! Armory domain: custody entities, lifecycle state machines, invariants.
//!
//! Pure types and rules. Nothing here performs I/O; the engine crate
//! supplies the store and the clock.

extern crate self as armory_domain;

#[macro_use]
mod macros;

pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod kind;
pub mod lifecycle;
pub mod value_objects;

pub use entities::{
    Ammunition, AmmunitionPatch, AmmunitionStatus, AssignmentStatus, FacilityStatus,
    MaintenanceStatus, MaintenanceType, Manufacturer, ManufacturerPatch, ManufacturerStatus,
    MilitaryUnit, MilitaryUnitPatch, NewAmmunition, NewManufacturer, NewMilitaryUnit,
    NewSoldier, NewStorageFacility, NewWeapon, NewWeaponAssignment, NewWeaponMaintenance,
    Record, SecurityLevel, Soldier, SoldierPatch, SoldierStatus, StorageFacility,
    StorageFacilityPatch, UnitStatus, Weapon, WeaponAssignment, WeaponAssignmentPatch,
    WeaponMaintenance, WeaponMaintenancePatch, WeaponPatch, WeaponStatus,
};
pub use error::DomainError;
pub use ids::{
    AmmunitionId, AssignmentId, FacilityId, MaintenanceId, ManufacturerId, SoldierId, UnitId,
    WeaponId,
};
pub use kind::{Dependency, DependentCount, DependentCounts, EntityKind, Reference};
pub use lifecycle::Lifecycle;
pub use value_objects::Cost;
