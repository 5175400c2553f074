//! Entities tracked by the custody core.
//!
//! Entity structs hold field values only. The store assigns integer ids,
//! so a persisted row is a [`Record`] pairing the id with its value.

use serde::{Deserialize, Serialize};

mod ammunition;
mod manufacturer;
mod military_unit;
mod soldier;
mod storage_facility;
mod weapon;
mod weapon_assignment;
mod weapon_maintenance;

pub use ammunition::{Ammunition, AmmunitionPatch, AmmunitionStatus, NewAmmunition};
pub use manufacturer::{Manufacturer, ManufacturerPatch, ManufacturerStatus, NewManufacturer};
pub use military_unit::{MilitaryUnit, MilitaryUnitPatch, NewMilitaryUnit, UnitStatus};
pub use soldier::{NewSoldier, Soldier, SoldierPatch, SoldierStatus};
pub use storage_facility::{
    FacilityStatus, NewStorageFacility, SecurityLevel, StorageFacility, StorageFacilityPatch,
};
pub use weapon::{NewWeapon, Weapon, WeaponPatch, WeaponStatus};
pub use weapon_assignment::{
    AssignmentStatus, NewWeaponAssignment, WeaponAssignment, WeaponAssignmentPatch,
};
pub use weapon_maintenance::{
    MaintenanceStatus, MaintenanceType, NewWeaponMaintenance, WeaponMaintenance,
    WeaponMaintenancePatch,
};

/// A stored row: its id plus the entity value, flattened on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record<I, T> {
    pub id: I,
    #[serde(flatten)]
    pub value: T,
}

impl<I, T> Record<I, T> {
    pub fn new(id: I, value: T) -> Self {
        Self { id, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManufacturerId;

    #[test]
    fn record_flattens_value() {
        let rec = Record::new(ManufacturerId::new(1), Manufacturer::new("Glock", "Austria"));
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Glock");
        assert_eq!(json["country"], "Austria");
    }
}
