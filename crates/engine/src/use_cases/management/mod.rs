//! Management use cases for CRUD-style operations.
//!
//! These keep HTTP handlers thin: each kind gets list, get, create, update
//! and delete, with validation, reference checks and the deletion guard
//! applied here.

mod ammunition;
mod assignment;
mod facility;
mod maintenance;
mod manufacturer;
mod soldier;
mod unit;
mod weapon;

pub use ammunition::AmmunitionCrud;
pub use assignment::AssignmentCrud;
pub use facility::FacilityCrud;
pub use maintenance::MaintenanceCrud;
pub use manufacturer::ManufacturerCrud;
pub use soldier::SoldierCrud;
pub use unit::UnitCrud;
pub use weapon::WeaponCrud;

/// Container for management use cases.
pub struct ManagementUseCases {
    pub manufacturer: ManufacturerCrud,
    pub unit: UnitCrud,
    pub facility: FacilityCrud,
    pub weapon: WeaponCrud,
    pub soldier: SoldierCrud,
    pub assignment: AssignmentCrud,
    pub maintenance: MaintenanceCrud,
    pub ammunition: AmmunitionCrud,
}

impl ManagementUseCases {
    pub fn new(
        manufacturer: ManufacturerCrud,
        unit: UnitCrud,
        facility: FacilityCrud,
        weapon: WeaponCrud,
        soldier: SoldierCrud,
        assignment: AssignmentCrud,
        maintenance: MaintenanceCrud,
        ammunition: AmmunitionCrud,
    ) -> Self {
        Self {
            manufacturer,
            unit,
            facility,
            weapon,
            soldier,
            assignment,
            maintenance,
            ammunition,
        }
    }
}
