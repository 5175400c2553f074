//! E2E test helpers for constructing the full application stack.

use std::sync::Arc;

use armory_domain::{
    FacilityId, ManufacturerId, NewAmmunition, NewManufacturer, NewMilitaryUnit, NewSoldier,
    NewStorageFacility, NewWeapon, NewWeaponAssignment, SoldierId, UnitId, WeaponId,
    WeaponStatus,
};
use chrono::NaiveDate;

use crate::app::App;
use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::sqlite::SqliteRepositories;

/// The date every test clock reports.
pub fn today() -> NaiveDate {
    date(2024, 6, 1)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Ids of the rows every context starts with.
#[derive(Debug, Clone, Copy)]
pub struct Seeded {
    pub manufacturer: ManufacturerId,
    pub unit: UnitId,
    pub facility: FacilityId,
    pub weapon: WeaponId,
    pub soldier: SoldierId,
    pub second_soldier: SoldierId,
}

/// A fully wired App plus the seeded rows.
pub struct E2ETestContext {
    pub app: Arc<App>,
    pub seeded: Seeded,
}

impl E2ETestContext {
    /// Glock manufacturer, one unit, one depot, a Glock 19 in the depot and
    /// two soldiers of the unit.
    pub async fn setup() -> Self {
        let repos = SqliteRepositories::in_memory()
            .await
            .expect("in-memory store should open");
        let app = Arc::new(App::new(repos, Arc::new(FixedClock(today()))));
        let crud = &app.use_cases.management;

        let manufacturer = crud
            .manufacturer
            .create(NewManufacturer {
                name: "Glock".into(),
                country: Some("Austria".into()),
                ..Default::default()
            })
            .await
            .expect("manufacturer")
            .id;
        let unit = crud
            .unit
            .create(NewMilitaryUnit {
                name: "1st Battalion".into(),
                ..Default::default()
            })
            .await
            .expect("unit")
            .id;
        let facility = crud
            .facility
            .create(NewStorageFacility {
                name: "North Depot".into(),
                capacity: Some(500),
                ..Default::default()
            })
            .await
            .expect("facility")
            .id;
        let weapon = crud
            .weapon
            .create(NewWeapon {
                name: "Glock 19".into(),
                serial_number: "G19-0001".into(),
                manufacturer_id: Some(manufacturer),
                status: Some(WeaponStatus::Active),
                facility_id: Some(facility),
                ..Default::default()
            })
            .await
            .expect("weapon")
            .id;
        let soldier = Self::soldier(&app, unit, "Anna", "S-100").await;
        let second_soldier = Self::soldier(&app, unit, "Jonas", "S-101").await;

        Self {
            app,
            seeded: Seeded {
                manufacturer,
                unit,
                facility,
                weapon,
                soldier,
                second_soldier,
            },
        }
    }

    async fn soldier(app: &App, unit: UnitId, first_name: &str, serial: &str) -> SoldierId {
        app.use_cases
            .management
            .soldier
            .create(NewSoldier {
                first_name: first_name.into(),
                last_name: "Berg".into(),
                serial_number: serial.into(),
                join_date: Some(date(2020, 3, 1)),
                unit_id: Some(unit),
                ..Default::default()
            })
            .await
            .expect("soldier")
            .id
    }

    /// A request issuing `weapon` to `soldier` of the seeded unit.
    pub fn issue(&self, weapon: WeaponId, soldier: SoldierId, on: NaiveDate) -> NewWeaponAssignment {
        NewWeaponAssignment {
            weapon_id: Some(weapon),
            soldier_id: Some(soldier),
            unit_id: Some(self.seeded.unit),
            assignment_date: Some(on),
            notes: None,
        }
    }

    /// An Available lot of 9mm stored in the seeded depot.
    pub fn lot(&self, quantity: u32, expires: NaiveDate) -> NewAmmunition {
        NewAmmunition {
            name: "9mm FMJ".into(),
            quantity: Some(quantity),
            manufacturer_id: Some(self.seeded.manufacturer),
            facility_id: Some(self.seeded.facility),
            production_date: Some(date(2020, 1, 1)),
            expiration_date: Some(expires),
            ..Default::default()
        }
    }
}
