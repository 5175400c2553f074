//! Weapon entity - serial-numbered equipment under custody
//!
//! `assigned_unit_id` mirrors the unit of the weapon's Active assignment.
//! Only the custody workflow writes it; create and patch payloads have no
//! field for it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{double_option, required_text, trimmed};
use crate::{
    DomainError, EntityKind, FacilityId, Lifecycle, ManufacturerId, Reference, UnitId,
};

named_enum! {
    pub enum WeaponStatus ("weapon status") {
        Active => "Active",
        Inactive => "Inactive",
        UnderMaintenance => "UnderMaintenance",
    }
}

impl Lifecycle for WeaponStatus {
    const KIND: EntityKind = EntityKind::Weapon;

    /// Every status can be left for every other one.
    fn allows(self, next: Self) -> bool {
        self != next
    }

    fn is_terminal(self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    #[serde(rename = "type")]
    pub weapon_type: String,
    pub model: String,
    pub serial_number: String,
    pub manufacturer_id: ManufacturerId,
    pub caliber: String,
    pub acquisition_date: Option<NaiveDate>,
    pub status: WeaponStatus,
    pub assigned_unit_id: Option<UnitId>,
    pub facility_id: Option<FacilityId>,
    pub last_inspection_date: Option<NaiveDate>,
}

impl Weapon {
    pub const DEFAULT_STATUS: WeaponStatus = WeaponStatus::Active;

    pub fn new(
        name: impl Into<String>,
        serial_number: impl Into<String>,
        manufacturer_id: ManufacturerId,
    ) -> Self {
        Self {
            name: name.into(),
            weapon_type: String::new(),
            model: String::new(),
            serial_number: serial_number.into(),
            manufacturer_id,
            caliber: String::new(),
            acquisition_date: None,
            status: Self::DEFAULT_STATUS,
            assigned_unit_id: None,
            facility_id: None,
            last_inspection_date: None,
        }
    }

    pub fn with_facility(mut self, facility_id: FacilityId) -> Self {
        self.facility_id = Some(facility_id);
        self
    }

    pub fn with_caliber(mut self, caliber: impl Into<String>) -> Self {
        self.caliber = caliber.into();
        self
    }

    pub fn with_status(mut self, status: WeaponStatus) -> Self {
        self.status = status;
        self
    }

    pub fn references(&self) -> Vec<Reference> {
        vec![
            Reference::required("manufacturer_id", EntityKind::Manufacturer, self.manufacturer_id),
            Reference::optional("facility_id", EntityKind::StorageFacility, self.facility_id),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewWeapon {
    pub name: String,
    #[serde(rename = "type")]
    pub weapon_type: Option<String>,
    pub model: Option<String>,
    pub serial_number: String,
    pub manufacturer_id: Option<ManufacturerId>,
    pub caliber: Option<String>,
    pub acquisition_date: Option<NaiveDate>,
    pub status: Option<WeaponStatus>,
    pub facility_id: Option<FacilityId>,
    pub last_inspection_date: Option<NaiveDate>,
}

impl NewWeapon {
    pub fn into_weapon(self) -> Result<Weapon, DomainError> {
        let manufacturer_id = self
            .manufacturer_id
            .ok_or_else(|| DomainError::validation("manufacturer_id is required"))?;
        Ok(Weapon {
            name: required_text(&self.name, "name")?,
            weapon_type: trimmed(self.weapon_type.as_deref()),
            model: trimmed(self.model.as_deref()),
            serial_number: required_text(&self.serial_number, "serial_number")?,
            manufacturer_id,
            caliber: trimmed(self.caliber.as_deref()),
            acquisition_date: self.acquisition_date,
            status: self.status.unwrap_or(Weapon::DEFAULT_STATUS),
            assigned_unit_id: None,
            facility_id: self.facility_id,
            last_inspection_date: self.last_inspection_date,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WeaponPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub weapon_type: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub manufacturer_id: Option<ManufacturerId>,
    pub caliber: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub acquisition_date: Option<Option<NaiveDate>>,
    pub status: Option<WeaponStatus>,
    #[serde(deserialize_with = "double_option")]
    pub facility_id: Option<Option<FacilityId>>,
    #[serde(deserialize_with = "double_option")]
    pub last_inspection_date: Option<Option<NaiveDate>>,
}

impl WeaponPatch {
    pub fn apply(self, target: &mut Weapon) -> Result<(), DomainError> {
        if let Some(name) = self.name {
            target.name = required_text(&name, "name")?;
        }
        if let Some(weapon_type) = self.weapon_type {
            target.weapon_type = weapon_type.trim().to_string();
        }
        if let Some(model) = self.model {
            target.model = model.trim().to_string();
        }
        if let Some(serial) = self.serial_number {
            target.serial_number = required_text(&serial, "serial_number")?;
        }
        if let Some(manufacturer_id) = self.manufacturer_id {
            target.manufacturer_id = manufacturer_id;
        }
        if let Some(caliber) = self.caliber {
            target.caliber = caliber.trim().to_string();
        }
        if let Some(date) = self.acquisition_date {
            target.acquisition_date = date;
        }
        if let Some(facility_id) = self.facility_id {
            target.facility_id = facility_id;
        }
        if let Some(date) = self.last_inspection_date {
            target.last_inspection_date = date;
        }
        if let Some(status) = self.status {
            target.status = target.status.transition_to(status)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glock() -> Weapon {
        Weapon::new("Glock 19", "GL-0001", ManufacturerId::new(1))
    }

    #[test]
    fn weapon_statuses_move_freely() {
        use WeaponStatus::*;
        for from in WeaponStatus::ALL {
            for to in WeaponStatus::ALL {
                assert!(from.transition_to(*to).is_ok(), "{from} -> {to}");
            }
        }
        assert!(!Active.is_terminal());
        assert!(!UnderMaintenance.is_terminal());
    }

    #[test]
    fn new_weapon_requires_manufacturer_and_serial() {
        let missing_maker = NewWeapon {
            name: "Glock 19".into(),
            serial_number: "GL-1".into(),
            ..Default::default()
        };
        assert!(missing_maker.into_weapon().is_err());

        let missing_serial = NewWeapon {
            name: "Glock 19".into(),
            manufacturer_id: Some(ManufacturerId::new(1)),
            ..Default::default()
        };
        let err = missing_serial.into_weapon().unwrap_err();
        assert!(err.to_string().contains("serial_number"));
    }

    #[test]
    fn new_weapon_never_carries_a_unit() {
        let input: NewWeapon = serde_json::from_str(
            r#"{"name":"Glock 19","serial_number":"GL-1","manufacturer_id":1,"assigned_unit_id":7}"#,
        )
        .unwrap();
        let weapon = input.into_weapon().unwrap();
        assert_eq!(weapon.assigned_unit_id, None);
        assert_eq!(weapon.status, WeaponStatus::Active);
    }

    #[test]
    fn patch_can_clear_facility() {
        let mut weapon = glock().with_facility(FacilityId::new(3));
        let patch: WeaponPatch = serde_json::from_str(r#"{"facility_id":null}"#).unwrap();
        patch.apply(&mut weapon).unwrap();
        assert_eq!(weapon.facility_id, None);
    }

    #[test]
    fn references_list_optional_facility() {
        let refs = glock().references();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].id, Some(1));
        assert_eq!(refs[1].id, None);
    }
}
