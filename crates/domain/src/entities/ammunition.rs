//! Ammunition entity - lots of rounds held at a facility
//!
//! Expiry and depletion are never applied behind the caller's back. A lot
//! past its expiration date stays Available until someone asks for a
//! status change or runs the refresh pass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{double_option, require_not_before, required_text, trimmed};
use crate::{DomainError, EntityKind, FacilityId, Lifecycle, ManufacturerId, Reference};

named_enum! {
    pub enum AmmunitionStatus ("ammunition status") {
        Available => "Available",
        Reserved => "Reserved",
        Depleted => "Depleted",
        Expired => "Expired",
    }
}

impl Lifecycle for AmmunitionStatus {
    const KIND: EntityKind = EntityKind::Ammunition;

    fn allows(self, next: Self) -> bool {
        use AmmunitionStatus::*;
        matches!(
            (self, next),
            (Available, Reserved)
                | (Reserved, Available)
                | (Available | Reserved, Depleted | Expired)
        )
    }

    fn is_terminal(self) -> bool {
        matches!(self, AmmunitionStatus::Depleted | AmmunitionStatus::Expired)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ammunition {
    pub name: String,
    #[serde(rename = "type")]
    pub ammo_type: String,
    pub caliber: String,
    pub quantity: u32,
    pub manufacturer_id: ManufacturerId,
    pub batch_number: String,
    pub production_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub facility_id: FacilityId,
    pub status: AmmunitionStatus,
}

impl Ammunition {
    pub const DEFAULT_QUANTITY: u32 = 0;
    pub const DEFAULT_STATUS: AmmunitionStatus = AmmunitionStatus::Available;

    pub fn new(
        name: impl Into<String>,
        manufacturer_id: ManufacturerId,
        facility_id: FacilityId,
    ) -> Self {
        Self {
            name: name.into(),
            ammo_type: String::new(),
            caliber: String::new(),
            quantity: Self::DEFAULT_QUANTITY,
            manufacturer_id,
            batch_number: String::new(),
            production_date: None,
            expiration_date: None,
            facility_id,
            status: Self::DEFAULT_STATUS,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_expiration(mut self, expiration_date: NaiveDate) -> Self {
        self.expiration_date = Some(expiration_date);
        self
    }

    /// Past its expiration date as of `today`. A lot without one never expires.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiration_date.is_some_and(|exp| exp < today)
    }

    /// Moves to `to`, enforcing the edge guards.
    ///
    /// Depleted needs an empty lot; Expired needs an expiration date before
    /// `today`.
    pub fn transition_status(
        &mut self,
        to: AmmunitionStatus,
        today: NaiveDate,
    ) -> Result<(), DomainError> {
        if to == self.status {
            return Ok(());
        }
        let next = self.status.transition_to(to)?;
        let guard_holds = match next {
            AmmunitionStatus::Depleted => self.quantity == 0,
            AmmunitionStatus::Expired => self.is_expired(today),
            AmmunitionStatus::Available | AmmunitionStatus::Reserved => true,
        };
        if !guard_holds {
            return Err(DomainError::invalid_state_transition(
                AmmunitionStatus::KIND.as_str(),
                self.status,
                next,
            ));
        }
        self.status = next;
        Ok(())
    }

    /// Status the refresh pass would assign, if it differs from the current one.
    pub fn refreshed_status(&self, today: NaiveDate) -> Option<AmmunitionStatus> {
        if self.status.is_terminal() {
            return None;
        }
        if self.quantity == 0 {
            Some(AmmunitionStatus::Depleted)
        } else if self.is_expired(today) {
            Some(AmmunitionStatus::Expired)
        } else {
            None
        }
    }

    pub fn references(&self) -> Vec<Reference> {
        vec![
            Reference::required("manufacturer_id", EntityKind::Manufacturer, self.manufacturer_id),
            Reference::required("facility_id", EntityKind::StorageFacility, self.facility_id),
        ]
    }

    fn check_fields(&self) -> Result<(), DomainError> {
        if let (Some(made), Some(expires)) = (self.production_date, self.expiration_date) {
            require_not_before(expires, made, "expiration_date", "production_date")?;
        }
        if self.status == AmmunitionStatus::Depleted && self.quantity > 0 {
            return Err(DomainError::validation(
                "a Depleted lot must have quantity 0",
            ));
        }
        if self.status == AmmunitionStatus::Expired && self.expiration_date.is_none() {
            return Err(DomainError::validation(
                "an Expired lot must have an expiration_date",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewAmmunition {
    pub name: String,
    #[serde(rename = "type")]
    pub ammo_type: Option<String>,
    pub caliber: Option<String>,
    pub quantity: Option<u32>,
    pub manufacturer_id: Option<ManufacturerId>,
    pub batch_number: Option<String>,
    pub production_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub facility_id: Option<FacilityId>,
    pub status: Option<AmmunitionStatus>,
}

impl NewAmmunition {
    /// Builds the lot. An Expired starting status needs an expiration date
    /// before `today`, the same as the transition into Expired.
    pub fn into_ammunition(self, today: NaiveDate) -> Result<Ammunition, DomainError> {
        let manufacturer_id = self
            .manufacturer_id
            .ok_or_else(|| DomainError::validation("manufacturer_id is required"))?;
        let facility_id = self
            .facility_id
            .ok_or_else(|| DomainError::validation("facility_id is required"))?;
        let lot = Ammunition {
            name: required_text(&self.name, "name")?,
            ammo_type: trimmed(self.ammo_type.as_deref()),
            caliber: trimmed(self.caliber.as_deref()),
            quantity: self.quantity.unwrap_or(Ammunition::DEFAULT_QUANTITY),
            manufacturer_id,
            batch_number: trimmed(self.batch_number.as_deref()),
            production_date: self.production_date,
            expiration_date: self.expiration_date,
            facility_id,
            status: self.status.unwrap_or(Ammunition::DEFAULT_STATUS),
        };
        lot.check_fields()?;
        if lot.status == AmmunitionStatus::Expired && !lot.is_expired(today) {
            return Err(DomainError::validation(
                "an Expired lot must have an expiration_date before today",
            ));
        }
        Ok(lot)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AmmunitionPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ammo_type: Option<String>,
    pub caliber: Option<String>,
    pub quantity: Option<u32>,
    pub manufacturer_id: Option<ManufacturerId>,
    pub batch_number: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub production_date: Option<Option<NaiveDate>>,
    #[serde(deserialize_with = "double_option")]
    pub expiration_date: Option<Option<NaiveDate>>,
    pub facility_id: Option<FacilityId>,
    pub status: Option<AmmunitionStatus>,
}

impl AmmunitionPatch {
    /// Applies field edits first, then the status change against the new values.
    pub fn apply(self, target: &mut Ammunition, today: NaiveDate) -> Result<(), DomainError> {
        if let Some(name) = self.name {
            target.name = required_text(&name, "name")?;
        }
        if let Some(ammo_type) = self.ammo_type {
            target.ammo_type = ammo_type.trim().to_string();
        }
        if let Some(caliber) = self.caliber {
            target.caliber = caliber.trim().to_string();
        }
        if let Some(quantity) = self.quantity {
            target.quantity = quantity;
        }
        if let Some(manufacturer_id) = self.manufacturer_id {
            target.manufacturer_id = manufacturer_id;
        }
        if let Some(batch_number) = self.batch_number {
            target.batch_number = batch_number.trim().to_string();
        }
        if let Some(date) = self.production_date {
            target.production_date = date;
        }
        if let Some(date) = self.expiration_date {
            target.expiration_date = date;
        }
        if let Some(facility_id) = self.facility_id {
            target.facility_id = facility_id;
        }
        if let Some(status) = self.status {
            target.transition_status(status, today)?;
        }
        target.check_fields()
    }
}
