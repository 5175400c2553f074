//! Manufacturer entity - makers of weapons and ammunition

use serde::{Deserialize, Serialize};

use crate::common::{required_text, trimmed};
use crate::DomainError;

named_enum! {
    pub enum ManufacturerStatus ("manufacturer status") {
        Active => "Active",
        Inactive => "Inactive",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub name: String,
    pub country: String,
    pub contact_info: String,
    pub status: ManufacturerStatus,
}

impl Manufacturer {
    pub const DEFAULT_STATUS: ManufacturerStatus = ManufacturerStatus::Active;

    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            contact_info: String::new(),
            status: Self::DEFAULT_STATUS,
        }
    }

    pub fn with_contact_info(mut self, contact_info: impl Into<String>) -> Self {
        self.contact_info = contact_info.into();
        self
    }
}

/// Create request for a manufacturer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewManufacturer {
    pub name: String,
    pub country: Option<String>,
    pub contact_info: Option<String>,
    pub status: Option<ManufacturerStatus>,
}

impl NewManufacturer {
    pub fn into_manufacturer(self) -> Result<Manufacturer, DomainError> {
        Ok(Manufacturer {
            name: required_text(&self.name, "name")?,
            country: trimmed(self.country.as_deref()),
            contact_info: trimmed(self.contact_info.as_deref()),
            status: self.status.unwrap_or(Manufacturer::DEFAULT_STATUS),
        })
    }
}

/// Partial update for a manufacturer. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ManufacturerPatch {
    pub name: Option<String>,
    pub country: Option<String>,
    pub contact_info: Option<String>,
    pub status: Option<ManufacturerStatus>,
}

impl ManufacturerPatch {
    pub fn apply(self, target: &mut Manufacturer) -> Result<(), DomainError> {
        if let Some(name) = self.name {
            target.name = required_text(&name, "name")?;
        }
        if let Some(country) = self.country {
            target.country = country.trim().to_string();
        }
        if let Some(contact_info) = self.contact_info {
            target.contact_info = contact_info.trim().to_string();
        }
        if let Some(status) = self.status {
            target.status = status;
        }
        Ok(())
    }
}
