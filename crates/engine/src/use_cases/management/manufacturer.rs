//! Manufacturer CRUD operations.

use std::sync::Arc;

use armory_domain::{EntityKind, ManufacturerId, ManufacturerPatch, NewManufacturer, Record};

use crate::infrastructure::ports::{ManufacturerRecord, ManufacturerRepo};
use crate::use_cases::deletion::DeletionGuard;
use crate::use_cases::error::CoreError;

pub struct ManufacturerCrud {
    repo: Arc<dyn ManufacturerRepo>,
    guard: Arc<DeletionGuard>,
}

impl ManufacturerCrud {
    pub fn new(repo: Arc<dyn ManufacturerRepo>, guard: Arc<DeletionGuard>) -> Self {
        Self { repo, guard }
    }

    pub async fn list(&self) -> Result<Vec<ManufacturerRecord>, CoreError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: ManufacturerId) -> Result<ManufacturerRecord, CoreError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::Manufacturer, id))
    }

    pub async fn create(&self, input: NewManufacturer) -> Result<ManufacturerRecord, CoreError> {
        let manufacturer = input.into_manufacturer()?;
        let id = self.repo.insert(&manufacturer).await?;
        tracing::info!(manufacturer_id = %id, name = %manufacturer.name, "Manufacturer created");
        Ok(Record::new(id, manufacturer))
    }

    pub async fn update(
        &self,
        id: ManufacturerId,
        patch: ManufacturerPatch,
    ) -> Result<ManufacturerRecord, CoreError> {
        let mut record = self.get(id).await?;
        patch.apply(&mut record.value)?;
        if !self.repo.update(id, &record.value).await? {
            return Err(CoreError::not_found(EntityKind::Manufacturer, id));
        }
        tracing::info!(manufacturer_id = %id, "Manufacturer updated");
        Ok(record)
    }

    pub async fn delete(&self, id: ManufacturerId) -> Result<(), CoreError> {
        self.guard.delete(EntityKind::Manufacturer, id.get()).await
    }
}
