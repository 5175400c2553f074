//! Weapon maintenance CRUD operations.

use std::sync::Arc;

use armory_domain::{
    EntityKind, MaintenanceId, NewWeaponMaintenance, Record, WeaponMaintenancePatch,
};

use crate::infrastructure::ports::{ClockPort, MaintenanceRecord, MaintenanceRepo};
use crate::use_cases::deletion::DeletionGuard;
use crate::use_cases::error::CoreError;
use crate::use_cases::validation::ReferenceValidator;

pub struct MaintenanceCrud {
    repo: Arc<dyn MaintenanceRepo>,
    validator: Arc<ReferenceValidator>,
    guard: Arc<DeletionGuard>,
    clock: Arc<dyn ClockPort>,
}

impl MaintenanceCrud {
    pub fn new(
        repo: Arc<dyn MaintenanceRepo>,
        validator: Arc<ReferenceValidator>,
        guard: Arc<DeletionGuard>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            repo,
            validator,
            guard,
            clock,
        }
    }

    pub async fn list(&self) -> Result<Vec<MaintenanceRecord>, CoreError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: MaintenanceId) -> Result<MaintenanceRecord, CoreError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::WeaponMaintenance, id))
    }

    pub async fn create(&self, input: NewWeaponMaintenance) -> Result<MaintenanceRecord, CoreError> {
        let record = input.into_maintenance()?;
        self.validator
            .validate(EntityKind::WeaponMaintenance, &record.references())
            .await?;

        let id = self.repo.insert(&record).await?;
        tracing::info!(
            maintenance_id = %id,
            weapon_id = %record.weapon_id,
            status = %record.status,
            "Maintenance recorded"
        );
        Ok(Record::new(id, record))
    }

    /// Moving to Completed or Cancelled stamps the end date (default today).
    pub async fn update(
        &self,
        id: MaintenanceId,
        patch: WeaponMaintenancePatch,
    ) -> Result<MaintenanceRecord, CoreError> {
        let mut record = self.get(id).await?;
        let before = record.value.references();

        patch.apply(&mut record.value, self.clock.today())?;
        self.validator
            .validate_changed(
                EntityKind::WeaponMaintenance,
                &before,
                &record.value.references(),
            )
            .await?;

        if !self.repo.update(id, &record.value).await? {
            return Err(CoreError::not_found(EntityKind::WeaponMaintenance, id));
        }
        tracing::info!(maintenance_id = %id, status = %record.value.status, "Maintenance updated");
        Ok(record)
    }

    pub async fn delete(&self, id: MaintenanceId) -> Result<(), CoreError> {
        self.guard
            .delete(EntityKind::WeaponMaintenance, id.get())
            .await
    }
}
