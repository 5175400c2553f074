//! Military unit CRUD operations.

use std::sync::Arc;

use armory_domain::{EntityKind, MilitaryUnitPatch, NewMilitaryUnit, Record, UnitId};

use crate::infrastructure::ports::{UnitRecord, UnitRepo};
use crate::use_cases::deletion::DeletionGuard;
use crate::use_cases::error::CoreError;

pub struct UnitCrud {
    repo: Arc<dyn UnitRepo>,
    guard: Arc<DeletionGuard>,
}

impl UnitCrud {
    pub fn new(repo: Arc<dyn UnitRepo>, guard: Arc<DeletionGuard>) -> Self {
        Self { repo, guard }
    }

    pub async fn list(&self) -> Result<Vec<UnitRecord>, CoreError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: UnitId) -> Result<UnitRecord, CoreError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::MilitaryUnit, id))
    }

    pub async fn create(&self, input: NewMilitaryUnit) -> Result<UnitRecord, CoreError> {
        let unit = input.into_unit()?;
        let id = self.repo.insert(&unit).await?;
        tracing::info!(unit_id = %id, name = %unit.name, "Unit created");
        Ok(Record::new(id, unit))
    }

    pub async fn update(&self, id: UnitId, patch: MilitaryUnitPatch) -> Result<UnitRecord, CoreError> {
        let mut record = self.get(id).await?;
        patch.apply(&mut record.value)?;
        if !self.repo.update(id, &record.value).await? {
            return Err(CoreError::not_found(EntityKind::MilitaryUnit, id));
        }
        tracing::info!(unit_id = %id, "Unit updated");
        Ok(record)
    }

    /// Blocked while soldiers, assignments or issued weapons reference the unit.
    pub async fn delete(&self, id: UnitId) -> Result<(), CoreError> {
        self.guard.delete(EntityKind::MilitaryUnit, id.get()).await
    }
}
