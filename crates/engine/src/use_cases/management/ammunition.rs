//! Ammunition CRUD operations.

use std::sync::Arc;

use armory_domain::{AmmunitionId, AmmunitionPatch, EntityKind, NewAmmunition, Record};

use crate::infrastructure::ports::{AmmunitionRecord, AmmunitionRepo, ClockPort};
use crate::use_cases::deletion::DeletionGuard;
use crate::use_cases::error::CoreError;
use crate::use_cases::validation::ReferenceValidator;

pub struct AmmunitionCrud {
    repo: Arc<dyn AmmunitionRepo>,
    validator: Arc<ReferenceValidator>,
    guard: Arc<DeletionGuard>,
    clock: Arc<dyn ClockPort>,
}

impl AmmunitionCrud {
    pub fn new(
        repo: Arc<dyn AmmunitionRepo>,
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

    pub async fn list(&self) -> Result<Vec<AmmunitionRecord>, CoreError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: AmmunitionId) -> Result<AmmunitionRecord, CoreError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::Ammunition, id))
    }

    pub async fn create(&self, input: NewAmmunition) -> Result<AmmunitionRecord, CoreError> {
        let lot = input.into_ammunition(self.clock.today())?;
        self.validator
            .validate(EntityKind::Ammunition, &lot.references())
            .await?;
        self.validator
            .ensure_accepts_stock(EntityKind::Ammunition, lot.facility_id)
            .await?;

        let id = self.repo.insert(&lot).await?;
        tracing::info!(
            ammunition_id = %id,
            facility_id = %lot.facility_id,
            quantity = lot.quantity,
            "Ammunition lot created"
        );
        Ok(Record::new(id, lot))
    }

    /// Field edits land first; a status change is then checked against the
    /// new quantity and expiration date.
    pub async fn update(
        &self,
        id: AmmunitionId,
        patch: AmmunitionPatch,
    ) -> Result<AmmunitionRecord, CoreError> {
        let mut record = self.get(id).await?;
        let before = record.value.references();
        let old_facility = record.value.facility_id;

        patch.apply(&mut record.value, self.clock.today())?;
        self.validator
            .validate_changed(EntityKind::Ammunition, &before, &record.value.references())
            .await?;
        if record.value.facility_id != old_facility {
            self.validator
                .ensure_accepts_stock(EntityKind::Ammunition, record.value.facility_id)
                .await?;
        }

        if !self.repo.update(id, &record.value).await? {
            return Err(CoreError::not_found(EntityKind::Ammunition, id));
        }
        tracing::info!(ammunition_id = %id, status = %record.value.status, "Ammunition lot updated");
        Ok(record)
    }

    pub async fn delete(&self, id: AmmunitionId) -> Result<(), CoreError> {
        self.guard.delete(EntityKind::Ammunition, id.get()).await
    }
}
