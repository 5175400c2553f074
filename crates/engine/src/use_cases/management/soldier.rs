//! Soldier CRUD operations.

use std::sync::Arc;

use armory_domain::{EntityKind, NewSoldier, Record, SoldierId, SoldierPatch};

use crate::infrastructure::ports::{SoldierRecord, SoldierRepo};
use crate::use_cases::deletion::DeletionGuard;
use crate::use_cases::error::CoreError;
use crate::use_cases::validation::ReferenceValidator;

pub struct SoldierCrud {
    repo: Arc<dyn SoldierRepo>,
    validator: Arc<ReferenceValidator>,
    guard: Arc<DeletionGuard>,
}

impl SoldierCrud {
    pub fn new(
        repo: Arc<dyn SoldierRepo>,
        validator: Arc<ReferenceValidator>,
        guard: Arc<DeletionGuard>,
    ) -> Self {
        Self {
            repo,
            validator,
            guard,
        }
    }

    pub async fn list(&self) -> Result<Vec<SoldierRecord>, CoreError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: SoldierId) -> Result<SoldierRecord, CoreError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::Soldier, id))
    }

    pub async fn create(&self, input: NewSoldier) -> Result<SoldierRecord, CoreError> {
        let soldier = input.into_soldier()?;
        self.ensure_serial_free(&soldier.serial_number, None).await?;
        self.validator
            .validate(EntityKind::Soldier, &soldier.references())
            .await?;

        let id = self.repo.insert(&soldier).await?;
        tracing::info!(soldier_id = %id, unit_id = %soldier.unit_id, "Soldier created");
        Ok(Record::new(id, soldier))
    }

    pub async fn update(&self, id: SoldierId, patch: SoldierPatch) -> Result<SoldierRecord, CoreError> {
        let mut record = self.get(id).await?;
        let before = record.value.references();
        let old_serial = record.value.serial_number.clone();

        patch.apply(&mut record.value)?;
        if record.value.serial_number != old_serial {
            self.ensure_serial_free(&record.value.serial_number, Some(id))
                .await?;
        }
        self.validator
            .validate_changed(EntityKind::Soldier, &before, &record.value.references())
            .await?;

        if !self.repo.update(id, &record.value).await? {
            return Err(CoreError::not_found(EntityKind::Soldier, id));
        }
        tracing::info!(soldier_id = %id, "Soldier updated");
        Ok(record)
    }

    pub async fn delete(&self, id: SoldierId) -> Result<(), CoreError> {
        self.guard.delete(EntityKind::Soldier, id.get()).await
    }

    async fn ensure_serial_free(
        &self,
        serial_number: &str,
        owner: Option<SoldierId>,
    ) -> Result<(), CoreError> {
        match self.repo.find_by_serial(serial_number).await? {
            Some(existing) if Some(existing.id) != owner => Err(CoreError::conflict(format!(
                "Soldier serial number {} is already used by soldier {}",
                serial_number, existing.id
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockReferenceRepo, MockSoldierRepo};
    use armory_domain::UnitId;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn join_before_birth_is_rejected_before_any_lookup() {
        let mut repo = MockSoldierRepo::new();
        repo.expect_find_by_serial().never();
        let refs = Arc::new(MockReferenceRepo::new());
        let crud = SoldierCrud::new(
            Arc::new(repo),
            Arc::new(ReferenceValidator::new(refs.clone())),
            Arc::new(DeletionGuard::new(refs)),
        );

        let err = crud
            .create(NewSoldier {
                first_name: "Anna".to_string(),
                last_name: "Berg".to_string(),
                serial_number: "S-100".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1),
                join_date: NaiveDate::from_ymd_opt(1999, 1, 1),
                unit_id: Some(UnitId::new(2)),
                ..Default::default()
            })
            .await
            .expect_err("dates out of order");
        assert_eq!(err.kind(), "ValidationError");
    }
}
