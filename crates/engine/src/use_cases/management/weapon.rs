//! Weapon CRUD operations.
//!
//! The generic surface never writes `assigned_unit_id`; custody changes go
//! through the assignment coordinator. Updates hold the weapon's custody lock
//! so a concurrent return or loss is never overwritten with a stale status.

use std::sync::Arc;

use armory_domain::{EntityKind, NewWeapon, Record, WeaponId, WeaponPatch};

use crate::infrastructure::ports::{WeaponRecord, WeaponRepo};
use crate::use_cases::custody::CustodyLocks;
use crate::use_cases::deletion::DeletionGuard;
use crate::use_cases::error::CoreError;
use crate::use_cases::validation::ReferenceValidator;

pub struct WeaponCrud {
    repo: Arc<dyn WeaponRepo>,
    validator: Arc<ReferenceValidator>,
    guard: Arc<DeletionGuard>,
    locks: Arc<CustodyLocks>,
}

impl WeaponCrud {
    pub fn new(
        repo: Arc<dyn WeaponRepo>,
        validator: Arc<ReferenceValidator>,
        guard: Arc<DeletionGuard>,
        locks: Arc<CustodyLocks>,
    ) -> Self {
        Self {
            repo,
            validator,
            guard,
            locks,
        }
    }

    pub async fn list(&self) -> Result<Vec<WeaponRecord>, CoreError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: WeaponId) -> Result<WeaponRecord, CoreError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::Weapon, id))
    }

    pub async fn create(&self, input: NewWeapon) -> Result<WeaponRecord, CoreError> {
        let weapon = input.into_weapon()?;
        self.ensure_serial_free(&weapon.serial_number, None).await?;
        self.validator
            .validate(EntityKind::Weapon, &weapon.references())
            .await?;
        if let Some(facility) = weapon.facility_id {
            self.validator
                .ensure_accepts_stock(EntityKind::Weapon, facility)
                .await?;
        }

        let id = self.repo.insert(&weapon).await?;
        tracing::info!(
            weapon_id = %id,
            serial_number = %weapon.serial_number,
            manufacturer_id = %weapon.manufacturer_id,
            "Weapon created"
        );
        Ok(Record::new(id, weapon))
    }

    pub async fn update(&self, id: WeaponId, patch: WeaponPatch) -> Result<WeaponRecord, CoreError> {
        let _custody = self.locks.acquire(id).await;
        let mut record = self.get(id).await?;
        let before = record.value.references();
        let old_serial = record.value.serial_number.clone();
        let old_facility = record.value.facility_id;

        patch.apply(&mut record.value)?;
        if record.value.serial_number != old_serial {
            self.ensure_serial_free(&record.value.serial_number, Some(id))
                .await?;
        }
        self.validator
            .validate_changed(EntityKind::Weapon, &before, &record.value.references())
            .await?;
        if let Some(facility) = record.value.facility_id.filter(|f| Some(*f) != old_facility) {
            self.validator
                .ensure_accepts_stock(EntityKind::Weapon, facility)
                .await?;
        }

        if !self.repo.update(id, &record.value).await? {
            return Err(CoreError::not_found(EntityKind::Weapon, id));
        }
        tracing::info!(weapon_id = %id, status = %record.value.status, "Weapon updated");
        Ok(record)
    }

    /// Blocked while assignment or maintenance rows reference the weapon.
    pub async fn delete(&self, id: WeaponId) -> Result<(), CoreError> {
        self.guard.delete(EntityKind::Weapon, id.get()).await
    }

    async fn ensure_serial_free(
        &self,
        serial_number: &str,
        owner: Option<WeaponId>,
    ) -> Result<(), CoreError> {
        match self.repo.find_by_serial(serial_number).await? {
            Some(existing) if Some(existing.id) != owner => Err(CoreError::conflict(format!(
                "Weapon serial number {} is already used by weapon {}",
                serial_number, existing.id
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockReferenceRepo, MockWeaponRepo};
    use armory_domain::{FacilityId, ManufacturerId, Weapon, WeaponStatus};

    fn crud(repo: MockWeaponRepo, refs: MockReferenceRepo) -> WeaponCrud {
        crud_with_locks(repo, refs, Arc::new(CustodyLocks::new()))
    }

    fn crud_with_locks(
        repo: MockWeaponRepo,
        refs: MockReferenceRepo,
        locks: Arc<CustodyLocks>,
    ) -> WeaponCrud {
        let refs: Arc<MockReferenceRepo> = Arc::new(refs);
        WeaponCrud::new(
            Arc::new(repo),
            Arc::new(ReferenceValidator::new(refs.clone())),
            Arc::new(DeletionGuard::new(refs)),
            locks,
        )
    }

    fn glock_input() -> NewWeapon {
        NewWeapon {
            name: "Glock 19".to_string(),
            serial_number: "G19-0001".to_string(),
            manufacturer_id: Some(ManufacturerId::new(1)),
            status: Some(WeaponStatus::Active),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_applies_defaults_and_inserts() {
        let mut repo = MockWeaponRepo::new();
        repo.expect_find_by_serial().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|w| w.assigned_unit_id.is_none() && w.caliber.is_empty())
            .times(1)
            .returning(|_| Ok(WeaponId::new(10)));
        let mut refs = MockReferenceRepo::new();
        refs.expect_exists().returning(|_, _| Ok(true));

        let created = crud(repo, refs).create(glock_input()).await.expect("created");
        assert_eq!(created.id, WeaponId::new(10));
        assert_eq!(created.value.status, WeaponStatus::Active);
    }

    #[tokio::test]
    async fn duplicate_serial_is_a_conflict() {
        let mut repo = MockWeaponRepo::new();
        repo.expect_find_by_serial().returning(|serial| {
            Ok(Some(Record::new(
                WeaponId::new(3),
                Weapon::new("Other", serial, ManufacturerId::new(1)),
            )))
        });
        repo.expect_insert().never();

        let err = crud(repo, MockReferenceRepo::new())
            .create(glock_input())
            .await
            .expect_err("duplicate");
        assert_eq!(err.kind(), "Conflict");
    }

    #[tokio::test]
    async fn missing_manufacturer_is_a_validation_error() {
        let err = crud(MockWeaponRepo::new(), MockReferenceRepo::new())
            .create(NewWeapon {
                manufacturer_id: None,
                ..glock_input()
            })
            .await
            .expect_err("no manufacturer");
        assert_eq!(err.kind(), "ValidationError");
    }

    #[tokio::test]
    async fn update_revalidates_only_changed_references() {
        let mut repo = MockWeaponRepo::new();
        repo.expect_get().returning(|id| {
            Ok(Some(Record::new(
                id,
                Weapon::new("Glock 19", "G19-0001", ManufacturerId::new(1)),
            )))
        });
        repo.expect_update().never();
        let mut refs = MockReferenceRepo::new();
        refs.expect_exists()
            .withf(|kind, id| *kind == EntityKind::StorageFacility && *id == 8)
            .times(1)
            .returning(|_, _| Ok(false));

        let err = crud(repo, refs)
            .update(
                WeaponId::new(10),
                WeaponPatch {
                    facility_id: Some(Some(FacilityId::new(8))),
                    ..Default::default()
                },
            )
            .await
            .expect_err("facility 8 missing");
        assert_eq!(err.kind(), "RefError");
    }

    #[tokio::test]
    async fn status_moves_freely_between_weapon_states() {
        let mut repo = MockWeaponRepo::new();
        repo.expect_get().returning(|id| {
            Ok(Some(Record::new(
                id,
                Weapon::new("Glock 19", "G19-0001", ManufacturerId::new(1))
                    .with_status(WeaponStatus::UnderMaintenance),
            )))
        });
        repo.expect_update().returning(|_, _| Ok(true));

        let updated = crud(repo, MockReferenceRepo::new())
            .update(
                WeaponId::new(10),
                WeaponPatch {
                    status: Some(WeaponStatus::Inactive),
                    ..Default::default()
                },
            )
            .await
            .expect("updated");
        assert_eq!(updated.value.status, WeaponStatus::Inactive);
    }

    #[tokio::test]
    async fn update_waits_for_an_inflight_custody_change() {
        let mut repo = MockWeaponRepo::new();
        repo.expect_get().returning(|id| {
            Ok(Some(Record::new(
                id,
                Weapon::new("Glock 19", "G19-0001", ManufacturerId::new(1)),
            )))
        });
        repo.expect_update().returning(|_, _| Ok(true));
        let locks = Arc::new(CustodyLocks::new());
        let crud = crud_with_locks(repo, MockReferenceRepo::new(), locks.clone());

        let custody = locks.acquire(WeaponId::new(10)).await;
        let patch = || WeaponPatch {
            model: Some("Gen5".to_string()),
            ..Default::default()
        };
        let blocked = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            crud.update(WeaponId::new(10), patch()),
        )
        .await;
        assert!(blocked.is_err(), "update must wait for the custody change");

        drop(custody);
        let updated = crud.update(WeaponId::new(10), patch()).await.expect("updated");
        assert_eq!(updated.value.model, "Gen5");
    }
}
